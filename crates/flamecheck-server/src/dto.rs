use flamecheck_core::{Classification, Label};
use serde::Serialize;

// === HTTP DTOs ===

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Label,
    pub confidence: f64,
    pub model: String,
}

impl PredictResponse {
    pub fn new(verdict: Classification, model: String) -> Self {
        Self {
            prediction: verdict.prediction,
            confidence: verdict.confidence,
            model,
        }
    }
}
