//! Static page templates, read once at startup.

use std::path::Path;

use anyhow::{Context, Result};

pub const HOME_TEMPLATE: &str = "index.html";
pub const FIRE_DETECTION_TEMPLATE: &str = "fire_detection.html";

/// Page bodies served verbatim. Neither template takes variables.
#[derive(Debug, Clone)]
pub struct PageTemplates {
    pub home: String,
    pub fire_detection: String,
}

impl PageTemplates {
    /// Reads both templates from `dir`. A missing template is fatal.
    pub async fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            home: read_template(dir, HOME_TEMPLATE).await?,
            fire_detection: read_template(dir, FIRE_DETECTION_TEMPLATE).await?,
        })
    }
}

async fn read_template(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read template {}", path.display()))
}
