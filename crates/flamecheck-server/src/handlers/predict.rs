//! Upload-and-classify handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use flamecheck_core::{classify, has_allowed_extension, sanitize_filename};
use tracing::{error, info, warn};

use crate::dto::PredictResponse;
use crate::error::AppError;
use crate::ServerState;

pub const IMAGE_FIELD: &str = "image";
pub const MODEL_FIELD: &str = "model";
pub const DEFAULT_MODEL: &str = "model1";

pub const NO_IMAGE: &str = "No image uploaded";
pub const EMPTY_FILENAME: &str = "Empty filename";
pub const UNSUPPORTED_TYPE: &str = "Unsupported file type";

struct ImagePart {
    file_name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    image: Option<ImagePart>,
    model: Option<String>,
}

impl UploadForm {
    /// Reads the first `image` file part and the first `model` text part.
    /// A part named `image` without a filename is not a file and is skipped;
    /// a part named `model` with a filename is a file and is skipped.
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some(IMAGE_FIELD) if form.image.is_none() => {
                    let Some(file_name) = field.file_name().map(str::to_owned) else {
                        continue;
                    };
                    let bytes = field.bytes().await?;
                    form.image = Some(ImagePart { file_name, bytes });
                }
                Some(MODEL_FIELD) if form.model.is_none() => {
                    if field.file_name().is_some() {
                        continue;
                    }
                    form.model = Some(field.text().await?);
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// POST /predict - Store the upload and classify it by filename.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;

    let image = form.image.ok_or_else(|| AppError::bad_request(NO_IMAGE))?;
    let model = form.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

    if image.file_name.is_empty() {
        return Err(AppError::bad_request(EMPTY_FILENAME));
    }

    let filename = sanitize_filename(&image.file_name);
    if filename.is_empty() {
        warn!("Filename {:?} sanitized to nothing", image.file_name);
        return Err(AppError::bad_request(EMPTY_FILENAME));
    }

    if state.config.enforce_extensions && !has_allowed_extension(&filename) {
        return Err(AppError::bad_request(UNSUPPORTED_TYPE));
    }

    state
        .uploads
        .save(&filename, &image.bytes)
        .await
        .map_err(|e| {
            error!("Failed to store upload {}: {}", filename, e);
            AppError::internal("failed to store upload")
        })?;

    let refs = state.references.load().await.map_err(|e| {
        error!("Failed to load reference sets: {}", e);
        AppError::internal("failed to load reference sets")
    })?;

    let verdict = classify(&refs, &filename);
    info!(
        filename = %filename,
        model = %model,
        prediction = %verdict.prediction,
        confidence = verdict.confidence,
        "Classified upload"
    );

    Ok(Json(PredictResponse::new(verdict, model)))
}
