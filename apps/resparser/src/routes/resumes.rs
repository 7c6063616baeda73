use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::document::DocumentFormat;
use crate::errors::AppError;
use crate::models::record::ExtractedRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub request_id: Uuid,
    pub file_name: String,
    pub record: ExtractedRecord,
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload with a single `file` field. The uploaded file name's
/// extension picks the text extractor; anything but pdf/docx/doc is a 415.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("'file' field has no file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let format = DocumentFormat::from_path(Path::new(&file_name));
    if !format.is_supported() {
        return Err(AppError::UnsupportedFormat(file_name));
    }

    let request_id = Uuid::new_v4();
    info!("Parsing {file_name} ({} bytes), request {request_id}", bytes.len());

    let parser = state.parser.clone();
    let record = tokio::task::spawn_blocking(move || parser.parse_bytes(&bytes, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Parse task failed: {e}")))?;

    Ok(Json(ParseResponse {
        request_id,
        file_name,
        record,
    }))
}
