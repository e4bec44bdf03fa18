//! Multipart file upload handler.

use std::path::Path;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppMultipart};
use crate::state::AppState;

/// Multipart field name that carries the file.
const UPLOAD_FIELD: &str = "file";

/// Stored file metadata echoed back to the client.
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    #[serde(rename = "fieldname")]
    pub field_name: String,
    #[serde(rename = "originalname")]
    pub original_name: String,
    #[serde(rename = "mimetype")]
    pub mime_type: Option<String>,
    pub destination: String,
    pub filename: String,
    pub path: String,
    pub size: usize,
}

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub file: UploadedFile,
}

/// `POST /upload` - store one file from the `file` multipart field.
///
/// The stored name is the upload time in milliseconds plus the original
/// extension, so repeated uploads of the same file never collide. Fields
/// other than `file` are drained and ignored.
pub async fn upload_file(
    State(state): State<AppState>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let mime_type = field.content_type().map(ToString::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;

        let filename = timestamped_filename(&original_name, Utc::now().timestamp_millis());
        let destination = state.upload_dir().to_path_buf();
        tokio::fs::create_dir_all(&destination).await?;
        let path = destination.join(&filename);
        tokio::fs::write(&path, &data).await?;

        info!(filename = %filename, size = data.len(), "File stored");

        let file = UploadedFile {
            field_name: UPLOAD_FIELD.to_string(),
            original_name,
            mime_type,
            destination: destination.display().to_string(),
            filename,
            path: path.display().to_string(),
            size: data.len(),
        };
        return Ok(Json(UploadResponse {
            message: "File uploaded successfully",
            file,
        }));
    }

    Err(AppError::BadRequest(format!(
        "missing `{UPLOAD_FIELD}` field"
    )))
}

/// Build the stored filename from the upload time and the original
/// file's extension.
fn timestamped_filename(original_name: &str, timestamp_millis: i64) -> String {
    match Path::new(original_name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{timestamp_millis}.{ext}"),
        None => timestamp_millis.to_string(),
    }
}
