//! HTTP handlers: health, PDF upload, and the pipeline-run acknowledgement.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub files: Vec<String>,
}

/// Case-insensitive PDF extension check.
pub fn is_pdf_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Accept multipart PDF uploads and persist each under a generated
/// unique path.
pub async fn ingest_pdf_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    let mut saved = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if !is_pdf_filename(&file_name) {
            return Err((
                StatusCode::BAD_REQUEST,
                "Only PDF files are allowed".to_string(),
            ));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let dest = state.upload_dir.join(format!("{}.pdf", Uuid::new_v4()));
        tokio::fs::write(&dest, &data).await.map_err(|e| {
            tracing::error!(error = %e, "failed to persist upload");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
        tracing::info!(file = %file_name, stored = %dest.display(), "upload persisted");
        saved.push(dest.to_string_lossy().into_owned());
    }

    Ok(Json(UploadResponse {
        status: "success",
        files: saved,
    }))
}

#[derive(Deserialize)]
pub struct RunRequest {
    pub files: Vec<String>,
}

#[derive(Serialize)]
pub struct RunResponse {
    pub status: &'static str,
    pub hint: &'static str,
    pub files: Vec<String>,
}

/// Validate the referenced documents exist and acknowledge the run.
///
/// The A1→A3 execution itself is triggered by a separate invocation
/// channel; this endpoint only resolves and validates the file list.
pub async fn pipeline_run_handler(
    Json(request): Json<RunRequest>,
) -> Result<Json<RunResponse>, (StatusCode, String)> {
    for file in &request.files {
        if !Path::new(file).exists() {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("File not found: {}", file),
            ));
        }
    }

    Ok(Json(RunResponse {
        status: "ok",
        hint: "submit these paths to the pipeline trigger to run extraction, verification, and screening",
        files: request.files,
    }))
}
