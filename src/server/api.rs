//! API handlers for the translation server

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;

use super::error::ServerError;
use super::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Translation request; inline content wins over the URL
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatePdfRequest {
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_base64: Option<String>,
}

/// Translation response
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatePdfResponse {
    pub translated_base64: String,
    pub file_name: String,
}

/// Handler: POST /translate-pdf
pub async fn handle_translate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<TranslatePdfRequest>, JsonRejection>,
) -> Result<Json<TranslatePdfResponse>, ServerError> {
    let Json(request) = payload.map_err(|rejection| ServerError::InvalidRequest(rejection.body_text()))?;

    info!(
        "Translate request for {}",
        request.file_name.as_deref().unwrap_or("unnamed document")
    );

    let translated = state
        .controller
        .translate_source(
            request.file_base64.as_deref(),
            request.file_url.as_deref(),
            request.file_name.as_deref(),
        )
        .await?;

    Ok(Json(TranslatePdfResponse {
        translated_base64: FileManager::encode_base64(&translated.pdf_bytes),
        file_name: translated.file_name,
    }))
}
