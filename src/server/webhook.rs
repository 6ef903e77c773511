//! Webhook and health handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::application::ProcessFileInput;
use crate::domain::token::SkillsToken;

use super::app::AppState;

/// Skills webhook payload. Box sends more fields; these are the ones the
/// pipeline needs.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub source: Option<WebhookSource>,
    pub token: Option<SkillsToken>,
}

/// The file the webhook refers to
#[derive(Debug, Deserialize)]
pub struct WebhookSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// GET / health check
pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "healthy"}))
}

/// POST /webhook: validate the payload and run the pipeline.
///
/// Processing happens inline; Box allows Skills invocations to take a
/// while, and the error-card path inside the use case guarantees the
/// file ends up with visible metadata either way.
pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WebhookPayload>,
) -> Response {
    let file_id = payload.source.as_ref().and_then(|source| source.id.clone());
    let Some(file_id) = file_id.filter(|id| !id.is_empty()) else {
        tracing::error!("webhook missing file ID");
        return error_response(StatusCode::BAD_REQUEST, "Missing file ID");
    };

    let Some(token) = payload.token else {
        tracing::error!(%file_id, "webhook missing token");
        return error_response(StatusCode::BAD_REQUEST, "Missing token");
    };

    if token.read_token().is_none() {
        tracing::error!(%file_id, "webhook token has no read grant");
        return error_response(StatusCode::BAD_REQUEST, "Invalid token format");
    }

    let file_name = payload
        .source
        .and_then(|source| source.name)
        .unwrap_or_default()
        .to_lowercase();

    tracing::info!(%file_id, %file_name, "received webhook");

    let input = ProcessFileInput {
        file_id,
        file_name,
        token,
    };

    match state.use_case.execute(input).await {
        Ok(output) => {
            tracing::info!(
                cards = output.card_count,
                segments = output.segment_count,
                "processing completed"
            );
            Json(json!({"message": "Processing completed successfully"})).into_response()
        }
        Err(error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string()),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}
