//! Server layer: axum webhook receiver and health endpoint

pub mod app;
pub mod webhook;

pub use app::{build_router, build_state, run_server, AppState, ServerError, ServiceUseCase};
pub use webhook::{WebhookPayload, WebhookSource};
