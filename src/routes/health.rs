//! Liveness endpoint

use axum::{Router, http::StatusCode, response::Response, routing::get};

use crate::routes::plain_text;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health - Always OK while the process is serving
async fn health() -> Response {
    plain_text(StatusCode::OK, "OK")
}
