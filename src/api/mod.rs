//! REST API endpoints.
//!
//! Axum-based HTTP API. One lookup endpoint plus a liveness probe. The
//! error bodies are part of the service contract and are fixed strings;
//! callers never see stack traces or upstream payloads.

use axum::routing::get;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types. The `Display` strings double as the `error` field
/// of the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing nickname")]
    MissingNickname,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("API key not set")]
    ApiKeyNotSet,

    /// Upstream profile lookup failed with a non-404 status, which is
    /// mirrored back to the caller.
    #[error("Faceit API error")]
    Upstream { status: u16 },

    /// Catch-all for everything else in the pipeline. The cause is
    /// logged; the caller gets a generic body.
    #[error("Server error or invalid API key")]
    Internal(#[from] anyhow::Error),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingNickname => StatusCode::BAD_REQUEST,
            ApiError::PlayerNotFound => StatusCode::NOT_FOUND,
            ApiError::ApiKeyNotSet => {
                tracing::error!("{} not set", crate::config::API_KEY_ENV);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Upstream { status } => StatusCode::from_u16(*status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Internal(err) => {
                tracing::error!("Lookup failed: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/player", get(routes::player::lookup_player))
        .route("/api/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_bodies_are_exact_contract_strings() {
        assert_eq!(ApiError::MissingNickname.to_string(), "Missing nickname");
        assert_eq!(ApiError::PlayerNotFound.to_string(), "Player not found");
        assert_eq!(ApiError::ApiKeyNotSet.to_string(), "API key not set");
        assert_eq!(
            ApiError::Upstream { status: 429 }.to_string(),
            "Faceit API error"
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).to_string(),
            "Server error or invalid API key"
        );
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let resp = ApiError::Upstream { status: 429 }.into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_invalid_upstream_status_falls_back_to_500() {
        let resp = ApiError::Upstream { status: 42 }.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
