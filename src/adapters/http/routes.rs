//! API route definitions

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::error::error_response;
use crate::application::{TokenRequestError, TokenService};
use crate::domain::TokenSnapshot;

pub const HEALTH_MESSAGE: &str = "Backend Server is running.";

/// Body of the 400 returned when the path segments cannot be extracted
pub const MSG_INVALID_PATH: &str = "Invalid request path";

/// Shared state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TokenService>,
}

impl AppState {
    pub fn new(service: TokenService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    // Any origin, no credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/token/:chain/:contract_address", get(get_token))
        .route("/api/test", get(health))
        .fallback(handle_404)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_token(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TokenSnapshot>, Response> {
    let Path((chain, contract_address)) = path.map_err(|rejection| {
        tracing::info!(error = %rejection, "Rejected token path");
        error_response(StatusCode::BAD_REQUEST, MSG_INVALID_PATH)
    })?;

    state
        .service
        .handle_token_request(&chain, &contract_address)
        .await
        .map(Json)
        .map_err(TokenRequestError::into_response)
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

async fn handle_404() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
