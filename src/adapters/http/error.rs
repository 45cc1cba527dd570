//! Error to HTTP response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::TokenRequestError;

/// JSON error body: `{"error": "<message>"}`
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for TokenRequestError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error_response(status, self.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TokenRequestError::InvalidChain("bsc".into()), StatusCode::BAD_REQUEST),
            (
                TokenRequestError::InvalidContractAddress("123".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                TokenRequestError::UpstreamUnavailable { status: Some(503) },
                StatusCode::BAD_GATEWAY,
            ),
            (
                TokenRequestError::UpstreamShape("no pairs".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                TokenRequestError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_exposed() {
        let response = TokenRequestError::Internal("secret stack detail".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}
