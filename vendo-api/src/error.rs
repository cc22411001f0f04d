use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use vendo_core::error::CommerceError;

#[derive(Debug)]
pub struct ApiError(CommerceError);

impl From<CommerceError> for ApiError {
    fn from(err: CommerceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self.0 {
            CommerceError::ProductNotFound(_) | CommerceError::CartNotFound(_) => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }
            CommerceError::InsufficientStock { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CommerceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CommerceError::Store(msg) => {
                tracing::error!("Storage failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
