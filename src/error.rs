// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::store::StoreError;

/// Global Application Error Enum.
/// Every handler failure ends up here and is rendered as `{"message": ...}`;
/// rejected bodies add an `errors` field.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request, with per-field details
    InvalidInput {
        message: &'static str,
        errors: serde_json::Value,
    },

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
            AppError::InvalidInput { message, errors } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "errors": errors }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
        };

        (status, Json(body)).into_response()
    }
}

/// Backend failures are never the client's fault.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::InvalidInput {
                    message: "Invalid session data",
                    errors: json!({}),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(StoreError::Poisoned("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn invalid_input_keeps_message_and_details_apart() {
        let err = AppError::InvalidInput {
            message: "Invalid update data",
            errors: json!({ "timeSpent": ["negative_time_spent"] }),
        };
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Invalid update data");
        assert_eq!(body["errors"]["timeSpent"][0], "negative_time_spent");
    }
}
