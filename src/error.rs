use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] JsonRejection),

    #[error("Todo body cannot be empty")]
    EmptyBody,

    #[error("Invalid ID")]
    InvalidId,

    #[error("Todo not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Json(rejection) => {
                debug!("rejected request body: {}", rejection.body_text());
                (rejection.status(), rejection.body_text())
            }
            AppError::EmptyBody | AppError::InvalidId => {
                debug!("bad request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Store(e) => {
                error!("store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
