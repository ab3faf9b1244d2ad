use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Details stay in the logs.
    fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Not found",
            AppError::Unprocessable(_) => "Unprocessable Entity",
            AppError::MethodNotAllowed => "Method not allowed",
            AppError::Internal(_) => "Server encountered an error",
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(detail) => tracing::error!(error = %detail, "Request failed"),
            AppError::Unprocessable(detail) => tracing::warn!(error = %detail, "Rejected input"),
            AppError::NotFound(detail) => tracing::debug!(error = %detail, "Not found"),
            AppError::MethodNotAllowed => {}
        }

        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.public_message(),
        }));

        (status, body).into_response()
    }
}
