// src/error.rs
//! HTTP-facing error type. Handlers return `Result<_, ApiError>`; every
//! variant renders as `{"message": ..., "errors": [...]?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Vec<String>,
    },

    #[error("{0}")]
    NotFound(String),

    /// `context` is the public message; `detail` is only logged.
    #[error("{context}: {detail}")]
    Internal {
        context: String,
        detail: anyhow::Error,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl ApiError {
    pub fn invalid_request(errors: Vec<String>) -> Self {
        Self::BadRequest {
            message: "Invalid request data".into(),
            errors,
        }
    }

    pub fn invalid_id() -> Self {
        Self::BadRequest {
            message: "Invalid document ID".into(),
            errors: Vec::new(),
        }
    }

    pub fn internal(context: impl Into<String>, detail: anyhow::Error) -> Self {
        Self::Internal {
            context: context.into(),
            detail,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        metrics::counter!("api_errors_total", "status" => status.as_u16().to_string())
            .increment(1);

        let body = match self {
            Self::BadRequest { message, errors } => ErrorBody { message, errors },
            Self::NotFound(message) => ErrorBody {
                message,
                errors: Vec::new(),
            },
            Self::Internal { context, detail } => {
                warn!(target: "api", error = %detail, "{context}");
                ErrorBody {
                    message: context,
                    errors: Vec::new(),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Extend a storage `Result` with the public message used on failure.
pub trait ResultExt<T> {
    fn or_internal(self, context: &str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for anyhow::Result<T> {
    fn or_internal(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::internal(context, e))
    }
}
