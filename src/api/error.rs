//! Request-path error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, error};

use crate::db::{DbError, Id};

/// Errors a handler can end in.
///
/// Only `InvalidQuery` and `NotFound` carry a body; everything else is an
/// opaque 500 with full detail in the server log.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("invalid query {key}")]
    #[diagnostic(code(project_catalog::api::invalid_query))]
    InvalidQuery { key: String, reason: String },

    #[error("project not found")]
    #[diagnostic(code(project_catalog::api::not_found))]
    NotFound { id: Id },

    #[error("storage failure: {0}")]
    #[diagnostic(code(project_catalog::api::storage))]
    Storage(#[from] DbError),

    #[error("response encoding failed: {0}")]
    #[diagnostic(code(project_catalog::api::encode))]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn invalid_query(key: &str, reason: impl Into<String>) -> Self {
        ApiError::InvalidQuery {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::InvalidQuery { key, reason } => {
                debug!(%key, %reason, "Rejected query parameter");
                (status, self.to_string()).into_response()
            }
            ApiError::NotFound { id } => {
                debug!(%id, "Project not found");
                (status, self.to_string()).into_response()
            }
            ApiError::Storage(_) | ApiError::Encode(_) => {
                error!("internal server error: {}", self);
                status.into_response()
            }
        }
    }
}
