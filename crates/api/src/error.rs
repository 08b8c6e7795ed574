//! HTTP-facing error type and its status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use db::DbError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body, path or query string failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid or insufficiently privileged token.
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Db(DbError::InvalidInput(_) | DbError::Conflict(_)) => StatusCode::BAD_REQUEST,
            Self::Db(DbError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Db(DbError::Sqlx(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Db(DbError::Sqlx(e)) => {
                error!(error = %e, "store failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({ "error": { "message": message, "status": status.as_u16() } });
        (status, Json(body)).into_response()
    }
}
