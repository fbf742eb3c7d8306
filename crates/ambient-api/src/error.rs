//! Error types for the directory API layer.
//!
//! [`ApiError`] unifies directory failures and request-validation
//! failures into a single enum that converts into an Axum HTTP response
//! via its [`IntoResponse`](axum::response::IntoResponse) implementation.

use ambient_core::{DirectoryError, ErrorKind};
use ambient_types::ErrorBody;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the directory API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// A query parameter was missing or malformed.
    #[error("{0}")]
    InvalidQuery(String),

    /// A path segment could not be parsed.
    #[error("{0}")]
    InvalidPath(String),

    /// The request body was missing, malformed, or failed validation.
    #[error("{0}")]
    InvalidBody(String),

    /// No route matches the request path.
    #[error("Not Found: {0}")]
    RouteNotFound(String),

    /// The path is routed but not for this method.
    #[error("Method Not Allowed: {0}")]
    MethodNotAllowed(String),
}

impl ApiError {
    /// HTTP status code for this error.
    ///
    /// Duplicate stream names are reported as `400`, which is what the
    /// web client expects for a conflicting add.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Directory(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::BAD_REQUEST,
                ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidQuery(_) | Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidBody(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %detail, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), %detail, "request rejected");
        }

        let body = ErrorBody {
            detail,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}
