use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::errors::Error;

/// Error returned by every API handler.
///
/// Clients of this API only ever see `400 Bad Request` with the failure text
/// as a plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let ApiError::BadRequest(message) = self;

        (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], message).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::Validation(_) | Error::NotFound(_) => {
                tracing::debug!(error = %err, "Request rejected");
            }
            _ => tracing::warn!(error = %err, "Request failed"),
        }
        ApiError::BadRequest(err.to_string())
    }
}
