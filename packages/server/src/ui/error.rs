//! HTTP error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::infrastructure::dto::http::ErrorResponse;
use crate::usecase::{DetectLanguageError, RoomQueryError, TranslateError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Stamp the error with the time it was raised.
    pub fn at(self, timestamp: String) -> ApiFailure {
        ApiFailure {
            error: self,
            timestamp,
        }
    }
}

/// An [`ApiError`] ready to be rendered.
///
/// Built through `AppState::reject` so the body timestamp comes from the
/// application clock.
#[derive(Debug)]
pub struct ApiFailure {
    error: ApiError,
    timestamp: String,
}

impl ApiFailure {
    pub fn error(&self) -> &ApiError {
        &self.error
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self.error);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, self.error);
        }

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.error.to_string(),
            timestamp: self.timestamp,
            available_endpoints: None,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<TranslateError> for ApiError {
    fn from(error: TranslateError) -> Self {
        match error {
            TranslateError::InvalidInput(_) | TranslateError::UnsupportedPair { .. } => {
                Self::BadRequest(error.to_string())
            }
            TranslateError::NotConfigured => Self::ServiceUnavailable(error.to_string()),
            TranslateError::Provider(_) => Self::BadGateway(error.to_string()),
        }
    }
}

impl From<DetectLanguageError> for ApiError {
    fn from(error: DetectLanguageError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<RoomQueryError> for ApiError {
    fn from(error: RoomQueryError) -> Self {
        match error {
            RoomQueryError::InvalidRoomId(_) => Self::BadRequest(error.to_string()),
            RoomQueryError::NotFound(_) => Self::NotFound(error.to_string()),
        }
    }
}
