//! Error types for argentbank-api

use argentbank_core::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotAuthenticated | CoreError::SessionExpired => ApiError::Unauthorized {
                message: error.to_string(),
            },
            CoreError::Unauthorized { message } => ApiError::Unauthorized { message },
            CoreError::ValidationError { message } => ApiError::BadRequest { message },
            CoreError::InvalidFormat { .. }
            | CoreError::BackendError { .. }
            | CoreError::InternalError { .. } => {
                log::error!(target: "argentbank::api", "request failed: {}", error);
                ApiError::InternalError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
            }
        });
        let payload = serde_json::to_string(&body).unwrap_or_default();
        (self.status(), payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_status_mapping() {
        let api: ApiError = CoreError::NotAuthenticated.into();
        assert_eq!(api.status(), StatusCode::UNAUTHORIZED);

        let api: ApiError = CoreError::SessionExpired.into();
        assert_eq!(api.status(), StatusCode::UNAUTHORIZED);

        let api: ApiError = CoreError::ValidationError {
            message: "bad email".to_string(),
        }
        .into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);

        let api: ApiError = CoreError::BackendError {
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unauthorized_keeps_canned_message() {
        let api: ApiError = CoreError::Unauthorized {
            message: "Incorrect password. Please try again.".to_string(),
        }
        .into();
        assert_eq!(api.to_string(), "Incorrect password. Please try again.");
    }
}
