//! Error types for argentbank-client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Backend returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response shape: {detail}")]
    Schema { detail: String },

    #[error("Network error")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// True for errors the backend attributes to the request itself
    /// (bad credentials, bad parameters), as opposed to transport trouble.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::Validation { .. } | ClientError::Http { status: 400..=499, .. }
        )
    }
}
