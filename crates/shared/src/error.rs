use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{"error": "..."}` body sent by the site API on failed searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("server responded {status}: {message}")]
pub struct ApiException {
    pub status: u16,
    pub message: String,
}

impl ApiException {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
