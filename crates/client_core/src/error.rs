use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {path}")]
    Status { status: u16, path: String },
    #[error("invalid response body (status {status}): {source}")]
    Decode {
        status: u16,
        source: serde_json::Error,
    },
}

impl ClientError {
    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
