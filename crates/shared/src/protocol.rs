use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiException};

/// Body of `POST /news/add` and `PUT /news/update/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveArticleRequest {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SaveStatus {
    Success,
    Warning,
    Other(String),
}

impl From<String> for SaveStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            _ => Self::Other(value),
        }
    }
}

impl From<SaveStatus> for String {
    fn from(value: SaveStatus) -> Self {
        match value {
            SaveStatus::Success => "success".to_string(),
            SaveStatus::Warning => "warning".to_string(),
            SaveStatus::Other(s) => s,
        }
    }
}

impl Default for SaveStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveArticleResponse {
    #[serde(default)]
    pub status: SaveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A search endpoint answers with either a result array or an `{error}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchBody<T> {
    Results(Vec<T>),
    Failure(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReply<T> {
    pub status: u16,
    pub body: SearchBody<T>,
}

impl<T> SearchReply<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-side failure carried by the reply, judged by status code.
    pub fn failure(&self) -> Option<ApiException> {
        if self.is_success() {
            return None;
        }
        let message = match &self.body {
            SearchBody::Failure(err) => err.error.clone(),
            SearchBody::Results(_) => format!("request failed with status {}", self.status),
        };
        Some(ApiException::new(self.status, message))
    }
}
