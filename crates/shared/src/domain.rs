use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned news identifier. The admin service may send it as a number
/// or a string; it is only ever echoed back in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct NewsId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for NewsId {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<NewsId> for String {
    fn from(value: NewsId) -> Self {
        value.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub channel: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    PublishedAt,
    Relevancy,
    Popularity,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PublishedAt => "publishedAt",
            Self::Relevancy => "relevancy",
            Self::Popularity => "popularity",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publishedAt" => Ok(Self::PublishedAt),
            "relevancy" => Ok(Self::Relevancy),
            "popularity" => Ok(Self::Popularity),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

/// Upstream search results forward `null` for missing fields.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
