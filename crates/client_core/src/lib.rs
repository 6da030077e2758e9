use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Article, NewsId, NewsItem, SortOrder, Video},
    protocol::{NewsDraft, SaveArticleRequest, SaveArticleResponse, SearchBody, SearchReply},
};
use tracing::{debug, warn};
use url::Url;

pub mod error;
pub use error::ClientError;

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP surface consumed by the admin and user pages.
///
/// Mutations report the response status rather than failing on it: only a
/// missing response counts as an error for them.
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn list_news(&self) -> Result<Vec<NewsItem>, ClientError>;
    async fn add_news(&self, draft: &NewsDraft) -> Result<u16, ClientError>;
    async fn delete_news(&self, id: &NewsId) -> Result<u16, ClientError>;
    async fn update_news(&self, id: &NewsId, draft: &NewsDraft) -> Result<u16, ClientError>;
    /// Native submission of a server-rendered form, posted to its `action`.
    async fn submit_form(&self, action: &str) -> Result<u16, ClientError>;
    async fn search_news(
        &self,
        topic: &str,
        sort: SortOrder,
    ) -> Result<SearchReply<Article>, ClientError>;
    async fn search_videos(&self, topic: &str) -> Result<SearchReply<Video>, ClientError>;
    async fn save_article(
        &self,
        article: &SaveArticleRequest,
    ) -> Result<SaveArticleResponse, ClientError>;
}

pub struct HttpNewsApi {
    http: Client,
    admin_base_url: String,
    api_base_url: String,
}

impl HttpNewsApi {
    /// `admin_base_url` serves `/news/*`; `api_base_url` serves `/api/*` and
    /// the server-rendered admin forms.
    pub fn new(admin_base_url: &str, api_base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), admin_base_url, api_base_url)
    }

    pub fn with_client(
        http: Client,
        admin_base_url: &str,
        api_base_url: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            admin_base_url: normalize_base_url(admin_base_url)?,
            api_base_url: normalize_base_url(api_base_url)?,
        })
    }

    pub fn admin_base_url(&self) -> &str {
        &self.admin_base_url
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_base_url)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(trimmed.to_string())
}

fn encode_segment(id: &NewsId) -> String {
    utf8_percent_encode(&id.0, PATH_SEGMENT).to_string()
}

async fn decode_body<T: DeserializeOwned>(res: Response) -> Result<(u16, T), ClientError> {
    let status = res.status().as_u16();
    let bytes = res.bytes().await?;
    let body =
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { status, source })?;
    Ok((status, body))
}

fn log_mutation_status(operation: &str, status: u16) {
    if (200..300).contains(&status) {
        debug!(operation, status, "mutation completed");
    } else {
        warn!(operation, status, "mutation answered with non-success status");
    }
}

#[async_trait]
impl NewsApi for HttpNewsApi {
    async fn list_news(&self) -> Result<Vec<NewsItem>, ClientError> {
        let path = "/news/all";
        let res = self.http.get(self.admin_url(path)).send().await?;
        if !res.status().is_success() {
            return Err(ClientError::Status {
                status: res.status().as_u16(),
                path: path.to_string(),
            });
        }
        let (_, items) = decode_body(res).await?;
        Ok(items)
    }

    async fn add_news(&self, draft: &NewsDraft) -> Result<u16, ClientError> {
        let status = self
            .http
            .post(self.admin_url("/news/add"))
            .json(draft)
            .send()
            .await?
            .status()
            .as_u16();
        log_mutation_status("add_news", status);
        Ok(status)
    }

    async fn delete_news(&self, id: &NewsId) -> Result<u16, ClientError> {
        let status = self
            .http
            .delete(self.admin_url(&format!("/news/delete/{}", encode_segment(id))))
            .send()
            .await?
            .status()
            .as_u16();
        log_mutation_status("delete_news", status);
        Ok(status)
    }

    async fn update_news(&self, id: &NewsId, draft: &NewsDraft) -> Result<u16, ClientError> {
        let status = self
            .http
            .put(self.admin_url(&format!("/news/update/{}", encode_segment(id))))
            .json(draft)
            .send()
            .await?
            .status()
            .as_u16();
        log_mutation_status("update_news", status);
        Ok(status)
    }

    async fn submit_form(&self, action: &str) -> Result<u16, ClientError> {
        let target = if action.starts_with("http://") || action.starts_with("https://") {
            action.to_string()
        } else {
            self.api_url(action)
        };
        let status = self
            .http
            .post(target)
            .send()
            .await?
            .status()
            .as_u16();
        log_mutation_status("submit_form", status);
        Ok(status)
    }

    async fn search_news(
        &self,
        topic: &str,
        sort: SortOrder,
    ) -> Result<SearchReply<Article>, ClientError> {
        debug!(topic, sort = sort.as_str(), "searching news");
        let res = self
            .http
            .get(self.api_url("/api/news"))
            .query(&[("topic", topic), ("sort", sort.as_str())])
            .send()
            .await?;
        let (status, body): (u16, SearchBody<Article>) = decode_body(res).await?;
        Ok(SearchReply { status, body })
    }

    async fn search_videos(&self, topic: &str) -> Result<SearchReply<Video>, ClientError> {
        debug!(topic, "searching videos");
        let res = self
            .http
            .get(self.api_url("/api/videos"))
            .query(&[("topic", topic)])
            .send()
            .await?;
        let (status, body): (u16, SearchBody<Video>) = decode_body(res).await?;
        Ok(SearchReply { status, body })
    }

    async fn save_article(
        &self,
        article: &SaveArticleRequest,
    ) -> Result<SaveArticleResponse, ClientError> {
        let res = self
            .http
            .post(self.api_url("/api/save_article"))
            .json(article)
            .send()
            .await?;
        let (status, body): (u16, SaveArticleResponse) = decode_body(res).await?;
        debug!(status, "save_article answered");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
