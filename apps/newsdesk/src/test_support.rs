//! Scripted `NewsApi` and page fixtures shared by the controller tests.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use async_trait::async_trait;
use client_core::{ClientError, NewsApi};
use shared::{
    domain::{Article, NewsId, NewsItem, SortOrder, Video},
    error::ApiError,
    protocol::{
        NewsDraft, SaveArticleRequest, SaveArticleResponse, SaveStatus, SearchBody, SearchReply,
    },
};

use crate::{
    context::{AdminContext, UserContext},
    controller::{admin::AdminOrchestrator, user::UserOrchestrator},
    ui::{
        document::{admin_document, user_document},
        Element, MemoryPage, RecordingDialogs,
    },
};

/// Answers by input, the way the mock HTTP server in `client_core` does:
///
/// * news topic `climate` is empty, `limited` is rate limited, `offline`
///   never answers, topics starting with `slow` answer after 100ms
/// * video query `broken` carries an error body, `none` is empty
/// * saving the `dup` headline finds it already saved, `bad` is rejected,
///   `lost` never answers, headlines starting with `slow` answer after 20ms
#[derive(Default)]
pub struct FakeNewsApi {
    calls: Mutex<Vec<String>>,
    news: Mutex<Vec<NewsItem>>,
    list_fails: AtomicBool,
    mutations_fail: AtomicBool,
}

impl FakeNewsApi {
    pub fn with_news(items: Vec<NewsItem>) -> Self {
        Self {
            news: Mutex::new(items),
            ..Self::default()
        }
    }

    pub fn fail_list(&self) {
        self.list_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self) {
        self.mutations_fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: String) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn mutation(&self, path: &str, status: u16) -> Result<u16, ClientError> {
        if self.mutations_fail.load(Ordering::SeqCst) {
            return Err(unreachable(path));
        }
        Ok(status)
    }
}

fn unreachable(path: &str) -> ClientError {
    ClientError::Status {
        status: 503,
        path: path.to_string(),
    }
}

pub fn news_item(id: &str, title: &str, description: &str) -> NewsItem {
    NewsItem {
        id: NewsId(id.to_string()),
        title: title.to_string(),
        description: description.to_string(),
    }
}

#[async_trait]
impl NewsApi for FakeNewsApi {
    async fn list_news(&self) -> Result<Vec<NewsItem>, ClientError> {
        self.record("list".into());
        if self.list_fails.load(Ordering::SeqCst) {
            return Err(unreachable("/news/all"));
        }
        Ok(self
            .news
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn add_news(&self, draft: &NewsDraft) -> Result<u16, ClientError> {
        self.record(format!("add:{}|{}", draft.title, draft.description));
        self.mutation("/news/add", 201)
    }

    async fn delete_news(&self, id: &NewsId) -> Result<u16, ClientError> {
        self.record(format!("delete:{id}"));
        self.mutation("/news/delete", 200)
    }

    async fn update_news(&self, id: &NewsId, draft: &NewsDraft) -> Result<u16, ClientError> {
        self.record(format!("update:{id}:{}|{}", draft.title, draft.description));
        self.mutation("/news/update", 200)
    }

    async fn submit_form(&self, action: &str) -> Result<u16, ClientError> {
        self.record(format!("form:{action}"));
        self.mutation(action, 200)
    }

    async fn search_news(
        &self,
        topic: &str,
        sort: SortOrder,
    ) -> Result<SearchReply<Article>, ClientError> {
        self.record(format!("news:{topic}:{sort}"));
        if topic.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(100)).await;
        } else {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        match topic {
            "offline" => Err(unreachable("/api/news")),
            "climate" => Ok(SearchReply {
                status: 200,
                body: SearchBody::Results(Vec::new()),
            }),
            "limited" => Ok(SearchReply {
                status: 429,
                body: SearchBody::Failure(ApiError::new("rate limited")),
            }),
            other => Ok(SearchReply {
                status: 200,
                body: SearchBody::Results(vec![Article {
                    title: format!("{other} headline"),
                    source: "Wire".into(),
                    url: format!("https://news.example/{other}?a=1&b=2"),
                    published_at: "2024-05-01T00:00:00Z".into(),
                }]),
            }),
        }
    }

    async fn search_videos(&self, topic: &str) -> Result<SearchReply<Video>, ClientError> {
        self.record(format!("videos:{topic}"));
        match topic {
            "offline" => Err(unreachable("/api/videos")),
            "broken" => Ok(SearchReply {
                status: 200,
                body: SearchBody::Failure(ApiError::new("quota exceeded")),
            }),
            "none" => Ok(SearchReply {
                status: 200,
                body: SearchBody::Results(Vec::new()),
            }),
            other => Ok(SearchReply {
                status: 200,
                body: SearchBody::Results(vec![Video {
                    title: format!("{other} explained"),
                    channel: "Tube".into(),
                    url: "https://video.example/watch?v=1".into(),
                    thumbnail: "https://img.example/1.jpg".into(),
                }]),
            }),
        }
    }

    async fn save_article(
        &self,
        article: &SaveArticleRequest,
    ) -> Result<SaveArticleResponse, ClientError> {
        self.record(format!("save:{}|{}", article.title, article.url));
        if article.title.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let (status, message) = match article.title.as_str() {
            "lost headline" => return Err(unreachable("/api/save_article")),
            "dup headline" => (SaveStatus::Warning, Some("Already saved".to_string())),
            "bad headline" => (SaveStatus::Other("error".into()), Some("missing url".into())),
            _ => (SaveStatus::Success, None),
        };
        Ok(SaveArticleResponse { status, message })
    }
}

pub struct Fixture<O> {
    pub page: Arc<MemoryPage>,
    pub dialogs: Arc<RecordingDialogs>,
    pub api: Arc<FakeNewsApi>,
    pub orchestrator: O,
}

fn page(root: Element, dialogs: &Arc<RecordingDialogs>) -> Arc<MemoryPage> {
    Arc::new(MemoryPage::new(root, dialogs.clone()))
}

pub fn admin_fixture(
    root: Element,
    api: FakeNewsApi,
    dialogs: RecordingDialogs,
) -> Fixture<AdminOrchestrator> {
    let dialogs = Arc::new(dialogs);
    let page = page(root, &dialogs);
    let api = Arc::new(api);
    let orchestrator = AdminOrchestrator::new(AdminContext::new(page.clone(), api.clone()));
    Fixture {
        page,
        dialogs,
        api,
        orchestrator,
    }
}

pub fn default_admin_fixture(api: FakeNewsApi) -> Fixture<AdminOrchestrator> {
    admin_fixture(admin_document(), api, RecordingDialogs::default())
}

pub fn user_fixture(logged_in: bool) -> Fixture<UserOrchestrator> {
    let dialogs = Arc::new(RecordingDialogs::default());
    let page = page(user_document(logged_in), &dialogs);
    let api = Arc::new(FakeNewsApi::default());
    let orchestrator = UserOrchestrator::new(UserContext::new(page.clone(), api.clone()));
    Fixture {
        page,
        dialogs,
        api,
        orchestrator,
    }
}
