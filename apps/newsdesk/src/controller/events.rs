//! User actions the two pages react to.

use shared::domain::{NewsId, NewsItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    PageLoaded,
    AddNews,
    DeleteNews(NewsId),
    EditNews(NewsItem),
    UpdateNews,
    ClosePopup,
    SubmitDeleteUserForm { form_id: String },
}

impl AdminAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PageLoaded => "page_loaded",
            Self::AddNews => "add_news",
            Self::DeleteNews(_) => "delete_news",
            Self::EditNews(_) => "edit_news",
            Self::UpdateNews => "update_news",
            Self::ClosePopup => "close_popup",
            Self::SubmitDeleteUserForm { .. } => "submit_delete_user_form",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SearchNews,
    TopicKeyUp { key: String },
    SearchVideos,
    VideoTopicKeyUp { key: String },
    SaveArticle { button_id: String },
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchNews => "search_news",
            Self::TopicKeyUp { .. } => "topic_key_up",
            Self::SearchVideos => "search_videos",
            Self::VideoTopicKeyUp { .. } => "video_topic_key_up",
            Self::SaveArticle { .. } => "save_article",
        }
    }
}

pub const ENTER_KEY: &str = "Enter";

/// Outcome of the delete-user form intercept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// Confirmed; the native submission was sent and answered with `status`.
    Submitted { status: u16 },
    /// Confirmed, but the submission never got a response.
    Failed,
    /// Declined, not a delete-user form, or the form has no `action`;
    /// nothing left the page.
    Suppressed,
}
