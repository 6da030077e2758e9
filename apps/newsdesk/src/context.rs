//! Dependencies handed to each orchestrator at construction.

use std::{sync::Arc, time::Duration};

use client_core::NewsApi;

use crate::ui::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminElements {
    pub news_list: String,
    pub title: String,
    pub description: String,
    pub edit_id: String,
    pub edit_title: String,
    pub edit_description: String,
    pub edit_popup: String,
    pub delete_user_form_class: String,
}

impl Default for AdminElements {
    fn default() -> Self {
        Self {
            news_list: "newsList".into(),
            title: "title".into(),
            description: "description".into(),
            edit_id: "editId".into(),
            edit_title: "editTitle".into(),
            edit_description: "editDescription".into(),
            edit_popup: "editPopup".into(),
            delete_user_form_class: "delete-user-form".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserElements {
    pub search_button: String,
    pub topic: String,
    pub sort: String,
    pub news_container: String,
    pub loader: String,
    pub video_search_button: String,
    pub video_topic: String,
    pub video_container: String,
    /// Body `data-*` key holding the session flag.
    pub logged_in_flag: String,
}

impl Default for UserElements {
    fn default() -> Self {
        Self {
            search_button: "searchBtn".into(),
            topic: "topic".into(),
            sort: "sort".into(),
            news_container: "newsContainer".into(),
            loader: "loader".into(),
            video_search_button: "videoSearchBtn".into(),
            video_topic: "videoTopic".into(),
            video_container: "videoContainer".into(),
            logged_in_flag: "logged-in".into(),
        }
    }
}

#[derive(Clone)]
pub struct AdminContext {
    pub page: Arc<dyn Page>,
    pub api: Arc<dyn NewsApi>,
    pub elements: AdminElements,
}

impl AdminContext {
    pub fn new(page: Arc<dyn Page>, api: Arc<dyn NewsApi>) -> Self {
        Self {
            page,
            api,
            elements: AdminElements::default(),
        }
    }
}

#[derive(Clone)]
pub struct UserContext {
    pub page: Arc<dyn Page>,
    pub api: Arc<dyn NewsApi>,
    pub elements: UserElements,
    pub save_reset_delay: Duration,
}

impl UserContext {
    pub const DEFAULT_SAVE_RESET_DELAY: Duration = Duration::from_secs(2);

    pub fn new(page: Arc<dyn Page>, api: Arc<dyn NewsApi>) -> Self {
        Self {
            page,
            api,
            elements: UserElements::default(),
            save_reset_delay: Self::DEFAULT_SAVE_RESET_DELAY,
        }
    }

    pub fn with_save_reset_delay(mut self, delay: Duration) -> Self {
        self.save_reset_delay = delay;
        self
    }
}
