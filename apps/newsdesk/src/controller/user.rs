//! User dashboard: news and video search plus saving articles.

use std::sync::Arc;

use shared::{
    domain::{Article, SortOrder, Video},
    protocol::SearchBody,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    context::UserContext,
    controller::{
        events::ENTER_KEY,
        save_button::{
            decode_payload, encode_attr, SaveButtonState, SaveOutcome, DATA_PUBLISHED_AT,
            DATA_SOURCE, DATA_TITLE, DATA_URL,
        },
        sequence::{RegionSequencer, Ticket},
    },
    ui::{el, Node, Page},
};

pub const LOGIN_FOR_NEWS: &str = "Please login to search for news.";
pub const ENTER_TOPIC: &str = "Please enter a topic.";
pub const NO_ARTICLES: &str = "No articles found for that topic.";
pub const LOGIN_FOR_VIDEOS: &str = "Please login to search for videos.";
pub const ENTER_VIDEO_KEYWORD: &str = "Enter a video search keyword.";
pub const LOADING_VIDEOS: &str = "Loading videos...";
pub const NO_VIDEOS: &str = "No videos found.";
pub const VIDEOS_FAILED: &str = "Error loading videos.";
pub const SAVE_NETWORK_ERROR: &str = "Network error while saving.";

pub const SAVE_BUTTON_CLASS: &str = "save-btn";

pub struct UserOrchestrator {
    ctx: UserContext,
    news_sequence: RegionSequencer,
    video_sequence: RegionSequencer,
}

impl UserOrchestrator {
    pub fn new(ctx: UserContext) -> Self {
        Self {
            ctx,
            news_sequence: RegionSequencer::default(),
            video_sequence: RegionSequencer::default(),
        }
    }

    pub fn context(&self) -> &UserContext {
        &self.ctx
    }

    /// Session flag, read fresh from the page on every call.
    pub fn is_logged_in(&self) -> bool {
        self.ctx
            .page
            .body_data(&self.ctx.elements.logged_in_flag)
            .as_deref()
            == Some("true")
    }

    pub async fn search_news(&self) {
        let page = &self.ctx.page;
        let els = &self.ctx.elements;
        let topic = page.value(&els.topic).unwrap_or_default().trim().to_string();
        let selected_sort = page.value(&els.sort).unwrap_or_default();

        if !self.is_logged_in() {
            page.alert(LOGIN_FOR_NEWS);
            return;
        }
        if topic.is_empty() {
            page.alert(ENTER_TOPIC);
            return;
        }

        let sort = selected_sort.parse::<SortOrder>().unwrap_or_else(|err| {
            debug!(error = %err, "using default sort order");
            SortOrder::default()
        });

        page.set_visible(&els.loader, true);
        page.replace_children(&els.news_container, Vec::new());

        let ticket = self.news_sequence.issue();
        let result = self.ctx.api.search_news(&topic, sort).await;
        if !self.news_sequence.is_current(ticket) {
            debug!(ticket = ticket.get(), %topic, "discarding superseded news search response");
            return;
        }
        page.set_visible(&els.loader, false);

        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, %topic, "news search failed");
                page.replace_children(&els.news_container, vec![news_error(&err.to_string())]);
                return;
            }
        };

        if let Some(failure) = reply.failure() {
            warn!(status = failure.status, message = %failure.message, "news search rejected");
            page.replace_children(&els.news_container, vec![news_error(&failure.message)]);
            return;
        }

        let articles = match reply.body {
            SearchBody::Results(articles) => articles,
            SearchBody::Failure(err) => {
                warn!(message = %err.error, "news search returned an error body");
                page.replace_children(&els.news_container, vec![news_error(&err.error)]);
                return;
            }
        };

        if articles.is_empty() {
            page.replace_children(
                &els.news_container,
                vec![el("p").class("card").text(NO_ARTICLES).into()],
            );
            return;
        }

        info!(count = articles.len(), %topic, "rendering news results");
        let cards = articles
            .iter()
            .enumerate()
            .map(|(i, article)| article_card(ticket, i + 1, article))
            .collect();
        page.replace_children(&els.news_container, cards);
    }

    pub async fn on_topic_key(&self, key: &str) {
        if key == ENTER_KEY {
            self.search_news().await;
        }
    }

    pub async fn search_videos(&self) {
        let page = &self.ctx.page;
        let els = &self.ctx.elements;
        let query = page
            .value(&els.video_topic)
            .unwrap_or_default()
            .trim()
            .to_string();

        if !self.is_logged_in() {
            page.alert(LOGIN_FOR_VIDEOS);
            return;
        }
        if query.is_empty() {
            page.alert(ENTER_VIDEO_KEYWORD);
            return;
        }

        page.replace_children(
            &els.video_container,
            vec![el("p").text(LOADING_VIDEOS).into()],
        );

        let ticket = self.video_sequence.issue();
        let result = self.ctx.api.search_videos(&query).await;
        if !self.video_sequence.is_current(ticket) {
            debug!(ticket = ticket.get(), %query, "discarding superseded video search response");
            return;
        }

        // Only the body decides here; the status code is not consulted.
        let rendered: Vec<Node> = match result.map(|reply| reply.body) {
            Err(err) => {
                warn!(error = %err, %query, "video search failed");
                vec![video_error(VIDEOS_FAILED)]
            }
            Ok(SearchBody::Failure(err)) => vec![video_error(&err.error)],
            Ok(SearchBody::Results(videos)) if videos.is_empty() => {
                vec![el("p").text(NO_VIDEOS).into()]
            }
            Ok(SearchBody::Results(videos)) => {
                info!(count = videos.len(), %query, "rendering video results");
                videos.iter().map(video_card).collect()
            }
        };
        page.replace_children(&els.video_container, rendered);
    }

    pub async fn on_video_topic_key(&self, key: &str) {
        if key == ENTER_KEY {
            self.search_videos().await;
        }
    }

    /// Saves the article embedded in a rendered save button.
    ///
    /// Returns the reset timer, which re-enables the button after the
    /// configured delay; `None` if the click was ignored.
    pub async fn save_article(&self, button_id: &str) -> Option<JoinHandle<()>> {
        let page = Arc::clone(&self.ctx.page);
        match page.is_disabled(button_id) {
            None => {
                warn!(button = button_id, "save button not found");
                return None;
            }
            Some(true) => {
                debug!(button = button_id, "ignoring click on disabled save button");
                return None;
            }
            Some(false) => {}
        }

        let payload = decode_payload(|name| page.attribute(button_id, name));
        // An enabled button shows either the idle or the sticky saved label.
        let current = page.text(button_id).unwrap_or_default();
        let state = SaveButtonState::settle_from_label(&current).begin();
        apply_state(page.as_ref(), button_id, state);

        let result = self.ctx.api.save_article(&payload).await;
        let outcome = SaveOutcome::from_result(&result);
        let state = state.resolve(&outcome);
        apply_state(page.as_ref(), button_id, state);

        match (&outcome, &result) {
            (SaveOutcome::Rejected { message }, _) => {
                warn!(button = button_id, %message, "article save rejected");
                page.alert(&format!("Error: {message}"));
            }
            (SaveOutcome::Unreachable, Err(err)) => {
                warn!(button = button_id, error = %err, "article save request failed");
                page.alert(SAVE_NETWORK_ERROR);
            }
            _ => info!(button = button_id, label = state.label(), "article save completed"),
        }

        let delay = self.ctx.save_reset_delay;
        let button_id = button_id.to_string();
        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let current = page.text(&button_id).unwrap_or_default();
            let settled = SaveButtonState::settle_from_label(&current);
            apply_state(page.as_ref(), &button_id, settled);
            debug!(button = %button_id, label = settled.label(), "save button reset");
        }))
    }
}

fn apply_state(page: &dyn Page, button_id: &str, state: SaveButtonState) {
    page.set_disabled(button_id, state.is_disabled());
    page.set_text(button_id, state.label());
}

pub fn save_button_id(ticket: Ticket, index: usize) -> String {
    format!("{SAVE_BUTTON_CLASS}-{}-{index}", ticket.get())
}

fn news_error(message: &str) -> Node {
    el("p")
        .class("card")
        .attr("style", "color: red;")
        .text(format!("Error: {message}"))
        .into()
}

fn video_error(message: &str) -> Node {
    el("p").attr("style", "color:red;").text(message).into()
}

fn article_card(ticket: Ticket, index: usize, article: &Article) -> Node {
    let save = el("button")
        .id(&save_button_id(ticket, index))
        .class(SAVE_BUTTON_CLASS)
        .attr(DATA_TITLE, encode_attr(&article.title))
        .attr(DATA_URL, encode_attr(&article.url))
        .attr(DATA_SOURCE, encode_attr(&article.source))
        .attr(DATA_PUBLISHED_AT, &article.published_at)
        .text(SaveButtonState::Idle.label());

    el("div")
        .class("news-item card")
        .child(
            el("div")
                .child(el("h3").text(format!("{index}. {}", article.title)))
                .child(el("p").text(format!("Source: {}", article.source))),
        )
        .child(
            el("div")
                .attr("style", "display: flex; align-items: center; gap: 10px;")
                .child(save)
                .child(
                    el("a")
                        .attr("href", &article.url)
                        .attr("target", "_blank")
                        .text("Read →"),
                ),
        )
        .into()
}

fn video_card(video: &Video) -> Node {
    el("div")
        .class("card")
        .child(el("img").attr("src", &video.thumbnail).class("thumb"))
        .child(el("h3").text(&video.title))
        .child(el("p").text(&video.channel))
        .child(
            el("a")
                .attr("href", &video.url)
                .attr("target", "_blank")
                .class("btn")
                .text("Watch Video"),
        )
        .into()
}

#[cfg(test)]
#[path = "../tests/user_tests.rs"]
mod tests;
