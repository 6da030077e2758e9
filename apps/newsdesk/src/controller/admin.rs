//! Admin panel: news CRUD against the news service plus the delete-user
//! confirmation guard.

use shared::{
    domain::{NewsId, NewsItem},
    protocol::NewsDraft,
};
use tracing::{debug, info, warn};

use crate::{
    context::AdminContext,
    controller::{events::FormSubmission, sequence::RegionSequencer},
    ui::{el, Node},
};

pub const LOAD_FAILED: &str = "Failed to load news from server.";
pub const FILL_ALL_FIELDS: &str = "Please fill all fields";
pub const ADDED: &str = "News added successfully!";
pub const ADD_FAILED: &str = "Error adding news!";
pub const DELETED: &str = "News deleted successfully!";
pub const DELETE_FAILED: &str = "Error deleting news!";
pub const UPDATED: &str = "News updated successfully!";
pub const UPDATE_FAILED: &str = "Error updating news!";

const DEFAULT_USER_LABEL: &str = "this user";

pub const DELETE_BUTTON_CLASS: &str = "delete-btn";
pub const EDIT_BUTTON_CLASS: &str = "edit-btn";

pub struct AdminOrchestrator {
    ctx: AdminContext,
    list_sequence: RegionSequencer,
}

impl AdminOrchestrator {
    pub fn new(ctx: AdminContext) -> Self {
        Self {
            ctx,
            list_sequence: RegionSequencer::default(),
        }
    }

    pub fn context(&self) -> &AdminContext {
        &self.ctx
    }

    /// Replaces the list with the server's current collection.
    pub async fn load_news(&self) {
        let page = &self.ctx.page;
        let list = &self.ctx.elements.news_list;
        let ticket = self.list_sequence.issue();

        let result = self.ctx.api.list_news().await;
        if !self.list_sequence.is_current(ticket) {
            debug!(ticket = ticket.get(), "discarding superseded news list response");
            return;
        }

        match result {
            Ok(items) => {
                let cards: Vec<Node> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| news_card(i + 1, item))
                    .collect();
                debug!(count = cards.len(), "rendering news list");
                page.replace_children(list, cards);
            }
            Err(err) => {
                warn!(error = %err, "failed to load news list");
                page.replace_children(list, Vec::new());
                page.alert(LOAD_FAILED);
            }
        }
    }

    pub async fn add_news(&self) {
        let Some(draft) = self.read_draft(&self.ctx.elements.title, &self.ctx.elements.description)
        else {
            return;
        };

        match self.ctx.api.add_news(&draft).await {
            Ok(status) => {
                info!(status, "news add request completed");
                self.ctx.page.alert(ADDED);
                self.load_news().await;
            }
            Err(err) => {
                warn!(error = %err, "news add request failed");
                self.ctx.page.alert(ADD_FAILED);
            }
        }
    }

    pub async fn delete_news(&self, id: &NewsId) {
        match self.ctx.api.delete_news(id).await {
            Ok(status) => {
                info!(%id, status, "news delete request completed");
                self.ctx.page.alert(DELETED);
                self.load_news().await;
            }
            Err(err) => {
                warn!(%id, error = %err, "news delete request failed");
                self.ctx.page.alert(DELETE_FAILED);
            }
        }
    }

    /// Fills the edit form from a listed item and reveals it.
    pub fn edit_news(&self, item: &NewsItem) {
        let page = &self.ctx.page;
        let els = &self.ctx.elements;
        page.set_value(&els.edit_id, &item.id.0);
        page.set_value(&els.edit_title, &item.title);
        page.set_value(&els.edit_description, &item.description);
        page.set_visible(&els.edit_popup, true);
    }

    pub async fn update_news(&self) {
        let els = &self.ctx.elements;
        let id = NewsId(self.ctx.page.value(&els.edit_id).unwrap_or_default());
        let Some(draft) = self.read_draft(&els.edit_title, &els.edit_description) else {
            return;
        };

        match self.ctx.api.update_news(&id, &draft).await {
            Ok(status) => {
                info!(%id, status, "news update request completed");
                self.ctx.page.alert(UPDATED);
                self.ctx.page.set_visible(&els.edit_popup, false);
                self.load_news().await;
            }
            Err(err) => {
                warn!(%id, error = %err, "news update request failed");
                self.ctx.page.alert(UPDATE_FAILED);
            }
        }
    }

    pub fn close_popup(&self) {
        self.ctx
            .page
            .set_visible(&self.ctx.elements.edit_popup, false);
    }

    pub fn delete_user_forms(&self) -> Vec<String> {
        self.ctx
            .page
            .ids_with_class(&self.ctx.elements.delete_user_form_class)
    }

    /// Intercepts a delete-user form submission. The native submission is only
    /// sent after the user confirms.
    pub async fn submit_delete_user_form(&self, form_id: &str) -> FormSubmission {
        let page = &self.ctx.page;
        if !self.delete_user_forms().iter().any(|id| id == form_id) {
            warn!(form = form_id, "not a delete-user form; submission suppressed");
            return FormSubmission::Suppressed;
        }

        let Some(action) = page
            .attribute(form_id, "action")
            .filter(|action| !action.is_empty())
        else {
            warn!(form = form_id, "delete-user form has no action; submission skipped");
            return FormSubmission::Suppressed;
        };

        let name = page
            .attribute(form_id, "data-user-name")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_LABEL.to_string());
        let prompt = format!("Are you sure you want to delete {name}? This cannot be undone.");
        if !page.confirm(&prompt) {
            info!(form = form_id, "delete-user submission declined");
            return FormSubmission::Suppressed;
        }

        match self.ctx.api.submit_form(&action).await {
            Ok(status) => {
                info!(form = form_id, %action, status, "delete-user form submitted");
                FormSubmission::Submitted { status }
            }
            Err(err) => {
                warn!(form = form_id, %action, error = %err, "delete-user form submission failed");
                FormSubmission::Failed
            }
        }
    }

    /// Reads a title/description pair; alerts and yields `None` when either is
    /// empty. Values are not trimmed.
    fn read_draft(&self, title_id: &str, description_id: &str) -> Option<NewsDraft> {
        let page = &self.ctx.page;
        let title = page.value(title_id).unwrap_or_default();
        let description = page.value(description_id).unwrap_or_default();
        if title.is_empty() || description.is_empty() {
            page.alert(FILL_ALL_FIELDS);
            return None;
        }
        Some(NewsDraft { title, description })
    }
}

pub fn delete_button_id(index: usize) -> String {
    format!("{DELETE_BUTTON_CLASS}-{index}")
}

pub fn edit_button_id(index: usize) -> String {
    format!("{EDIT_BUTTON_CLASS}-{index}")
}

fn news_card(index: usize, item: &NewsItem) -> Node {
    el("div")
        .class("news-card")
        .child(el("h3").text(&item.title))
        .child(el("p").text(&item.description))
        .child(
            el("button")
                .id(&delete_button_id(index))
                .class(DELETE_BUTTON_CLASS)
                .attr("data-id", &item.id.0)
                .text("Delete"),
        )
        .child(
            el("button")
                .id(&edit_button_id(index))
                .class(EDIT_BUTTON_CLASS)
                .attr("data-id", &item.id.0)
                .attr("data-title", &item.title)
                .attr("data-description", &item.description)
                .text("Edit"),
        )
        .into()
}

#[cfg(test)]
#[path = "../tests/admin_tests.rs"]
mod tests;
