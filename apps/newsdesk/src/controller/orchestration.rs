//! Routes page actions to the orchestrator that owns them.

use shared::domain::{NewsId, NewsItem};
use tokio::task::JoinHandle;

use crate::{
    context::UserElements,
    controller::{
        admin::{AdminOrchestrator, DELETE_BUTTON_CLASS, EDIT_BUTTON_CLASS},
        events::{AdminAction, FormSubmission, UserAction},
        user::{UserOrchestrator, SAVE_BUTTON_CLASS},
    },
    ui::Page,
};

/// What a dispatched action left running or reported back.
#[derive(Debug)]
pub enum Dispatched {
    Done,
    Form(FormSubmission),
    /// Pending save-button reset.
    SaveTimer(JoinHandle<()>),
}

pub async fn dispatch_admin(admin: &AdminOrchestrator, action: AdminAction) -> Dispatched {
    tracing::debug!(action = action.name(), "dispatching admin action");
    match action {
        AdminAction::PageLoaded => admin.load_news().await,
        AdminAction::AddNews => admin.add_news().await,
        AdminAction::DeleteNews(id) => admin.delete_news(&id).await,
        AdminAction::EditNews(item) => admin.edit_news(&item),
        AdminAction::UpdateNews => admin.update_news().await,
        AdminAction::ClosePopup => admin.close_popup(),
        AdminAction::SubmitDeleteUserForm { form_id } => {
            return Dispatched::Form(admin.submit_delete_user_form(&form_id).await);
        }
    }
    Dispatched::Done
}

pub async fn dispatch_user(user: &UserOrchestrator, action: UserAction) -> Dispatched {
    tracing::debug!(action = action.name(), "dispatching user action");
    match action {
        UserAction::SearchNews => user.search_news().await,
        UserAction::TopicKeyUp { key } => user.on_topic_key(&key).await,
        UserAction::SearchVideos => user.search_videos().await,
        UserAction::VideoTopicKeyUp { key } => user.on_video_topic_key(&key).await,
        UserAction::SaveArticle { button_id } => {
            if let Some(timer) = user.save_article(&button_id).await {
                return Dispatched::SaveTimer(timer);
            }
        }
    }
    Dispatched::Done
}

/// Maps a click on a news card button to its action, rebuilding the item from
/// the button's data attributes.
pub fn admin_action_for_click(page: &dyn Page, element_id: &str) -> Option<AdminAction> {
    let classes = page.attribute(element_id, "class")?;
    let has_class = |class: &str| classes.split_whitespace().any(|c| c == class);
    let id = NewsId(page.attribute(element_id, "data-id")?);
    let data = |name: &str| page.attribute(element_id, name).unwrap_or_default();

    if has_class(DELETE_BUTTON_CLASS) {
        Some(AdminAction::DeleteNews(id))
    } else if has_class(EDIT_BUTTON_CLASS) {
        Some(AdminAction::EditNews(NewsItem {
            id,
            title: data("data-title"),
            description: data("data-description"),
        }))
    } else {
        None
    }
}

/// Maps a click on the user page to its action, if the element has one.
pub fn user_action_for_click(elements: &UserElements, element_id: &str) -> Option<UserAction> {
    if element_id == elements.search_button {
        Some(UserAction::SearchNews)
    } else if element_id == elements.video_search_button {
        Some(UserAction::SearchVideos)
    } else if element_id.starts_with(&format!("{SAVE_BUTTON_CLASS}-")) {
        Some(UserAction::SaveArticle {
            button_id: element_id.to_string(),
        })
    } else {
        None
    }
}
