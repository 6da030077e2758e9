use super::*;

use crate::{
    controller::orchestration::{admin_action_for_click, dispatch_admin},
    test_support::{admin_fixture, default_admin_fixture, news_item, FakeNewsApi},
    ui::{
        document::{admin_document, delete_user_form},
        el, Page, RecordingDialogs,
    },
};

fn sample_news() -> Vec<NewsItem> {
    vec![
        news_item("1", "First", "one"),
        news_item("abc", "Second <b>", "two & more"),
    ]
}

#[tokio::test]
async fn load_renders_one_card_per_item_with_edit_payload() {
    let fx = default_admin_fixture(FakeNewsApi::with_news(sample_news()));

    fx.orchestrator.load_news().await;

    assert_eq!(fx.page.child_count_with_class("newsList", "news-card"), 2);
    let html = fx.page.inner_html("newsList").expect("list");
    assert!(html.starts_with(
        "<div class=\"news-card\"><h3>First</h3><p>one</p>\
         <button id=\"delete-btn-1\" class=\"delete-btn\" data-id=\"1\">Delete</button>\
         <button id=\"edit-btn-1\" class=\"edit-btn\" data-id=\"1\" data-title=\"First\" data-description=\"one\">Edit</button></div>"
    ));
    assert!(html.contains("<h3>Second &lt;b&gt;</h3>"));
    assert!(html.contains("data-description=\"two &amp; more\""));
}

#[tokio::test]
async fn clicking_edit_on_a_card_fills_the_popup() {
    let fx = default_admin_fixture(FakeNewsApi::with_news(sample_news()));
    fx.orchestrator.load_news().await;
    assert_eq!(fx.page.ids_with_class(EDIT_BUTTON_CLASS), vec!["edit-btn-1", "edit-btn-2"]);

    let action = admin_action_for_click(&*fx.page, "edit-btn-2").expect("edit action");
    assert_eq!(action.name(), "edit_news");
    dispatch_admin(&fx.orchestrator, action).await;

    assert_eq!(fx.page.is_visible("editPopup"), Some(true));
    assert_eq!(fx.page.value("editId").as_deref(), Some("abc"));
    assert_eq!(fx.page.value("editTitle").as_deref(), Some("Second <b>"));
    assert_eq!(fx.page.value("editDescription").as_deref(), Some("two & more"));
}

#[tokio::test]
async fn clicking_delete_on_a_card_deletes_that_item() {
    let fx = default_admin_fixture(FakeNewsApi::with_news(sample_news()));
    fx.orchestrator.load_news().await;

    let action = admin_action_for_click(&*fx.page, "delete-btn-1").expect("delete action");
    dispatch_admin(&fx.orchestrator, action).await;

    assert_eq!(fx.api.calls(), vec!["list", "delete:1", "list"]);
    assert_eq!(fx.dialogs.alerts(), vec![DELETED.to_string()]);
    assert!(admin_action_for_click(&*fx.page, "newsList").is_none());
    assert!(admin_action_for_click(&*fx.page, "missing").is_none());
}

#[tokio::test]
async fn reloading_replaces_instead_of_appending() {
    let fx = default_admin_fixture(FakeNewsApi::with_news(sample_news()));

    fx.orchestrator.load_news().await;
    let first = fx.page.inner_html("newsList");
    fx.orchestrator.load_news().await;

    assert_eq!(fx.page.inner_html("newsList"), first);
    assert_eq!(fx.page.child_count_with_class("newsList", "news-card"), 2);
}

#[tokio::test]
async fn failed_load_clears_list_and_alerts() {
    let fx = default_admin_fixture(FakeNewsApi::with_news(sample_news()));
    fx.orchestrator.load_news().await;

    fx.api.fail_list();
    fx.orchestrator.load_news().await;

    assert_eq!(fx.page.inner_html("newsList").as_deref(), Some(""));
    assert_eq!(fx.dialogs.alerts(), vec![LOAD_FAILED.to_string()]);
}

#[tokio::test]
async fn add_with_empty_field_sends_nothing() {
    let fx = default_admin_fixture(FakeNewsApi::default());
    fx.page.set_value("title", "Headline");

    fx.orchestrator.add_news().await;

    assert!(fx.api.calls().is_empty());
    assert_eq!(fx.dialogs.alerts(), vec![FILL_ALL_FIELDS.to_string()]);
}

#[tokio::test]
async fn whitespace_counts_as_filled() {
    let fx = default_admin_fixture(FakeNewsApi::default());
    fx.page.set_value("title", " ");
    fx.page.set_value("description", " ");

    fx.orchestrator.add_news().await;

    assert_eq!(fx.api.calls(), vec!["add: | ", "list"]);
}

#[tokio::test]
async fn add_alerts_then_reloads() {
    let fx = default_admin_fixture(FakeNewsApi::with_news(sample_news()));
    fx.page.set_value("title", "Headline");
    fx.page.set_value("description", "Body");

    fx.orchestrator.add_news().await;

    assert_eq!(fx.api.calls(), vec!["add:Headline|Body", "list"]);
    assert_eq!(fx.dialogs.alerts(), vec![ADDED.to_string()]);
    assert_eq!(fx.page.child_count_with_class("newsList", "news-card"), 2);
}

#[tokio::test]
async fn unreachable_mutations_alert_without_reloading() {
    let fx = default_admin_fixture(FakeNewsApi::default());
    fx.api.fail_mutations();
    fx.page.set_value("title", "Headline");
    fx.page.set_value("description", "Body");

    fx.orchestrator.add_news().await;
    fx.orchestrator.delete_news(&NewsId("9".into())).await;

    assert_eq!(fx.api.calls(), vec!["add:Headline|Body", "delete:9"]);
    assert_eq!(
        fx.dialogs.alerts(),
        vec![ADD_FAILED.to_string(), DELETE_FAILED.to_string()]
    );
}

#[tokio::test]
async fn delete_alerts_then_reloads() {
    let fx = default_admin_fixture(FakeNewsApi::default());

    fx.orchestrator.delete_news(&NewsId("abc".into())).await;

    assert_eq!(fx.api.calls(), vec!["delete:abc", "list"]);
    assert_eq!(fx.dialogs.alerts(), vec![DELETED.to_string()]);
}

#[tokio::test]
async fn edit_fills_popup_and_update_hides_it() {
    let fx = default_admin_fixture(FakeNewsApi::default());
    assert_eq!(fx.page.is_visible("editPopup"), Some(false));

    fx.orchestrator.edit_news(&news_item("7", "Old", "text"));
    assert_eq!(fx.page.is_visible("editPopup"), Some(true));
    assert_eq!(fx.page.value("editId").as_deref(), Some("7"));
    assert_eq!(fx.page.value("editTitle").as_deref(), Some("Old"));
    assert_eq!(fx.page.value("editDescription").as_deref(), Some("text"));

    fx.page.set_value("editTitle", "New");
    fx.orchestrator.update_news().await;

    assert_eq!(fx.api.calls(), vec!["update:7:New|text", "list"]);
    assert_eq!(fx.dialogs.alerts(), vec![UPDATED.to_string()]);
    assert_eq!(fx.page.is_visible("editPopup"), Some(false));
}

#[tokio::test]
async fn update_with_empty_field_keeps_popup_open() {
    let fx = default_admin_fixture(FakeNewsApi::default());
    fx.orchestrator.edit_news(&news_item("7", "Old", "text"));
    fx.page.set_value("editDescription", "");

    fx.orchestrator.update_news().await;

    assert!(fx.api.calls().is_empty());
    assert_eq!(fx.dialogs.alerts(), vec![FILL_ALL_FIELDS.to_string()]);
    assert_eq!(fx.page.is_visible("editPopup"), Some(true));
}

#[tokio::test]
async fn close_popup_only_hides() {
    let fx = default_admin_fixture(FakeNewsApi::default());
    fx.orchestrator.edit_news(&news_item("7", "Old", "text"));

    fx.orchestrator.close_popup();
    fx.orchestrator.close_popup();

    assert_eq!(fx.page.is_visible("editPopup"), Some(false));
    assert!(fx.api.calls().is_empty());
}

fn users_page() -> crate::ui::Element {
    admin_document()
        .child(delete_user_form("del-3", "/admin/delete_user/3", Some("ana")))
        .child(delete_user_form("del-4", "/admin/delete_user/4", None))
}

#[tokio::test]
async fn declined_confirmation_suppresses_submission() {
    let fx = admin_fixture(
        users_page(),
        FakeNewsApi::default(),
        RecordingDialogs::answering([false]),
    );

    let outcome = fx.orchestrator.submit_delete_user_form("del-3").await;

    assert_eq!(outcome, FormSubmission::Suppressed);
    assert!(fx.api.calls().is_empty());
    assert_eq!(
        fx.dialogs.confirmations(),
        vec!["Are you sure you want to delete ana? This cannot be undone.".to_string()]
    );
}

#[tokio::test]
async fn confirmed_submission_posts_to_form_action() {
    let fx = admin_fixture(
        users_page(),
        FakeNewsApi::default(),
        RecordingDialogs::answering([true]),
    );

    let outcome = fx.orchestrator.submit_delete_user_form("del-4").await;

    assert_eq!(outcome, FormSubmission::Submitted { status: 200 });
    assert_eq!(fx.api.calls(), vec!["form:/admin/delete_user/4"]);
    assert_eq!(
        fx.dialogs.confirmations(),
        vec!["Are you sure you want to delete this user? This cannot be undone.".to_string()]
    );
}

#[tokio::test]
async fn each_form_is_guarded_independently() {
    let fx = admin_fixture(
        users_page(),
        FakeNewsApi::default(),
        RecordingDialogs::answering([false, true]),
    );
    assert_eq!(fx.orchestrator.delete_user_forms(), vec!["del-3", "del-4"]);

    let first = fx.orchestrator.submit_delete_user_form("del-3").await;
    let second = fx.orchestrator.submit_delete_user_form("del-4").await;

    assert_eq!(first, FormSubmission::Suppressed);
    assert_eq!(second, FormSubmission::Submitted { status: 200 });
    assert_eq!(fx.api.calls(), vec!["form:/admin/delete_user/4"]);
}

#[tokio::test]
async fn unreachable_form_submission_reports_failure() {
    let api = FakeNewsApi::default();
    api.fail_mutations();
    let fx = admin_fixture(users_page(), api, RecordingDialogs::answering([true]));

    let outcome = fx.orchestrator.submit_delete_user_form("del-3").await;

    assert_eq!(outcome, FormSubmission::Failed);
    assert_eq!(fx.api.calls(), vec!["form:/admin/delete_user/3"]);
    assert!(fx.dialogs.alerts().is_empty());
}

#[tokio::test]
async fn form_without_action_is_skipped_before_confirming() {
    let root = admin_document().child(
        el("form")
            .id("del-5")
            .class("delete-user-form")
            .attr("data-user-name", "bo"),
    );
    let fx = admin_fixture(root, FakeNewsApi::default(), RecordingDialogs::answering([true]));

    let outcome = fx.orchestrator.submit_delete_user_form("del-5").await;

    assert_eq!(outcome, FormSubmission::Suppressed);
    assert!(fx.dialogs.confirmations().is_empty());
    assert!(fx.api.calls().is_empty());
}

#[tokio::test]
async fn non_guarded_form_is_never_confirmed() {
    let fx = admin_fixture(
        users_page(),
        FakeNewsApi::default(),
        RecordingDialogs::answering([true]),
    );

    let outcome = fx.orchestrator.submit_delete_user_form("newsList").await;

    assert_eq!(outcome, FormSubmission::Suppressed);
    assert!(fx.dialogs.confirmations().is_empty());
    assert!(fx.api.calls().is_empty());
}
