use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::{
    dialogs::Dialogs,
    markup::{el, render_all, Element, Node},
    page::Page,
};

/// In-memory page: an element tree plus the dialogs it raises.
pub struct MemoryPage {
    root: Mutex<Element>,
    dialogs: Arc<dyn Dialogs>,
}

impl MemoryPage {
    pub fn new(root: Element, dialogs: Arc<dyn Dialogs>) -> Self {
        Self {
            root: Mutex::new(root),
            dialogs,
        }
    }

    fn root(&self) -> MutexGuard<'_, Element> {
        self.root.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut root = self.root();
        match root.find_mut(id) {
            Some(element) => Some(f(element)),
            None => {
                warn!(element = id, "page element not found");
                None
            }
        }
    }

    fn read_element<R>(&self, id: &str, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.root().find(id).map(f)
    }

    /// Serialized children of an element.
    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.read_element(id, |element| render_all(element.child_nodes()))
    }

    /// Direct child elements of `id` carrying `class`.
    pub fn child_count_with_class(&self, id: &str, class: &str) -> usize {
        self.read_element(id, |element| {
            element
                .child_nodes()
                .iter()
                .filter_map(Node::as_element)
                .filter(|child| child.has_class(class))
                .count()
        })
        .unwrap_or(0)
    }
}

impl Page for MemoryPage {
    fn value(&self, id: &str) -> Option<String> {
        self.read_element(id, |element| {
            element.get_attr("value").unwrap_or_default().to_string()
        })
    }

    fn set_value(&self, id: &str, value: &str) {
        self.with_element(id, |element| element.set_attr("value", value));
    }

    fn replace_children(&self, id: &str, children: Vec<Node>) {
        self.with_element(id, |element| element.replace_children(children));
    }

    fn set_visible(&self, id: &str, visible: bool) {
        let display = if visible { "block" } else { "none" };
        self.with_element(id, |element| {
            let style = with_display(element.get_attr("style").unwrap_or_default(), display);
            element.set_attr("style", style);
        });
    }

    fn is_visible(&self, id: &str) -> Option<bool> {
        self.read_element(id, |element| {
            display_of(element.get_attr("style").unwrap_or_default()) != Some("none")
        })
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.read_element(id, |element| element.get_attr(name).map(str::to_string))
            .flatten()
    }

    fn text(&self, id: &str) -> Option<String> {
        self.read_element(id, Element::text_content)
    }

    fn set_text(&self, id: &str, text: &str) {
        self.with_element(id, |element| element.set_text(text));
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        self.with_element(id, |element| {
            if disabled {
                element.set_attr("disabled", "disabled");
            } else {
                element.remove_attr("disabled");
            }
        });
    }

    fn is_disabled(&self, id: &str) -> Option<bool> {
        self.read_element(id, |element| element.get_attr("disabled").is_some())
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        let root = self.root();
        let mut found = Vec::new();
        root.find_by_class(class, &mut found);
        found
            .into_iter()
            .filter_map(|element| element.get_attr("id").map(str::to_string))
            .collect()
    }

    fn body_data(&self, key: &str) -> Option<String> {
        self.root()
            .get_attr(&format!("data-{key}"))
            .map(str::to_string)
    }

    fn alert(&self, message: &str) {
        self.dialogs.alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        self.dialogs.confirm(message)
    }
}

fn display_of(style: &str) -> Option<&str> {
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        (name.trim() == "display").then(|| value.trim())
    })
}

fn with_display(style: &str, display: &str) -> String {
    let mut decls: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            decl.split_once(':')
                .map_or(true, |(name, _)| name.trim() != "display")
        })
        .map(str::to_string)
        .collect();
    decls.push(format!("display: {display}"));
    decls.join("; ")
}

/// Skeleton of the admin panel template.
pub fn admin_document() -> Element {
    el("body")
        .child(el("input").id("title").attr("value", ""))
        .child(el("textarea").id("description").attr("value", ""))
        .child(el("div").id("newsList"))
        .child(
            el("div")
                .id("editPopup")
                .attr("style", "display: none")
                .child(el("input").id("editId").attr("type", "hidden").attr("value", ""))
                .child(el("input").id("editTitle").attr("value", ""))
                .child(el("textarea").id("editDescription").attr("value", "")),
        )
}

/// A server-rendered delete-user form as emitted by the manage-users template.
pub fn delete_user_form(form_id: &str, action: &str, user_name: Option<&str>) -> Element {
    let form = el("form")
        .id(form_id)
        .class("delete-user-form")
        .attr("method", "post")
        .attr("action", action);
    let form = match user_name {
        Some(name) => form.attr("data-user-name", name),
        None => form,
    };
    form.child(el("button").attr("type", "submit").text("Delete"))
}

/// Skeleton of the user dashboard template.
pub fn user_document(logged_in: bool) -> Element {
    el("body")
        .attr("data-logged-in", if logged_in { "true" } else { "false" })
        .child(el("input").id("topic").attr("value", ""))
        .child(el("select").id("sort").attr("value", "publishedAt"))
        .child(el("button").id("searchBtn").text("Search"))
        .child(el("div").id("loader").attr("style", "display: none"))
        .child(el("div").id("newsContainer"))
        .child(el("input").id("videoTopic").attr("value", ""))
        .child(el("button").id("videoSearchBtn").text("Search Videos"))
        .child(el("div").id("videoContainer"))
}
