use super::markup::Node;

/// Element-level operations the orchestrators perform on a page.
///
/// Writes to a missing element are ignored, reads return `None`; the page
/// markup is owned by the server templates, not by this layer.
pub trait Page: Send + Sync {
    /// Current value of a form control (`input`, `textarea`, `select`).
    fn value(&self, id: &str) -> Option<String>;
    fn set_value(&self, id: &str, value: &str);

    fn replace_children(&self, id: &str, children: Vec<Node>);

    fn set_visible(&self, id: &str, visible: bool);
    fn is_visible(&self, id: &str) -> Option<bool>;

    fn attribute(&self, id: &str, name: &str) -> Option<String>;
    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&self, id: &str, text: &str);
    fn set_disabled(&self, id: &str, disabled: bool);
    fn is_disabled(&self, id: &str) -> Option<bool>;

    /// Ids of elements carrying `class`, in document order.
    fn ids_with_class(&self, class: &str) -> Vec<String>;

    /// `data-*` attribute of the page body, e.g. `body_data("logged-in")`.
    fn body_data(&self, key: &str) -> Option<String>;

    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}
