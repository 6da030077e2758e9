//! Node builder for page fragments. Text and attribute values are escaped when
//! a tree is serialized, never when it is built.

use std::fmt::{self, Write as _};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(el) => el.fmt(f),
            Self::Text(text) => f.write_str(&escape_text(text)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

pub fn el(tag: &str) -> Element {
    Element::new(tag)
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(text.to_string())];
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(el) => el.find_mut(id),
            Node::Text(_) => None,
        })
    }

    /// Descendants (and self) carrying `class`, in document order.
    pub fn find_by_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            out.push(self);
        }
        for child in self.children.iter().filter_map(Node::as_element) {
            child.find_by_class(class, out);
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {name}=\"{}\"", escape_attr(value))?;
        }
        f.write_char('>')?;
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return Ok(());
        }
        for child in &self.children {
            child.fmt(f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

pub fn render_all(nodes: &[Node]) -> String {
    nodes.iter().map(Node::render).collect()
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
