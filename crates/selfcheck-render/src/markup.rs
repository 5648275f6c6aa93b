//! Markup tree for rendered widgets.
//!
//! Elements are built bottom-up, can be queried by tag and attribute, and
//! serialise to compact HTML. Markdown output is carried as pre-rendered
//! [`Node::Html`] and embedded verbatim.

use std::fmt;

/// An element attribute. Flags have no value (`<div hidden>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text, escaped on output
    Text(String),
    /// Pre-rendered HTML, written as-is
    Html(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a valued attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Add a boolean attribute.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Attribute::flag(name));
        self
    }

    /// Add several attributes.
    pub fn attrs(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn html(self, html: impl Into<String>) -> Self {
        self.child(Node::Html(html.into()))
    }

    /// Value of an attribute. Flags yield an empty string.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Child elements, skipping text and HTML nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// All descendant elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&|e| e.tag == tag, &mut found);
        found
    }

    /// All descendant elements carrying `name="value"`, in document order.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&|e| e.get_attribute(name) == Some(value), &mut found);
        found
    }

    fn collect<'a>(&'a self, matches: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if matches(child) {
                found.push(child);
            }
            child.collect(matches, found);
        }
    }

    /// Serialised children.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_node(child, &mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(e) => write_element(e, out),
        Node::Text(t) => out.push_str(&html_escape(t)),
        Node::Html(h) => out.push_str(h),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);

    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            out.push_str(&html_escape(value));
            out.push('"');
        }
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

/// Escape HTML special characters including single quotes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
