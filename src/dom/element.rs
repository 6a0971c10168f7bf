use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tags whose subtrees never contribute elements or text to a snapshot
pub const DEFAULT_IGNORED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Tags whose `href` attribute is a navigable link
const LINK_TAGS: [&str; 3] = ["a", "area", "link"];

/// Represents a DOM element node of a document snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "li", "a")
    pub tag_name: String,

    /// Element attributes (e.g., id, class, href, etc.)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Trimmed text content of the element, descendants included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: HashMap::new(),
            text_content: None,
            children: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_list().split_whitespace().any(|c| c == class_name)
    }

    /// Raw class attribute, empty when absent
    pub fn class_list(&self) -> &str {
        self.attributes.get("class").map(String::as_str).unwrap_or("")
    }

    /// Element ID, `None` when absent or empty
    pub fn id(&self) -> Option<&str> {
        self.attributes
            .get("id")
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Raw link target for link-bearing tags
    pub fn href(&self) -> Option<&str> {
        if LINK_TAGS.iter().any(|&tag| self.is_tag(tag)) {
            self.attributes.get("href").map(String::as_str)
        } else {
            None
        }
    }

    /// Trimmed text content, empty when absent
    pub fn text(&self) -> &str {
        self.text_content.as_deref().map(str::trim).unwrap_or("")
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Remove children whose tag is in `ignored`, recursively
    pub fn simplify(&mut self, ignored: &[String]) {
        self.children
            .retain(|child| !ignored.iter().any(|tag| child.is_tag(tag)));

        for child in &mut self.children {
            child.simplify(ignored);
        }
    }

    /// Convert to a simplified opening-tag string with text, for display
    pub fn to_simple_string(&self) -> String {
        let mut parts = vec![format!("<{}", self.tag_name.to_ascii_lowercase())];

        if let Some(id) = self.id() {
            parts.push(format!(" id=\"{}\"", id));
        }

        let class = self.class_list();
        if !class.is_empty() {
            parts.push(format!(" class=\"{}\"", class));
        }

        if let Some(href) = self.href() {
            parts.push(format!(" href=\"{}\"", href));
        }

        parts.push(">".to_string());

        let text = self.text();
        if !text.is_empty() {
            parts.push(text.to_string());
        }

        parts.join("")
    }
}
