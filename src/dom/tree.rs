use crate::dom::descriptor::ElementDescriptor;
use crate::dom::element::ElementNode;
use crate::dom::path::{ScannedElement, structural_path};
use crate::dom::selector_map::{ElementSelector, SelectorMap};
use crate::error::{Result, ScraperError};
use crate::utils::{DISPLAY_TEXT_LEN, truncate_display};
use scraper::{ElementRef, Html, Node};
use std::collections::HashMap;
use url::Url;

/// Static snapshot of a web page's element tree
#[derive(Debug, Clone)]
pub struct DomTree {
    /// Root element of the DOM tree
    pub root: ElementNode,

    /// Map of indices to text-bearing element selectors
    pub selector_map: SelectorMap,

    /// Page URL used to resolve relative links
    pub base_url: Option<Url>,
}

impl DomTree {
    /// Create a tree from an already built root element
    pub fn new(root: ElementNode) -> Self {
        let mut tree = Self {
            root,
            selector_map: SelectorMap::new(),
            base_url: None,
        };
        tree.build_selector_map();
        tree
    }

    /// Parse an HTML document, dropping subtrees whose tag is in `ignored`
    pub fn from_html(html: &str, ignored: &[String]) -> Self {
        let document = Html::parse_document(html);
        let (root, _) = convert_element(document.root_element(), ignored);
        log::debug!("Parsed HTML document ({} bytes)", html.len());
        Self::new(root)
    }

    /// Build a tree from a JSON snapshot of an `ElementNode` hierarchy
    pub fn from_json(json: &str, ignored: &[String]) -> Result<Self> {
        let mut root: ElementNode = serde_json::from_str(json)
            .map_err(|e| ScraperError::DocumentParseFailed(format!("Failed to parse DOM JSON: {}", e)))?;
        root.simplify(ignored);
        Ok(Self::new(root))
    }

    /// Builder method: resolve relative links against `url`
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| ScraperError::DocumentParseFailed(format!("Invalid page URL '{}': {}", url, e)))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Pre-order walk over every element, root first.
    ///
    /// Handles used elsewhere in this module are positions in this walk.
    pub fn walk(&self) -> Vec<ScannedElement<'_>> {
        let mut elements = Vec::new();
        let mut stack = vec![ScannedElement {
            node: &self.root,
            parent: None,
            nth_of_type: 1,
        }];

        while let Some(entry) = stack.pop() {
            let handle = elements.len();
            elements.push(entry);

            let mut seen: HashMap<String, usize> = HashMap::new();
            let mut children = Vec::with_capacity(entry.node.children.len());
            for child in &entry.node.children {
                let counter = seen.entry(child.tag_name.to_ascii_lowercase()).or_insert(0);
                *counter += 1;
                children.push(ScannedElement {
                    node: child,
                    parent: Some(handle),
                    nth_of_type: *counter,
                });
            }
            stack.extend(children.into_iter().rev());
        }

        elements
    }

    /// Structural path of the element at `handle`
    pub fn structural_path(&self, handle: usize) -> String {
        structural_path(&self.walk(), handle)
    }

    /// Element at `handle`
    pub fn element(&self, handle: usize) -> Option<&ElementNode> {
        self.walk().get(handle).map(|entry| entry.node)
    }

    /// Describe the element at `handle`
    pub fn describe(&self, handle: usize) -> Option<ElementDescriptor> {
        let elements = self.walk();
        elements.get(handle).map(|entry| self.describe_scanned(&elements, handle, entry.node))
    }

    /// Describe every element in document order
    pub fn scan(&self) -> Vec<ElementDescriptor> {
        let elements = self.walk();
        elements
            .iter()
            .enumerate()
            .map(|(handle, entry)| self.describe_scanned(&elements, handle, entry.node))
            .collect()
    }

    fn describe_scanned(
        &self,
        elements: &[ScannedElement<'_>],
        handle: usize,
        node: &ElementNode,
    ) -> ElementDescriptor {
        ElementDescriptor::new(node.text(), structural_path(elements, handle))
            .with_class_list(node.class_list())
            .with_href(node.href().map(|href| self.resolve_href(href)).unwrap_or_default())
    }

    /// Resolve a raw href against the page URL, if any
    pub fn resolve_href(&self, href: &str) -> String {
        match &self.base_url {
            Some(base) => base
                .join(href)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| href.to_string()),
            None => href.to_string(),
        }
    }

    /// Find the first text-bearing element whose structural path equals `path`
    pub fn find_by_path(&self, path: &str) -> Option<usize> {
        let elements = self.walk();
        (0..elements.len()).find(|&handle| {
            !elements[handle].node.text().is_empty() && structural_path(&elements, handle) == path
        })
    }

    /// Build the selector map by indexing every text-bearing element
    fn build_selector_map(&mut self) {
        let mut selector_map = SelectorMap::new();
        let elements = self.walk();

        for (handle, entry) in elements.iter().enumerate() {
            let text = entry.node.text();
            if text.is_empty() {
                continue;
            }

            let mut selector = ElementSelector::new(structural_path(&elements, handle), &entry.node.tag_name, handle)
                .with_text(truncate_display(text, DISPLAY_TEXT_LEN));
            if let Some(id) = entry.node.id() {
                selector = selector.with_id(id);
            }
            selector_map.register(selector);
        }

        self.selector_map = selector_map;
    }

    /// Convert the DOM tree to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root)
            .map_err(|e| ScraperError::DocumentParseFailed(format!("Failed to serialize DOM to JSON: {}", e)))
    }

    /// Get element selector by index
    pub fn get_selector(&self, index: usize) -> Option<&ElementSelector> {
        self.selector_map.get(index)
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        count_elements_recursive(&self.root)
    }

    /// Count text-bearing (pickable) elements
    pub fn count_text_elements(&self) -> usize {
        self.selector_map.len()
    }
}

fn count_elements_recursive(node: &ElementNode) -> usize {
    1 + node.children.iter().map(count_elements_recursive).sum::<usize>()
}

/// Convert a parsed element into an `ElementNode`, returning it together
/// with its untrimmed text so parents can concatenate descendant text.
fn convert_element(element: ElementRef<'_>, ignored: &[String]) -> (ElementNode, String) {
    let mut node = ElementNode::new(element.value().name().to_ascii_lowercase());
    for (name, value) in element.value().attrs() {
        node.add_attribute(name, value);
    }

    let mut raw_text = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => raw_text.push_str(&text.text),
            Node::Element(child_element) => {
                if ignored.iter().any(|tag| tag.eq_ignore_ascii_case(child_element.name())) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    let (child_node, child_text) = convert_element(child_ref, ignored);
                    raw_text.push_str(&child_text);
                    node.add_child(child_node);
                }
            }
            _ => {}
        }
    }

    let trimmed = raw_text.trim();
    if !trimmed.is_empty() {
        node.text_content = Some(trimmed.to_string());
    }

    (node, raw_text)
}
