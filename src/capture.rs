//! Input capture boundary
//!
//! The capture side reports picks as [`CaptureEvent::ElementPicked`] messages
//! over a channel; the session drains the channel and reacts synchronously.
//! Only serialized [`PickedElement`] records cross the boundary.
//!
//! Hover highlighting is a presentation concern owned by the capture layer
//! through the [`Highlighter`] capability. The matching core never calls it.

use crate::dom::{DomTree, ElementDescriptor};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Element record produced by a click on the page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickedElement {
    /// Trimmed visible text
    #[serde(default)]
    pub text: String,

    /// Outer markup, for display only
    #[serde(default)]
    pub html: String,

    /// Upper-case tag name, for display only
    #[serde(default)]
    pub tag_name: String,

    #[serde(default)]
    pub class_name: String,

    /// For display only
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub href: String,

    /// Structural path of the element
    pub selector: String,
}

impl PickedElement {
    /// Build the record for the element at `handle` of a snapshot
    pub fn from_document(tree: &DomTree, handle: usize) -> Option<Self> {
        let node = tree.element(handle)?;
        let descriptor = tree.describe(handle)?;

        Some(Self {
            text: descriptor.text,
            html: node.to_simple_string(),
            tag_name: node.tag_name.to_ascii_uppercase(),
            class_name: descriptor.class_list,
            id: node.id().unwrap_or_default().to_string(),
            href: descriptor.href,
            selector: descriptor.structural_path,
        })
    }

    pub fn to_descriptor(&self) -> ElementDescriptor {
        ElementDescriptor::new(&self.text, self.selector.clone())
            .with_class_list(self.class_name.clone())
            .with_href(self.href.clone())
    }
}

/// Messages sent from the capture side to the core
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    ElementPicked(PickedElement),
}

/// Side-effecting hover highlight
pub trait Highlighter: Send {
    fn highlight_at(&mut self, x: i32, y: i32);
}

/// Highlighter for headless use: records the position in the log
#[derive(Debug, Default)]
pub struct LogHighlighter;

impl Highlighter for LogHighlighter {
    fn highlight_at(&mut self, x: i32, y: i32) {
        log::debug!("Highlight element at ({}, {})", x, y);
    }
}

/// Capture side of the pick channel
pub struct CaptureLayer {
    sender: Sender<CaptureEvent>,
    highlighter: Box<dyn Highlighter>,
    selection_mode: bool,
}

impl CaptureLayer {
    /// Create a capture layer and the receiver the core listens on
    pub fn new(selection_mode: bool) -> (Self, Receiver<CaptureEvent>) {
        let (sender, receiver) = channel();
        let layer = Self {
            sender,
            highlighter: Box::new(LogHighlighter),
            selection_mode,
        };
        (layer, receiver)
    }

    /// Builder method: replace the highlight capability
    pub fn with_highlighter(mut self, highlighter: Box<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn set_selection_mode(&mut self, enabled: bool) {
        log::info!("Selection mode {}", if enabled { "enabled" } else { "disabled" });
        self.selection_mode = enabled;
    }

    /// Report a pick. Dropped (returns false) outside selection mode or when
    /// the core side has gone away.
    pub fn pick(&self, element: PickedElement) -> bool {
        if !self.selection_mode {
            log::debug!("Ignoring pick of '{}': selection mode disabled", element.selector);
            return false;
        }
        self.sender.send(CaptureEvent::ElementPicked(element)).is_ok()
    }

    /// Pointer moved over the page
    pub fn hover(&mut self, x: i32, y: i32) {
        if self.selection_mode {
            self.highlighter.highlight_at(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementNode;
    use std::sync::{Arc, Mutex};

    struct RecordingHighlighter(Arc<Mutex<Vec<(i32, i32)>>>);

    impl Highlighter for RecordingHighlighter {
        fn highlight_at(&mut self, x: i32, y: i32) {
            self.0.lock().unwrap().push((x, y));
        }
    }

    #[test]
    fn test_picked_element_wire_format() {
        let json = r#"{
            "text": "Docs",
            "html": "<a href=\"/docs\">Docs</a>",
            "tagName": "A",
            "className": "nav-link",
            "id": "",
            "href": "https://example.com/docs",
            "selector": "html > body > nav > a"
        }"#;
        let picked: PickedElement = serde_json::from_str(json).unwrap();
        assert_eq!(picked.tag_name, "A");

        let descriptor = picked.to_descriptor();
        assert_eq!(descriptor.structural_path, "html > body > nav > a");
        assert_eq!(descriptor.class_list, "nav-link");
        assert_eq!(descriptor.href, "https://example.com/docs");
    }

    #[test]
    fn test_from_document() {
        let root = ElementNode::new("body").with_children(vec![
            ElementNode::new("a")
                .with_attribute("id", "home")
                .with_attribute("class", "brand")
                .with_attribute("href", "/")
                .with_text("Home"),
        ]);
        let tree = DomTree::new(root);

        let picked = PickedElement::from_document(&tree, 1).unwrap();
        assert_eq!(picked.selector, "a#home");
        assert_eq!(picked.tag_name, "A");
        assert_eq!(picked.id, "home");
        assert_eq!(picked.class_name, "brand");
        assert!(picked.html.starts_with("<a"));
        assert!(PickedElement::from_document(&tree, 9).is_none());
    }

    #[test]
    fn test_pick_sends_event() {
        let (layer, receiver) = CaptureLayer::new(true);
        let element = PickedElement {
            text: "Item".to_string(),
            selector: "ul > li".to_string(),
            ..Default::default()
        };

        assert!(layer.pick(element.clone()));
        assert_eq!(receiver.try_recv().unwrap(), CaptureEvent::ElementPicked(element));
    }

    #[test]
    fn test_pick_dropped_outside_selection_mode() {
        let (mut layer, receiver) = CaptureLayer::new(false);
        assert!(!layer.pick(PickedElement::default()));
        assert!(receiver.try_recv().is_err());

        layer.set_selection_mode(true);
        assert!(layer.pick(PickedElement::default()));
    }

    #[test]
    fn test_hover_uses_highlighter_only_in_selection_mode() {
        let positions = Arc::new(Mutex::new(Vec::new()));
        let (layer, _receiver) = CaptureLayer::new(false);
        let mut layer = layer.with_highlighter(Box::new(RecordingHighlighter(positions.clone())));

        layer.hover(1, 2);
        layer.set_selection_mode(true);
        layer.hover(10, 20);

        assert_eq!(*positions.lock().unwrap(), vec![(10, 20)]);
    }
}
