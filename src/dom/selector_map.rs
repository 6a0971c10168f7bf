use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Information needed to locate and show a pickable element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementSelector {
    /// Structural path of the element
    pub css_selector: String,

    /// Element's tag name
    pub tag_name: String,

    /// Position of the element in the document walk
    pub handle: usize,

    /// Element's ID attribute (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Element's text content (truncated for display)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ElementSelector {
    /// Create a new ElementSelector
    pub fn new(css_selector: impl Into<String>, tag_name: impl Into<String>, handle: usize) -> Self {
        Self {
            css_selector: css_selector.into(),
            tag_name: tag_name.into(),
            handle,
            id: None,
            text: None,
        }
    }

    /// Builder method: set ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Map of element indices to their selectors
/// Uses IndexMap to preserve document order
#[derive(Debug, Clone, Default)]
pub struct SelectorMap {
    map: IndexMap<usize, ElementSelector>,

    /// Next available index
    next_index: usize,
}

impl SelectorMap {
    /// Create a new empty SelectorMap
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
            next_index: 0,
        }
    }

    /// Register a new element and return its assigned index
    pub fn register(&mut self, selector: ElementSelector) -> usize {
        let index = self.next_index;
        self.map.insert(index, selector);
        self.next_index += 1;
        index
    }

    /// Get selector by index
    pub fn get(&self, index: usize) -> Option<&ElementSelector> {
        self.map.get(&index)
    }

    /// Check if index exists
    pub fn contains(&self, index: usize) -> bool {
        self.map.contains_key(&index)
    }

    /// Get the number of registered elements
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear all elements
    pub fn clear(&mut self) {
        self.map.clear();
        self.next_index = 0;
    }

    /// Iterate over all (index, selector) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&usize, &ElementSelector)> {
        self.map.iter()
    }

    /// Get all selectors
    pub fn selectors(&self) -> impl Iterator<Item = &ElementSelector> {
        self.map.values()
    }

    /// Find index by structural path
    pub fn find_by_css_selector(&self, css_selector: &str) -> Option<usize> {
        self.map
            .iter()
            .find(|(_, sel)| sel.css_selector == css_selector)
            .map(|(idx, _)| *idx)
    }

    /// Find index by element ID
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.map
            .iter()
            .find(|(_, sel)| sel.id.as_deref() == Some(id))
            .map(|(idx, _)| *idx)
    }
}
