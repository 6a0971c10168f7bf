use serde::{Deserialize, Serialize};

/// The unit exchanged between a document and the matching core
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementDescriptor {
    /// Trimmed visible text content
    pub text: String,

    /// Canonical structural path of the element
    #[serde(rename = "selector")]
    pub structural_path: String,

    /// Raw whitespace-separated class attribute, may be empty
    #[serde(rename = "className", default)]
    pub class_list: String,

    /// Link target, empty when absent
    #[serde(default)]
    pub href: String,
}

impl ElementDescriptor {
    /// Create a descriptor; text is trimmed
    pub fn new(text: impl AsRef<str>, structural_path: impl Into<String>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            structural_path: structural_path.into(),
            class_list: String::new(),
            href: String::new(),
        }
    }

    /// Builder method: set class list
    pub fn with_class_list(mut self, class_list: impl Into<String>) -> Self {
        self.class_list = class_list.into();
        self
    }

    /// Builder method: set href
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = href.into();
        self
    }

    /// Whether the element can become an example or a match
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Store-level dedup key
    pub fn key(&self) -> (String, String) {
        (self.structural_path.clone(), self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_text() {
        let descriptor = ElementDescriptor::new("  Title \n", "html > body > h1");
        assert_eq!(descriptor.text, "Title");
        assert!(descriptor.has_text());
        assert!(!ElementDescriptor::new("   ", "p").has_text());
    }

    #[test]
    fn test_wire_names() {
        let descriptor = ElementDescriptor::new("Item", "ul > li")
            .with_class_list("row odd")
            .with_href("/item/1");

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["selector"], "ul > li");
        assert_eq!(json["className"], "row odd");
        assert_eq!(json["href"], "/item/1");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let descriptor: ElementDescriptor =
            serde_json::from_str(r#"{"text": "T1", "selector": "a>b"}"#).unwrap();
        assert_eq!(descriptor.class_list, "");
        assert_eq!(descriptor.href, "");
    }
}
