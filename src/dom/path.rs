//! Canonical structural paths
//!
//! A structural path is the chain of lowercase tag names from an element up to
//! the document root, joined with `" > "`. Same-tag siblings are told apart
//! with `:nth-of-type(n)` (omitted for the first of its kind), and the walk
//! stops at the first ancestor carrying a non-empty `id`, which is rendered as
//! `tag#id` and anchors the path.
//!
//! Examples and candidates are both described through [`structural_path`],
//! so their paths are always comparable.

use crate::dom::element::ElementNode;

/// Separator between path segments
pub const PATH_SEPARATOR: &str = " > ";

/// One element of a pre-order document walk, with its parent link
#[derive(Debug, Clone, Copy)]
pub struct ScannedElement<'a> {
    pub node: &'a ElementNode,

    /// Handle of the parent element in the same walk
    pub parent: Option<usize>,

    /// 1-based position among preceding siblings with the same tag
    pub nth_of_type: usize,
}

/// Build the structural path of the element at `handle` in `elements`.
///
/// Returns an empty string when `handle` does not name an element.
pub fn structural_path(elements: &[ScannedElement<'_>], handle: usize) -> String {
    let mut segments = Vec::new();
    let mut cursor = elements.get(handle);

    while let Some(entry) = cursor {
        let mut segment = entry.node.tag_name.to_ascii_lowercase();

        if let Some(id) = entry.node.id() {
            segment.push('#');
            segment.push_str(id);
            segments.push(segment);
            break;
        }

        if entry.nth_of_type != 1 {
            segment.push_str(&format!(":nth-of-type({})", entry.nth_of_type));
        }
        segments.push(segment);

        cursor = entry.parent.and_then(|parent| elements.get(parent));
    }

    segments.reverse();
    segments.join(PATH_SEPARATOR)
}
