//! Document snapshots and element description
//!
//! This module turns a page into a static element tree and describes its
//! elements for the matching core. It includes:
//! - ElementNode: Representation of DOM elements
//! - DomTree: Snapshot built from HTML or a JSON element tree, with indexing of text-bearing elements
//! - structural_path: The canonical path builder shared by examples and candidates
//! - ElementDescriptor: The text/selector/class/href unit handed to the matcher
//! - SelectorMap: Mapping of indices to pickable elements

pub mod descriptor;
pub mod element;
pub mod path;
pub mod selector_map;
pub mod tree;

pub use descriptor::ElementDescriptor;
pub use element::{DEFAULT_IGNORED_TAGS, ElementNode};
pub use path::{PATH_SEPARATOR, ScannedElement, structural_path};
pub use selector_map::{ElementSelector, SelectorMap};
pub use tree::DomTree;
