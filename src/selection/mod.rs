//! Confirmed elements and their export
//!
//! The [`SelectionStore`] keeps every element the user picked or a match pass
//! accepted, in order and without duplicates. The [`export`] module turns its
//! rows into CSV or JSON.

pub mod export;
pub mod store;

pub use export::{ExportFormat, ExportRecord, write_records};
pub use store::{Example, SelectionStore};
