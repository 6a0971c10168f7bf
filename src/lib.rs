//! # visual-scraper
//!
//! Example-driven element matching for visual web scraping. Pick a few
//! elements on a page as examples, and the matcher finds every element that
//! looks like one of them, by structural path or by CSS classes.
//!
//! ## Features
//!
//! - **Matching Engine**: Structural-path and class-set similarity, thresholded and ranked
//! - **Selection Store**: Ordered, deduplicated examples that double as export rows
//! - **DOM Snapshots**: Parse HTML (or a JSON element tree) and index text-bearing elements
//! - **Capture Boundary**: Channel-based pick events with a selection-mode toggle
//! - **Export**: CSV (with BOM) and pretty JSON rows of text, selector and href
//! - **MCP Server**: Model Context Protocol server exposing the session as tools
//!
//! ## MCP Server
//!
//! ```bash
//! # stdio transport
//! cargo run --bin mcp-server --features mcp-server
//!
//! # HTTP streamable transport on port 3000
//! cargo run --bin mcp-server --features mcp-server -- --transport http
//! ```
//!
//! ## Library Usage
//!
//! ### Scraping Session
//!
//! ```rust
//! use visual_scraper::{ScrapeSession, ScraperOptions};
//!
//! # fn main() -> visual_scraper::Result<()> {
//! let mut session = ScrapeSession::new(ScraperOptions::default());
//! session.load_html(
//!     r#"<ul><li class="hit">One</li><li class="hit">Two</li></ul>"#,
//!     Some("https://example.com"),
//! )?;
//!
//! // Pick the first list item as an example
//! session.pick_path("html > body > ul > li")?;
//!
//! // Collect every similar element
//! let report = session.run_match(0.67)?;
//! println!("{}", report.message);
//! assert_eq!(session.selections().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ### Matching Without a Session
//!
//! ```rust
//! use visual_scraper::{ElementDescriptor, match_elements};
//!
//! # fn main() -> visual_scraper::Result<()> {
//! let examples = vec![ElementDescriptor::new("First", "ul > li").with_class_list("item")];
//! let candidates = vec![
//!     ElementDescriptor::new("Second", "ul > li:nth-of-type(2)").with_class_list("item"),
//!     ElementDescriptor::new("Footer", "footer > p"),
//! ];
//!
//! let results = match_elements(&examples, 0.5, candidates.as_slice())?;
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].candidate.text, "Second");
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust
//! use visual_scraper::ScrapeSession;
//! use visual_scraper::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//!
//! # fn main() -> visual_scraper::Result<()> {
//! let mut session = ScrapeSession::default();
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&mut session);
//!
//! registry.execute("load_document", json!({"html": "<p class=\"x\">Hello</p>"}), &mut context)?;
//! registry.execute("pick_element", json!({"selector": "html > body > p"}), &mut context)?;
//! let result = registry.execute("list_selections", json!({}), &mut context)?;
//! assert_eq!(result.data.unwrap()["count"], 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: Page snapshots, structural paths, and element descriptors
//! - [`matching`]: Similarity metrics and the match engine
//! - [`selection`]: Selection store and export
//! - [`capture`]: Pick events, selection mode, and hover highlighting
//! - [`scrape`]: Session orchestration and options
//! - [`tools`]: Session operations as typed tools
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature)

pub mod capture;
pub mod dom;
pub mod error;
pub mod matching;
pub mod scrape;
pub mod selection;
pub mod tools;
pub mod utils;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use capture::{CaptureEvent, CaptureLayer, Highlighter, PickedElement};
pub use dom::{DomTree, ElementDescriptor, ElementNode, ElementSelector, SelectorMap};
pub use error::{Result, ScraperError};
pub use matching::{CandidateSource, MatchEngine, MatchResult, match_elements};
pub use scrape::{MatchReport, MatchStatus, PickOutcome, PickStatus, ScrapeSession, ScraperOptions};
pub use selection::{ExportFormat, ExportRecord, SelectionStore};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::ScraperServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
