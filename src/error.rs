use thiserror::Error;

/// Errors raised by the scraping core, its tools and its export layer
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Threshold did not parse as a number or fell outside [0, 1]
    #[error("Invalid similarity threshold: {0}")]
    InvalidThreshold(String),

    /// A match pass was requested with an empty selection store
    #[error("Nothing to match: no example elements selected")]
    NoExamples,

    /// The document scan failed or returned malformed candidates
    #[error("Document scan unavailable: {0}")]
    ScanUnavailable(String),

    /// HTML or JSON snapshot could not be turned into a DOM tree
    #[error("Failed to parse document: {0}")]
    DocumentParseFailed(String),

    /// An operation needed a loaded document
    #[error("No document loaded")]
    NoDocument,

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, ScraperError>;
