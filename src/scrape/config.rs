use crate::dom::DEFAULT_IGNORED_TAGS;
use crate::error::{Result, ScraperError};
use crate::utils::DISPLAY_TEXT_LEN;

/// Threshold used when a match request does not name one
pub const DEFAULT_THRESHOLD: f64 = 0.67;

/// Options for a scraping session
#[derive(Debug, Clone)]
pub struct ScraperOptions {
    /// Similarity threshold for match requests without one (default: 0.67)
    pub default_threshold: f64,

    /// Characters of element text shown in listings, status lines and the
    /// match-ingestion dedup (default: 50)
    pub display_text_len: usize,

    /// Tags dropped from snapshots together with their subtrees
    pub ignored_tags: Vec<String>,

    /// Whether picks are accepted right after startup (default: true)
    pub selection_mode: bool,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            display_text_len: DISPLAY_TEXT_LEN,
            ignored_tags: DEFAULT_IGNORED_TAGS.iter().map(|tag| tag.to_string()).collect(),
            selection_mode: true,
        }
    }
}

impl ScraperOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default similarity threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// Set the display truncation length
    pub fn display_text_len(mut self, len: usize) -> Self {
        self.display_text_len = len;
        self
    }

    /// Replace the ignored tag list
    pub fn ignored_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether picks are accepted initially
    pub fn selection_mode(mut self, enabled: bool) -> Self {
        self.selection_mode = enabled;
        self
    }
}

/// Parse a user-entered display length; at least one character is shown
pub fn parse_display_len(input: &str) -> Result<usize> {
    match input.trim().parse::<usize>() {
        Ok(0) => Err(ScraperError::InvalidParams(
            "display length must be at least 1".to_string(),
        )),
        Ok(len) => Ok(len),
        Err(_) => Err(ScraperError::InvalidParams(format!(
            "'{}' is not a character count",
            input.trim()
        ))),
    }
}
