//! Scraping session: page snapshot, pick handling, match passes and export

pub mod config;
pub mod session;

pub use config::{DEFAULT_THRESHOLD, ScraperOptions, parse_display_len};
pub use session::{MatchReport, MatchStatus, PickOutcome, PickStatus, ScrapeSession};
