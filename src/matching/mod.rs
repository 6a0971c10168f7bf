//! Example-driven element matching
//!
//! Given a handful of example elements and a threshold, every element of a
//! document is scored on two independent axes:
//! - structural similarity: shared trailing segments of the structural paths
//! - class similarity: shared classes over the larger class set
//!
//! A candidate matches when either axis reaches the threshold.

pub mod engine;
pub mod similarity;

pub use engine::{
    CandidateSource, MatchEngine, MatchPass, MatchResult, ScanExample, ScanRequest, match_elements,
    parse_threshold, validate_threshold,
};
pub use similarity::{class_similarity, structural_similarity};
