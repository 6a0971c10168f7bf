use crate::dom::{DomTree, ElementDescriptor};
use crate::error::{Result, ScraperError};
use crate::matching::similarity::{class_similarity, structural_similarity};
use serde::{Deserialize, Serialize};

/// A scanned element that cleared the threshold against some example
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    #[serde(flatten)]
    pub candidate: ElementDescriptor,

    #[serde(rename = "selectorSimilarity")]
    pub structural_similarity: f64,

    #[serde(rename = "classSimilarity")]
    pub class_similarity: f64,

    /// `max(structural_similarity, class_similarity)`
    #[serde(rename = "totalSimilarity")]
    pub total_similarity: f64,
}

impl MatchResult {
    /// One-line score breakdown for status output
    pub fn summary(&self) -> String {
        format!(
            "selector {:.2}% | class {:.2}% | max {:.2}%",
            self.structural_similarity * 100.0,
            self.class_similarity * 100.0,
            self.total_similarity * 100.0
        )
    }

    pub fn into_descriptor(self) -> ElementDescriptor {
        self.candidate
    }
}

/// Anything able to produce the candidate elements of one match pass,
/// in document order
pub trait CandidateSource {
    fn candidates(&self) -> Result<Vec<ElementDescriptor>>;
}

impl CandidateSource for DomTree {
    fn candidates(&self) -> Result<Vec<ElementDescriptor>> {
        Ok(self.scan())
    }
}

impl CandidateSource for [ElementDescriptor] {
    fn candidates(&self) -> Result<Vec<ElementDescriptor>> {
        Ok(self.to_vec())
    }
}

/// Raw scan-layer response: a JSON array of `{selector, text, href, className}`
impl CandidateSource for serde_json::Value {
    fn candidates(&self) -> Result<Vec<ElementDescriptor>> {
        let raw: Vec<ElementDescriptor> = serde_json::from_value(self.clone())
            .map_err(|e| ScraperError::ScanUnavailable(format!("malformed scan response: {}", e)))?;

        Ok(raw
            .into_iter()
            .map(|d| {
                ElementDescriptor::new(&d.text, d.structural_path)
                    .with_class_list(d.class_list)
                    .with_href(d.href)
            })
            .collect())
    }
}

/// Parse a user-entered threshold
pub fn parse_threshold(input: &str) -> Result<f64> {
    let value: f64 = input.trim().parse().map_err(|_| {
        ScraperError::InvalidThreshold(format!(
            "'{}' is not a number; enter a decimal between 0 and 1",
            input.trim()
        ))
    })?;
    validate_threshold(value)
}

/// Reject thresholds outside [0, 1]; values are never clamped
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ScraperError::InvalidThreshold(format!(
            "{} is outside [0, 1]",
            threshold
        )))
    }
}

/// Outcome of scanning one document against the examples
#[derive(Debug, Clone, Default)]
pub struct MatchPass {
    /// Accepted matches, best first
    pub results: Vec<MatchResult>,

    /// Number of elements the source produced
    pub scanned: usize,

    /// Set when the source failed; the pass then has no results
    pub scan_error: Option<String>,
}

/// Example as seen by an external scan layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanExample {
    pub selector: String,

    #[serde(rename = "className", default)]
    pub class_name: String,
}

/// Request handed to an external scan layer. Its response is any
/// [`CandidateSource`], typically a JSON array of candidates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanRequest {
    pub examples: Vec<ScanExample>,
    pub threshold: f64,
}

/// Scores document elements against example elements
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine {
    threshold: f64,
}

impl MatchEngine {
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Describe a pass over `examples` for a scan layer outside the crate
    pub fn scan_request(&self, examples: &[ElementDescriptor]) -> ScanRequest {
        ScanRequest {
            examples: examples
                .iter()
                .map(|example| ScanExample {
                    selector: example.structural_path.clone(),
                    class_name: example.class_list.clone(),
                })
                .collect(),
            threshold: self.threshold,
        }
    }

    /// Score one candidate. The first example (in store order) whose best
    /// axis reaches the threshold decides the result.
    pub fn score(&self, examples: &[ElementDescriptor], candidate: &ElementDescriptor) -> Option<MatchResult> {
        if !candidate.has_text() {
            return None;
        }

        examples.iter().find_map(|example| {
            let structural = structural_similarity(&candidate.structural_path, &example.structural_path);
            let class = class_similarity(&candidate.class_list, &example.class_list);
            let total = structural.max(class);

            (total >= self.threshold).then(|| MatchResult {
                candidate: candidate.clone(),
                structural_similarity: structural,
                class_similarity: class,
                total_similarity: total,
            })
        })
    }

    /// Score every candidate and sort accepted ones by total similarity,
    /// keeping document order among equal scores
    pub fn rank(&self, examples: &[ElementDescriptor], candidates: &[ElementDescriptor]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = candidates
            .iter()
            .filter_map(|candidate| self.score(examples, candidate))
            .collect();

        results.sort_by(|a, b| b.total_similarity.total_cmp(&a.total_similarity));
        results
    }

    /// Pull candidates from `source` and rank them. A failing source is
    /// logged and yields an empty pass.
    pub fn run<S: CandidateSource + ?Sized>(&self, examples: &[ElementDescriptor], source: &S) -> MatchPass {
        let candidates = match source.candidates() {
            Ok(candidates) => candidates,
            Err(e) => {
                log::warn!("Treating scan as empty: {}", e);
                return MatchPass {
                    scan_error: Some(e.to_string()),
                    ..MatchPass::default()
                };
            }
        };

        let results = self.rank(examples, &candidates);
        log::debug!(
            "Match pass: {} examples, {} candidates, {} accepted at threshold {}",
            examples.len(),
            candidates.len(),
            results.len(),
            self.threshold
        );

        MatchPass {
            results,
            scanned: candidates.len(),
            scan_error: None,
        }
    }
}

/// Run a full match pass: examples against every candidate of `source`.
///
/// Returns an empty list when there are no examples. The threshold is
/// validated first otherwise.
pub fn match_elements<S: CandidateSource + ?Sized>(
    examples: &[ElementDescriptor],
    threshold: f64,
    source: &S,
) -> Result<Vec<MatchResult>> {
    if examples.is_empty() {
        log::info!("Nothing to match");
        return Ok(Vec::new());
    }

    Ok(MatchEngine::new(threshold)?.run(examples, source).results)
}
