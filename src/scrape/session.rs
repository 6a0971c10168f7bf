use crate::{capture::{CaptureEvent, CaptureLayer, PickedElement},
            dom::{DomTree, ElementDescriptor},
            error::{Result, ScraperError},
            matching::{CandidateSource, MatchEngine, MatchPass, MatchResult, ScanRequest},
            scrape::config::ScraperOptions,
            selection::{Example, ExportRecord, SelectionStore, write_records},
            utils::truncate_display};
use serde::Serialize;
use std::{path::Path, sync::mpsc::Receiver};

/// What happened to a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickStatus {
    Added,
    Duplicate,
    EmptyText,
    /// Selection mode was off
    Ignored,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickOutcome {
    pub status: PickStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementDescriptor>,

    /// Status line for the user
    pub message: String,
}

impl PickOutcome {
    fn ignored() -> Self {
        Self {
            status: PickStatus::Ignored,
            element: None,
            message: "Selection mode is disabled".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Added,
    NoNewMatches,
    NothingToMatch,
    ScanUnavailable,
}

/// Result of one match request, after ingestion into the store
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub status: MatchStatus,
    pub threshold: f64,

    /// Elements the scan produced
    pub scanned: usize,

    /// Rows inserted into the store
    pub added: usize,

    /// Every accepted match, best first, before dedup
    pub results: Vec<MatchResult>,

    /// Status line for the user
    pub message: String,
}

/// Scan source standing in for a missing document
struct MissingDocument;

impl CandidateSource for MissingDocument {
    fn candidates(&self) -> Result<Vec<ElementDescriptor>> {
        Err(ScraperError::ScanUnavailable("no document loaded".to_string()))
    }
}

/// One scraping session: a page snapshot, the pick channel and the
/// confirmed selections
pub struct ScrapeSession {
    options: ScraperOptions,

    /// Current page snapshot
    document: Option<DomTree>,

    store: SelectionStore,

    capture: CaptureLayer,

    /// Core side of the pick channel
    events: Receiver<CaptureEvent>,
}

impl ScrapeSession {
    pub fn new(options: ScraperOptions) -> Self {
        let (capture, events) = CaptureLayer::new(options.selection_mode);
        Self {
            options,
            document: None,
            store: SelectionStore::new(),
            capture,
            events,
        }
    }

    pub fn options(&self) -> &ScraperOptions {
        &self.options
    }

    /// Load a page from HTML. Selections are kept across loads.
    pub fn load_html(&mut self, html: &str, url: Option<&str>) -> Result<&DomTree> {
        let tree = DomTree::from_html(html, &self.options.ignored_tags);
        self.install(tree, url)
    }

    /// Load a page from a JSON element-tree snapshot
    pub fn load_snapshot(&mut self, json: &str, url: Option<&str>) -> Result<&DomTree> {
        let tree = DomTree::from_json(json, &self.options.ignored_tags)?;
        self.install(tree, url)
    }

    fn install(&mut self, tree: DomTree, url: Option<&str>) -> Result<&DomTree> {
        let tree = match url {
            Some(url) => tree.with_base_url(url)?,
            None => tree,
        };
        log::info!(
            "Loaded document: {} elements, {} with text",
            tree.count_elements(),
            tree.count_text_elements()
        );
        Ok(&*self.document.insert(tree))
    }

    /// Current page snapshot
    pub fn document(&self) -> Result<&DomTree> {
        self.document.as_ref().ok_or(ScraperError::NoDocument)
    }

    pub fn capture(&self) -> &CaptureLayer {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut CaptureLayer {
        &mut self.capture
    }

    pub fn set_selection_mode(&mut self, enabled: bool) {
        self.capture.set_selection_mode(enabled);
    }

    /// Pick the element listed under `index` in the document's element index
    pub fn pick_index(&mut self, index: usize) -> Result<PickOutcome> {
        let document = self.document()?;
        let selector = document
            .get_selector(index)
            .ok_or_else(|| ScraperError::ElementNotFound(format!("No element with index {}", index)))?;
        let record = PickedElement::from_document(document, selector.handle)
            .ok_or_else(|| ScraperError::ElementNotFound(format!("No element with index {}", index)))?;
        Ok(self.submit(record))
    }

    /// Pick the first text-bearing element with the given structural path
    pub fn pick_path(&mut self, path: &str) -> Result<PickOutcome> {
        let document = self.document()?;
        let record = document
            .find_by_path(path)
            .and_then(|handle| PickedElement::from_document(document, handle))
            .ok_or_else(|| ScraperError::ElementNotFound(format!("No element with text at '{}'", path)))?;
        Ok(self.submit(record))
    }

    /// Pick from a record produced by an external capture layer
    pub fn pick_record(&mut self, record: PickedElement) -> PickOutcome {
        self.submit(record)
    }

    fn submit(&mut self, record: PickedElement) -> PickOutcome {
        if !self.capture.pick(record) {
            return PickOutcome::ignored();
        }
        self.process_events().pop().unwrap_or_else(PickOutcome::ignored)
    }

    /// Handle every pending capture event, in arrival order
    pub fn process_events(&mut self) -> Vec<PickOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            match event {
                CaptureEvent::ElementPicked(picked) => outcomes.push(self.handle_pick(picked)),
            }
        }
        outcomes
    }

    fn handle_pick(&mut self, picked: PickedElement) -> PickOutcome {
        let descriptor = picked.to_descriptor();

        if !descriptor.has_text() {
            log::debug!("Skipping pick without text at '{}'", descriptor.structural_path);
            return PickOutcome {
                status: PickStatus::EmptyText,
                element: Some(descriptor),
                message: "Element has no text, skipped".to_string(),
            };
        }

        if self.store.add(descriptor.clone()) {
            let shown = truncate_display(&descriptor.text, self.options.display_text_len);
            log::info!("Selected element: {} ({})", shown, descriptor.structural_path);
            PickOutcome {
                status: PickStatus::Added,
                element: Some(descriptor),
                message: format!("Selected element: {}", shown),
            }
        } else {
            log::info!("Element already selected: {}", descriptor.structural_path);
            PickOutcome {
                status: PickStatus::Duplicate,
                element: Some(descriptor),
                message: "Element already selected, skipped".to_string(),
            }
        }
    }

    /// Match the current document against the selections
    pub fn run_match(&mut self, threshold: f64) -> Result<MatchReport> {
        let pass = match &self.document {
            Some(document) => self.evaluate(threshold, document)?,
            None => self.evaluate(threshold, &MissingDocument)?,
        };
        Ok(self.finish(threshold, pass))
    }

    /// Match candidates from an external scan against the selections
    pub fn run_match_with<S: CandidateSource + ?Sized>(&mut self, threshold: f64, source: &S) -> Result<MatchReport> {
        let pass = self.evaluate(threshold, source)?;
        Ok(self.finish(threshold, pass))
    }

    /// Request for an external scan layer; feed its response to
    /// [`run_match_with`](Self::run_match_with)
    pub fn scan_request(&self, threshold: f64) -> Result<ScanRequest> {
        if self.store.is_empty() {
            return Err(ScraperError::NoExamples);
        }
        Ok(MatchEngine::new(threshold)?.scan_request(self.store.all()))
    }

    /// `None` when there is nothing to match
    fn evaluate<S: CandidateSource + ?Sized>(&self, threshold: f64, source: &S) -> Result<Option<MatchPass>> {
        if self.store.is_empty() {
            log::info!("Nothing to match");
            return Ok(None);
        }
        let engine = MatchEngine::new(threshold)?;
        Ok(Some(engine.run(self.store.all(), source)))
    }

    fn finish(&mut self, threshold: f64, pass: Option<MatchPass>) -> MatchReport {
        let Some(pass) = pass else {
            return MatchReport {
                status: MatchStatus::NothingToMatch,
                threshold,
                scanned: 0,
                added: 0,
                results: Vec::new(),
                message: "Nothing to match".to_string(),
            };
        };

        if let Some(reason) = pass.scan_error {
            return MatchReport {
                status: MatchStatus::ScanUnavailable,
                threshold,
                scanned: 0,
                added: 0,
                results: Vec::new(),
                message: format!("Document scan unavailable: {}", reason),
            };
        }

        let added = self
            .store
            .ingest_matches(pass.results.clone(), self.options.display_text_len);

        let (status, message) = if added > 0 {
            (
                MatchStatus::Added,
                format!(
                    "Found {} new matching elements (threshold: {:.0}%)",
                    added,
                    threshold * 100.0
                ),
            )
        } else {
            (MatchStatus::NoNewMatches, "No new matching elements found".to_string())
        };
        log::info!("{}", message);

        MatchReport {
            status,
            threshold,
            scanned: pass.scanned,
            added,
            results: pass.results,
            message,
        }
    }

    /// Confirmed elements in order
    pub fn selections(&self) -> &[Example] {
        self.store.all()
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Delete rows by index; returns the removed rows
    pub fn remove_selections(&mut self, indices: &[usize]) -> Vec<Example> {
        self.store.remove_many(indices)
    }

    pub fn clear_selections(&mut self) {
        self.store.clear();
    }

    pub fn export_records(&self) -> Vec<ExportRecord> {
        self.store.export_records()
    }

    /// Write the selections to `path` (CSV or JSON by extension)
    pub fn export_to(&self, path: &Path) -> Result<usize> {
        if self.store.is_empty() {
            return Err(ScraperError::ExportFailed("Nothing to export".to_string()));
        }
        write_records(&self.export_records(), path)
    }
}

impl Default for ScrapeSession {
    fn default() -> Self {
        Self::new(ScraperOptions::default())
    }
}
