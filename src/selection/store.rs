use crate::dom::ElementDescriptor;
use crate::matching::MatchResult;
use crate::selection::export::ExportRecord;
use crate::utils::truncate_display;
use std::collections::HashSet;

/// A confirmed element kept as a matching template and export row
pub type Example = ElementDescriptor;

/// Ordered, deduplicated collection of confirmed elements
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    examples: Vec<Example>,

    /// `(structural_path, text)` of every stored example
    keys: HashSet<(String, String)>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `descriptor` unless an example with the same structural path
    /// and text is already stored. Returns whether it was inserted.
    pub fn add(&mut self, descriptor: ElementDescriptor) -> bool {
        if !self.keys.insert(descriptor.key()) {
            return false;
        }
        self.examples.push(descriptor);
        true
    }

    /// Remove the row at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Example> {
        if index >= self.examples.len() {
            return None;
        }
        let removed = self.examples.remove(index);
        self.keys.remove(&removed.key());
        Some(removed)
    }

    /// Remove several rows, highest index first so earlier indices stay valid.
    /// Out-of-range and repeated indices are ignored.
    pub fn remove_many(&mut self, indices: &[usize]) -> Vec<Example> {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        sorted
            .into_iter()
            .filter_map(|index| self.remove_at(index))
            .collect()
    }

    pub fn clear(&mut self) {
        self.examples.clear();
        self.keys.clear();
    }

    /// All examples in insertion order
    pub fn all(&self) -> &[Example] {
        &self.examples
    }

    pub fn get(&self, index: usize) -> Option<&Example> {
        self.examples.get(index)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Fold a match pass into the store.
    ///
    /// Each result is first checked against the display-truncated text of
    /// every row (stored rows and rows accepted earlier in this pass), and
    /// only then offered to [`add`](Self::add). Returns the number of rows
    /// actually inserted.
    pub fn ingest_matches(&mut self, results: Vec<MatchResult>, display_len: usize) -> usize {
        let mut shown: HashSet<String> = self
            .examples
            .iter()
            .map(|example| truncate_display(&example.text, display_len))
            .collect();

        let mut inserted = 0;
        for result in results {
            let truncated = truncate_display(&result.candidate.text, display_len);
            if !shown.insert(truncated) {
                continue;
            }
            if self.add(result.into_descriptor()) {
                inserted += 1;
            }
        }

        log::debug!("Ingested {} matches, store holds {}", inserted, self.len());
        inserted
    }

    /// Rows for the export layer, in store order
    pub fn export_records(&self) -> Vec<ExportRecord> {
        self.examples.iter().map(ExportRecord::from).collect()
    }
}
