//! Accumulated working set and title search.

use std::collections::HashSet;

use crate::catalog::CatalogEntry;

/// Returns indices of `entries` whose title contains `query`, ignoring case.
///
/// An empty query matches nothing; callers treat that as "filter inactive".
/// Indices keep the original order.
#[must_use]
pub fn filter_by_title(entries: &[CatalogEntry], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.title.to_lowercase().contains(&query_lower))
        .map(|(i, _)| i)
        .collect()
}

/// Working set of loaded entries plus the active search query.
///
/// Entries are appended page by page in arrival order. The filtered index
/// cache is rebuilt whenever the query or the set changes.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogBrowser {
    entries: Vec<CatalogEntry>,
    seen_ids: HashSet<u64>,
    query: String,
    /// Cached indices matching `query`.
    filtered_indices: Vec<usize>,
}

impl CatalogBrowser {
    /// Creates an empty browser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page of entries, skipping ids already present.
    ///
    /// Returns the number of entries actually added.
    pub fn append_page(&mut self, page: Vec<CatalogEntry>) -> usize {
        let before = self.entries.len();
        for entry in page {
            if self.seen_ids.insert(entry.id) {
                self.entries.push(entry);
            } else {
                tracing::debug!(id = entry.id, "duplicate catalog entry ignored");
            }
        }
        self.rebuild_filter_cache();
        self.entries.len().saturating_sub(before)
    }

    /// All loaded entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a non-empty query is active.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Entries matching the query; empty when not searching.
    pub fn filtered(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.filtered_indices.iter().filter_map(|&i| self.entries.get(i))
    }

    /// Entries to display: the matches while searching, otherwise everything.
    #[must_use]
    pub fn visible(&self) -> Vec<&CatalogEntry> {
        if self.is_searching() {
            self.filtered().collect()
        } else {
            self.entries.iter().collect()
        }
    }

    /// Replaces the query.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.rebuild_filter_cache();
    }

    /// Appends a character to the query.
    pub fn query_push(&mut self, ch: char) {
        self.query.push(ch);
        self.rebuild_filter_cache();
    }

    /// Removes the last character from the query.
    pub fn query_pop(&mut self) {
        self.query.pop();
        self.rebuild_filter_cache();
    }

    fn rebuild_filter_cache(&mut self) {
        self.filtered_indices = filter_by_title(&self.entries, &self.query);
    }
}
