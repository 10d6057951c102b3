use std::path::Path;

use chrono::Utc;

use crate::error::Result;
use crate::models::{HistoryEntry, SearchType};
use crate::services::storage::JsonStore;

const SLOT: &str = "search_history.json";

/// Retained entries, newest first.
pub const MAX_ENTRIES: usize = 10;

/// Recent search queries, newest first, unique by query string.
#[derive(Debug)]
pub struct SearchHistory {
    store: JsonStore<HistoryEntry>,
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    pub fn new(data_dir: &Path) -> Self {
        let store = JsonStore::new(data_dir, SLOT);
        let entries = store.load();
        SearchHistory { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Records a query. A repeated query moves to the front rather than
    /// duplicating; the list is capped at [`MAX_ENTRIES`].
    pub fn add(&mut self, query: &str, search_type: SearchType) -> Result<()> {
        self.entries.retain(|e| e.query != query);
        self.entries.insert(
            0,
            HistoryEntry {
                query: query.to_string(),
                search_type,
                timestamp: Utc::now().timestamp_millis(),
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        self.store.save(&self.entries)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store.save(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn eleventh_entry_drops_the_oldest() {
        let dir = tempdir().unwrap();
        let mut history = SearchHistory::new(dir.path());

        for i in 0..11 {
            history
                .add(&format!("query {}", i), SearchType::All)
                .unwrap();
        }

        assert_eq!(history.entries().len(), MAX_ENTRIES);
        assert_eq!(history.entries()[0].query, "query 10");
        assert!(!history.entries().iter().any(|e| e.query == "query 0"));
    }

    #[test]
    fn repeated_query_moves_to_front_without_growing() {
        let dir = tempdir().unwrap();
        let mut history = SearchHistory::new(dir.path());

        history.add("dune", SearchType::Title).unwrap();
        history.add("foundation", SearchType::Title).unwrap();
        history.add("dune", SearchType::All).unwrap();

        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.entries()[0].query, "dune");
        assert_eq!(history.entries()[0].search_type, SearchType::All);
        assert_eq!(history.entries()[1].query, "foundation");
    }

    #[test]
    fn entries_survive_reload_in_order() {
        let dir = tempdir().unwrap();

        {
            let mut history = SearchHistory::new(dir.path());
            history.add("first", SearchType::All).unwrap();
            history.add("second", SearchType::Author).unwrap();
        }

        let reloaded = SearchHistory::new(dir.path());
        let queries: Vec<_> = reloaded.entries().iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["second", "first"]);
    }

    #[test]
    fn clear_empties_the_collection() {
        let dir = tempdir().unwrap();
        let mut history = SearchHistory::new(dir.path());

        history.add("dune", SearchType::Title).unwrap();
        history.clear().unwrap();

        assert!(history.entries().is_empty());
        assert!(SearchHistory::new(dir.path()).entries().is_empty());
    }
}
