//! Bounded, newest-first conversion history held in memory for one session.
//!
//! Mutation requires `&mut self`, so the owning session is the only writer.
//! Readers get [`HistorySnapshot`]s which share the buffer copy-on-write.

use std::sync::Arc;

use super::preview::preview_line;
use super::types::{ConversionResult, HistoryEntryPreview, HistorySnapshot};

pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

#[derive(Debug)]
pub struct HistoryStore {
    items: Arc<Vec<ConversionResult>>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl HistoryStore {
    /// A capacity of zero is coerced to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Arc::new(Vec::with_capacity(capacity + 1)),
            capacity,
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Create a fresh entry from the two strings (kept verbatim) and prepend it.
    pub fn record(
        &mut self,
        input_text: impl Into<String>,
        output_json: impl Into<String>,
    ) -> ConversionResult {
        self.insert(ConversionResult::new(input_text, output_json))
    }

    /// Prepend an already-built result, evicting from the tail past capacity.
    pub fn insert(&mut self, result: ConversionResult) -> ConversionResult {
        let capacity = self.capacity;
        let items = Arc::make_mut(&mut self.items);
        items.insert(0, result.clone());
        if items.len() > capacity {
            let evicted = items.len() - capacity;
            items.truncate(capacity);
            log::debug!("History: capacity {} reached, evicted {} entries", capacity, evicted);
        }
        result
    }

    pub fn list(&self) -> HistorySnapshot {
        HistorySnapshot::new(Arc::clone(&self.items))
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        // Replace rather than clear in place so outstanding snapshots keep their data.
        self.items = Arc::new(Vec::with_capacity(self.capacity + 1));
    }

    pub fn get(&self, id: &str) -> Option<ConversionResult> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    pub fn latest(&self) -> Option<ConversionResult> {
        self.items.first().cloned()
    }

    pub fn previews(&self) -> Vec<HistoryEntryPreview> {
        self.items
            .iter()
            .map(|item| HistoryEntryPreview {
                id: item.id.clone(),
                created_at_ms: item.created_at_ms,
                preview: preview_line(&item.input_text),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(snapshot: &HistorySnapshot) -> Vec<&str> {
        snapshot.iter().map(|r| r.input_text.as_str()).collect()
    }

    #[test]
    fn test_len_is_min_of_records_and_capacity() {
        for capacity in 1..=6 {
            for n in 0..=10 {
                let mut store = HistoryStore::new(capacity);
                for i in 0..n {
                    store.record(format!("in {i}"), "{}");
                }
                assert_eq!(store.list().len(), n.min(capacity), "n={n} cap={capacity}");
            }
        }
    }

    #[test]
    fn test_newest_first() {
        let mut store = HistoryStore::new(3);
        store.record("a", "{}");
        store.record("b", "{}");
        store.record("c", "{}");
        assert_eq!(inputs(&store.list()), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut store = HistoryStore::new(2);
        let a = store.record("a", "{}");
        store.record("b", "{}");
        store.record("c", "{}");
        assert_eq!(inputs(&store.list()), vec!["c", "b"]);
        assert!(store.get(&a.id).is_none());
    }

    #[test]
    fn test_record_keeps_strings_verbatim() {
        let mut store = HistoryStore::default();
        let output = "{\n  \"city\": \"Tokyo\"\n}";
        let result = store.record("  spaced input  ", output);
        assert_eq!(result.output_json, output);
        assert_eq!(result.input_text, "  spaced input  ");
        assert_eq!(store.list()[0], result);
    }

    #[test]
    fn test_record_accepts_empty_strings() {
        let mut store = HistoryStore::default();
        store.record("", "");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_empties() {
        let mut store = HistoryStore::new(3);
        for i in 0..7 {
            store.record(i.to_string(), "{}");
        }
        store.clear();
        assert!(store.list().is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_is_stable_after_mutation() {
        let mut store = HistoryStore::new(2);
        store.record("a", "{}");
        store.record("b", "{}");
        let before = store.list();

        store.record("c", "{}");
        assert_eq!(inputs(&before), vec!["b", "a"]);
        assert_eq!(inputs(&store.list()), vec!["c", "b"]);

        store.clear();
        assert_eq!(inputs(&before), vec!["b", "a"]);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_insert_preserves_identity() {
        let mut store = HistoryStore::default();
        let result = ConversionResult::new("x", "{}");
        let stored = store.insert(result.clone());
        assert_eq!(stored, result);
        assert_eq!(store.latest(), Some(result));
    }

    #[test]
    fn test_zero_capacity_is_coerced() {
        let mut store = HistoryStore::new(0);
        assert_eq!(store.capacity(), 1);
        store.record("a", "{}");
        store.record("b", "{}");
        assert_eq!(inputs(&store.list()), vec!["b"]);
    }

    #[test]
    fn test_previews_follow_order() {
        let mut store = HistoryStore::default();
        store.record("first\nsecond line", "{}");
        store.record("  other  ", "{}");
        let previews = store.previews();
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].preview, "other");
        assert_eq!(previews[1].preview, "first");
    }
}
