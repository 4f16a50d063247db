// src/reconciler.rs

use crate::fetcher::FetchError;
use crate::models::{LogEntry, Page};
use log::debug;

/// One addressable position of the render list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Entry(LogEntry),
    Empty,
}

impl Slot {
    pub fn entry(&self) -> Option<&LogEntry> {
        match self {
            Slot::Entry(entry) => Some(entry),
            Slot::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// Everything the client has seen so far, addressed by server offset.
///
/// Slots are only appended or overwritten by a page; the single exception is a
/// failed fetch, which clears the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderList {
    slots: Vec<Slot>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Places `page` at its offset, padding any gap before it with empty slots.
    pub fn apply_page(&mut self, page: Page) {
        let start = page.offset();
        if start > self.slots.len() {
            self.slots.resize(start, Slot::Empty);
        }

        let count = page.records.len();
        for (i, record) in page.records.into_iter().enumerate() {
            let index = start + i;
            if index < self.slots.len() {
                self.slots[index] = Slot::Entry(record);
            } else {
                self.slots.push(Slot::Entry(record));
            }
        }
        debug!(
            "placed {} records at offset {} ({} slots)",
            count,
            start,
            self.slots.len()
        );
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Merges a fetch outcome into `current` and returns the new baseline.
///
/// A failed fetch leaves nothing on screen: stale rows are dropped rather than
/// shown as if they were current.
pub fn reconcile(mut current: RenderList, outcome: Result<Page, &FetchError>) -> RenderList {
    match outcome {
        Ok(page) => current.apply_page(page),
        Err(err) => {
            debug!("clearing {} slots after failed fetch: {}", current.len(), err);
            current.clear();
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::ViewWindow;
    use std::num::NonZeroUsize;

    fn record(key: &str) -> LogEntry {
        LogEntry {
            key: key.to_string(),
            message: format!("message {}", key),
            environment: "dev".to_string(),
            app_version: "1.0.0".to_string(),
            device_name: "test".to_string(),
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    fn page(offset: usize, keys: &[&str]) -> Page {
        Page::new(
            ViewWindow::new(offset, NonZeroUsize::new(100).unwrap()),
            keys.iter().map(|k| record(k)).collect(),
        )
    }

    #[test]
    fn test_gap_filling() {
        let list = reconcile(RenderList::new(), Ok(page(5, &["a", "b"])));
        assert_eq!(list.len(), 7);
        for i in 0..5 {
            assert_eq!(list.get(i), Some(&Slot::Empty));
        }
        assert_eq!(list.get(5).and_then(Slot::entry).unwrap().key, "a");
        assert_eq!(list.get(6).and_then(Slot::entry).unwrap().key, "b");
    }

    #[test]
    fn test_idempotent_overwrite() {
        let start = reconcile(RenderList::new(), Ok(page(0, &["x", "y", "z"])));
        let once = reconcile(start.clone(), Ok(page(1, &["b", "c"])));
        let twice = reconcile(once.clone(), Ok(page(1, &["b", "c"])));
        assert_eq!(once, twice);
        assert_eq!(reconcile(start, Ok(page(1, &["b", "c"]))), once);
    }

    #[test]
    fn test_overwrite_leaves_other_rows_untouched() {
        let list = reconcile(RenderList::new(), Ok(page(0, &["a", "b", "c", "d"])));
        let list = reconcile(list, Ok(page(1, &["B"])));
        let keys: Vec<_> = list
            .slots()
            .iter()
            .map(|s| s.entry().unwrap().key.clone())
            .collect();
        assert_eq!(keys, ["a", "B", "c", "d"]);
    }

    #[test]
    fn test_page_overlapping_tail_appends() {
        let list = reconcile(RenderList::new(), Ok(page(0, &["a", "b"])));
        let list = reconcile(list, Ok(page(1, &["B", "C", "D"])));
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(3).and_then(Slot::entry).unwrap().key, "D");
    }

    #[test]
    fn test_empty_page_places_nothing() {
        let list = reconcile(RenderList::new(), Ok(page(0, &["a"])));
        let list = reconcile(list, Ok(page(1, &[])));
        assert_eq!(list.len(), 1);
        assert_eq!(list.populated(), 1);
    }

    #[test]
    fn test_error_clears_view() {
        let list = reconcile(RenderList::new(), Ok(page(0, &["a", "b"])));
        assert!(!list.is_empty());
        let err = FetchError::ExhaustedRetries { attempts: 3 };
        let list = reconcile(list, Err(&err));
        assert!(list.is_empty());
    }
}
