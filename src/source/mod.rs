//! Record providers.
//!
//! This module provides the sources a page can be fetched from:
//! - [`MemoryProvider`] for records already held in memory
//! - [`FileProvider`] for a JSONL file of records
//! - [`PageLoader`] to run any provider off the event thread

use crate::model::{total_pages, FetchError, FetchedPage, PageIndex, Record};

pub mod file;
pub mod loader;
pub mod memory;

pub use file::FileProvider;
pub use loader::{LoadResponse, PageLoader};
pub use memory::MemoryProvider;

/// A source of pages of records.
///
/// Implementations may block; [`PageLoader`] calls them from worker threads.
pub trait RecordProvider: Send + Sync {
    /// Fetch the records of one page and the total record count.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the page cannot be produced.
    fn fetch_page(&self, index: PageIndex) -> Result<FetchedPage, FetchError>;
}

impl<P: RecordProvider + ?Sized> RecordProvider for std::sync::Arc<P> {
    fn fetch_page(&self, index: PageIndex) -> Result<FetchedPage, FetchError> {
        (**self).fetch_page(index)
    }
}

/// Slice one page out of a fully materialized record list.
///
/// Requests past the last page are an error, except page 0 of an empty set
/// which yields an empty page.
pub(crate) fn slice_page(
    records: &[Record],
    index: PageIndex,
    page_size: usize,
) -> Result<FetchedPage, FetchError> {
    let total_count = records.len() as u64;
    let pages = total_pages(total_count, page_size);
    if index.get() >= pages {
        return Err(FetchError::PageOutOfRange {
            index,
            total_pages: pages,
        });
    }
    let start = index.get().saturating_mul(page_size).min(records.len());
    let end = start.saturating_add(page_size).min(records.len());
    Ok(FetchedPage {
        records: records[start..end].to_vec(),
        total_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    fn records(n: i64) -> Vec<Record> {
        (1..=n).map(|id| Record::bare(RecordId::new(id))).collect()
    }

    #[test]
    fn slice_page_returns_window_and_total() {
        let page = slice_page(&records(30), PageIndex::new(1), 12).unwrap();
        let ids: Vec<i64> = page.records.iter().map(|r| r.id().get()).collect();
        assert_eq!(ids, (13..=24).collect::<Vec<_>>());
        assert_eq!(page.total_count, 30);
    }

    #[test]
    fn slice_page_last_page_is_short() {
        let page = slice_page(&records(30), PageIndex::new(2), 12).unwrap();
        assert_eq!(page.records.len(), 6);
    }

    #[test]
    fn slice_page_past_end_is_out_of_range() {
        let result = slice_page(&records(30), PageIndex::new(3), 12);
        assert_eq!(
            result,
            Err(FetchError::PageOutOfRange {
                index: PageIndex::new(3),
                total_pages: 3
            })
        );
    }

    #[test]
    fn slice_page_first_page_of_empty_set_is_empty() {
        let page = slice_page(&[], PageIndex::FIRST, 12).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_count, 0);
    }
}
