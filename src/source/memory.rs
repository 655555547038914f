//! In-memory record provider.

use super::{slice_page, RecordProvider};
use crate::model::{FetchError, FetchedPage, PageIndex, Record};

/// Serves pages out of a record list held in memory.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    records: Vec<Record>,
    page_size: usize,
}

impl MemoryProvider {
    /// Create a provider that splits `records` into pages of `page_size`.
    pub fn new(records: Vec<Record>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl RecordProvider for MemoryProvider {
    fn fetch_page(&self, index: PageIndex) -> Result<FetchedPage, FetchError> {
        slice_page(&self.records, index, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    #[test]
    fn fetch_page_serves_requested_window() {
        let records = (1..=24).map(|id| Record::bare(RecordId::new(id))).collect();
        let provider = MemoryProvider::new(records, 12);
        let page = provider.fetch_page(PageIndex::new(1)).unwrap();
        assert_eq!(page.records.first().map(Record::id), Some(RecordId::new(13)));
        assert_eq!(page.total_count, 24);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let provider = MemoryProvider::new(Vec::new(), 0);
        assert_eq!(provider.page_size(), 1);
    }
}
