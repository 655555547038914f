//! Records and pages as delivered by a record provider.

use crate::model::identifiers::{PageIndex, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder rendered for an absent or blank attribute.
pub const EMPTY_CELL: &str = "-";

/// One item of the remote dataset.
///
/// Identity is by `id` only; `attributes` are display data and never take
/// part in selection logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Record {
    /// Create a record with the given display attributes.
    pub fn new(id: RecordId, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }
    }

    /// Create a record with no attributes.
    pub fn bare(id: RecordId) -> Self {
        Self::new(id, Map::new())
    }

    /// Add or replace one attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The record identifier.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Raw attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Attribute rendered as a single table cell.
    ///
    /// Strings are trimmed; null, absent and blank values become [`EMPTY_CELL`].
    pub fn display(&self, name: &str) -> String {
        let text = match self.attributes.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        };
        if text.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            text
        }
    }
}

/// Result of one provider call: the records of a page plus the total record
/// count across all pages as reported by the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    /// Records on the page, in display order.
    pub records: Vec<Record>,
    /// Total records across all pages.
    pub total_count: u64,
}

/// The currently loaded window of records.
///
/// A page is replaced wholesale on navigation and never merged with another.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    index: PageIndex,
    records: Vec<Record>,
    total_count: u64,
}

impl Page {
    /// Build a page from its parts.
    pub fn new(index: PageIndex, records: Vec<Record>, total_count: u64) -> Self {
        Self {
            index,
            records,
            total_count,
        }
    }

    /// Build a page from a provider response.
    pub fn from_fetched(index: PageIndex, fetched: FetchedPage) -> Self {
        Self::new(index, fetched.records, fetched.total_count)
    }

    /// Index of this page.
    pub fn index(&self) -> PageIndex {
        self.index
    }

    /// Records in display order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Total records across all pages, as last reported.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record identifiers in page order.
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().map(Record::id)
    }

    /// Whether a record with `id` is on this page.
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    /// Record at a row position.
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }
}

/// Number of pages needed to show `total_count` records, never less than 1.
pub fn total_pages(total_count: u64, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    let total = usize::try_from(total_count).unwrap_or(usize::MAX);
    total.div_ceil(page_size).max(1)
}
