//! Core identifier newtypes.
//!
//! Record identity is by `RecordId` only. Page indices are 0-based
//! internally and rendered 1-based for humans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a record in the remote dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-based index of a page in the paginated record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(usize);

impl PageIndex {
    /// The first page.
    pub const FIRST: PageIndex = PageIndex(0);

    /// Create from a zero-based index.
    pub const fn new(zero_based: usize) -> Self {
        Self(zero_based)
    }

    /// Smart constructor from a human (1-based) page number.
    ///
    /// Returns `None` for page number 0.
    pub fn from_page_number(number: usize) -> Option<Self> {
        number.checked_sub(1).map(Self)
    }

    /// Zero-based index.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Human-facing 1-based page number.
    pub const fn page_number(self) -> usize {
        self.0 + 1
    }

    /// The following page index.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page index, or `None` on the first page.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.page_number())
    }
}
