//! Cross-page selection model (pure).
//!
//! The selection is a set of record ids accumulated over every page visited
//! in the session. Only the currently loaded page is ever materialized, so
//! every mutation is scoped to the ids of one page: ids belonging to other
//! pages are never touched, whether or not those pages are loaded.

use crate::model::{InvalidSelectionCount, Page, RecordId, SelectionError};
use std::collections::BTreeSet;
use tracing::debug;

/// Validated "select first N" count.
///
/// Smart constructor for user-entered counts; only positive integers pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectCount(usize);

impl SelectCount {
    /// Validate a numeric count.
    pub fn new(n: i64) -> Result<Self, InvalidSelectionCount> {
        if n <= 0 {
            return Err(InvalidSelectionCount::NonPositive { value: n });
        }
        Ok(Self(usize::try_from(n).unwrap_or(usize::MAX)))
    }

    /// Parse typed input by its leading integer.
    ///
    /// Leading whitespace and one `+` or `-` sign are accepted, then the run
    /// of decimal digits that follows; anything after the digits is ignored,
    /// so `"5abc"` and `"2.5"` read as 5 and 2. Input with no digits is not a
    /// number. Counts too large for the platform saturate and later clamp to
    /// the page length.
    pub fn parse(input: &str) -> Result<Self, InvalidSelectionCount> {
        let unsigned = input.trim_start();
        let (negative, unsigned) = match unsigned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, unsigned.strip_prefix('+').unwrap_or(unsigned)),
        };
        let digits_end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let digits = &unsigned[..digits_end];
        if digits.is_empty() {
            return Err(InvalidSelectionCount::NotANumber {
                input: input.to_string(),
            });
        }

        let magnitude = digits.bytes().fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        });
        if negative || magnitude == 0 {
            let value = match i64::try_from(magnitude) {
                Ok(m) if negative => -m,
                Ok(m) => m,
                Err(_) => i64::MIN,
            };
            return Err(InvalidSelectionCount::NonPositive { value });
        }
        Ok(Self(usize::try_from(magnitude).unwrap_or(usize::MAX)))
    }

    /// The count.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Set of selected record ids, independent of which page they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: BTreeSet<RecordId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of `page` that are currently selected.
    ///
    /// This is the only source of checkbox state for a page: revisiting a page
    /// reconstructs its checked rows from here.
    pub fn visible_selection(&self, page: &Page) -> BTreeSet<RecordId> {
        page.ids().filter(|id| self.selected.contains(id)).collect()
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    /// Replace the selected ids of `page` with exactly `now_checked`.
    ///
    /// Every id on the page is removed first, then each id in `now_checked`
    /// that is on the page is added. Ids outside the page are ignored.
    pub fn apply_page_selection_change(&mut self, page: &Page, now_checked: &BTreeSet<RecordId>) {
        let on_page: BTreeSet<RecordId> = page.ids().collect();
        for id in &on_page {
            self.selected.remove(id);
        }
        for &id in now_checked {
            if on_page.contains(&id) {
                self.selected.insert(id);
            } else {
                debug!(%id, page = %page.index(), "ignoring checked id not on page");
            }
        }
        debug!(
            page = %page.index(),
            visible = now_checked.len(),
            total = self.selected.len(),
            "page selection replaced"
        );
    }

    /// Check exactly the first `n` rows of `page` (clamped to the page length)
    /// and uncheck the rest of the page.
    ///
    /// Scoped to `page` only. Returns the number of rows now checked.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidSelectionCount` for `n <= 0`; the
    /// selection is left unchanged.
    pub fn select_first_n(&mut self, page: &Page, n: i64) -> Result<usize, SelectionError> {
        let count = SelectCount::new(n)?;
        Ok(self.select_first(page, count))
    }

    /// [`select_first_n`](Self::select_first_n) for an already validated count.
    pub fn select_first(&mut self, page: &Page, count: SelectCount) -> usize {
        let take = count.get().min(page.len());
        let now_checked: BTreeSet<RecordId> = page.ids().take(take).collect();
        self.apply_page_selection_change(page, &now_checked);
        take
    }

    /// Number of selected ids across all pages.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.selected.iter().copied()
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
