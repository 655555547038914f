//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state.
//! Transitions are pure: they never fetch or draw. Anything that needs the
//! outside world is returned as an [`Effect`] for the shell to execute.

use crate::model::{total_pages, KeyAction, Page, PageIndex, RecordId};
use crate::state::page_store::{LoadOutcome, PageStore};
use crate::state::select_input::{self, SelectInput};
use crate::state::selection::{SelectCount, SelectionSet};
use std::collections::BTreeSet;

/// Side effect requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do beyond redrawing.
    None,
    /// Fetch the given page.
    Load(PageIndex),
    /// Exit the application.
    Quit,
}

/// One-line feedback shown under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Confirmation of a user action.
    Info(String),
    /// A recoverable error (failed fetch, invalid input).
    Error(String),
}

impl StatusMessage {
    /// Message text.
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }
}

/// Application state. Pure data, no side effects.
///
/// # State
///
/// - **Page store**: the single resident page and the in-flight request
/// - **Selection**: ids checked on any page visited this session
/// - **Cursor**: row under the keyboard cursor on the visible page
/// - **Select input**: the "select first N" popover
#[derive(Debug)]
pub struct AppState {
    store: PageStore,
    selection: SelectionSet,
    page_size: usize,

    /// Row under the cursor (0-based) on the visible page.
    pub cursor: usize,

    /// "Select first N" popover state.
    pub select_input: SelectInput,

    /// Feedback from the last action, if any.
    pub status: Option<StatusMessage>,
}

impl AppState {
    /// Create state for pages of `page_size` rows, with nothing loaded.
    pub fn new(page_size: usize) -> Self {
        Self {
            store: PageStore::new(),
            selection: SelectionSet::new(),
            page_size: page_size.max(1),
            cursor: 0,
            select_input: SelectInput::Closed,
            status: None,
        }
    }

    // ===== Queries =====

    /// The page currently displayed, if one has loaded.
    pub fn page(&self) -> Option<&Page> {
        self.store.page()
    }

    /// Whether a page fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// The page store (read-only).
    pub fn page_store(&self) -> &PageStore {
        &self.store
    }

    /// The page store, for the loader to issue and resolve requests.
    pub fn page_store_mut(&mut self) -> &mut PageStore {
        &mut self.store
    }

    /// The cross-page selection (read-only).
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page the paginator points at.
    ///
    /// While a fetch is outstanding this is the requested page; otherwise the
    /// page actually held, so a failed navigation falls back to it.
    pub fn current_index(&self) -> PageIndex {
        let held = self.page().map(Page::index);
        let requested = self.store.requested_index();
        let preferred = if self.store.is_loading() {
            requested.or(held)
        } else {
            held.or(requested)
        };
        preferred.unwrap_or(PageIndex::FIRST)
    }

    /// Number of pages, once a page has reported the total count.
    pub fn total_pages(&self) -> Option<usize> {
        self.page()
            .map(|page| total_pages(page.total_count(), self.page_size))
    }

    /// Ids on the visible page that render as checked.
    pub fn visible_selection(&self) -> BTreeSet<RecordId> {
        self.page()
            .map(|page| self.selection.visible_selection(page))
            .unwrap_or_default()
    }

    /// Total selected ids across all pages.
    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    // ===== Transitions =====

    /// Handle a key action while the popover is closed.
    pub fn handle_action(&mut self, action: KeyAction) -> Effect {
        match action {
            KeyAction::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                Effect::None
            }
            KeyAction::CursorDown => {
                let rows = self.page().map_or(0, Page::len);
                if self.cursor + 1 < rows {
                    self.cursor += 1;
                }
                Effect::None
            }
            KeyAction::ToggleRow => {
                self.toggle_row(self.cursor);
                Effect::None
            }
            KeyAction::TogglePage => {
                self.toggle_page();
                Effect::None
            }
            KeyAction::OpenSelectCount => {
                self.select_input = select_input::open(std::mem::take(&mut self.select_input));
                Effect::None
            }
            KeyAction::NextPage => self.navigate(self.current_index().next()),
            KeyAction::PrevPage => match self.current_index().prev() {
                Some(prev) => self.navigate(prev),
                None => Effect::None,
            },
            KeyAction::FirstPage => self.navigate(PageIndex::FIRST),
            KeyAction::LastPage => match self.total_pages() {
                Some(pages) => self.navigate(PageIndex::new(pages - 1)),
                None => Effect::None,
            },
            KeyAction::Reload => Effect::Load(self.current_index()),
            KeyAction::Quit => Effect::Quit,
        }
    }

    fn navigate(&mut self, target: PageIndex) -> Effect {
        if target == self.current_index() {
            return Effect::None;
        }
        if let Some(pages) = self.total_pages() {
            if target.get() >= pages {
                return Effect::None;
            }
        }
        Effect::Load(target)
    }

    /// Flip the checkbox of one visible row.
    ///
    /// The change is expressed as the full new checked set of the page, the
    /// same way the table widget reports it.
    pub fn toggle_row(&mut self, row: usize) {
        let Some(page) = self.store.page() else {
            return;
        };
        let Some(record) = page.record(row) else {
            return;
        };
        let id = record.id();
        let mut checked = self.selection.visible_selection(page);
        if !checked.remove(&id) {
            checked.insert(id);
        }
        self.selection.apply_page_selection_change(page, &checked);
    }

    /// Header checkbox: clear the page if every row is checked, otherwise
    /// check every row.
    pub fn toggle_page(&mut self) {
        let Some(page) = self.store.page() else {
            return;
        };
        let checked = self.selection.visible_selection(page);
        let next = if !page.is_empty() && checked.len() == page.len() {
            BTreeSet::new()
        } else {
            page.ids().collect()
        };
        self.selection.apply_page_selection_change(page, &next);
    }

    /// Forward a typed character to the popover.
    pub fn select_input_char(&mut self, ch: char) {
        let state = std::mem::take(&mut self.select_input);
        self.select_input = select_input::handle_char_input(state, ch);
    }

    /// Backspace in the popover.
    pub fn select_input_backspace(&mut self) {
        let state = std::mem::take(&mut self.select_input);
        self.select_input = select_input::handle_backspace(state);
    }

    /// Move the popover cursor left.
    pub fn select_input_left(&mut self) {
        let state = std::mem::take(&mut self.select_input);
        self.select_input = select_input::handle_cursor_left(state);
    }

    /// Move the popover cursor right.
    pub fn select_input_right(&mut self) {
        let state = std::mem::take(&mut self.select_input);
        self.select_input = select_input::handle_cursor_right(state);
    }

    /// Dismiss the popover without applying it.
    pub fn cancel_select_count(&mut self) {
        let state = std::mem::take(&mut self.select_input);
        self.select_input = select_input::close(state);
    }

    /// Apply the popover: check the first N rows of the visible page.
    ///
    /// Invalid input keeps the popover open and sets an error status; the
    /// selection is not touched. On success the popover closes and its text
    /// is cleared.
    pub fn submit_select_count(&mut self) {
        if !self.select_input.is_open() {
            return;
        }
        let count = match SelectCount::parse(self.select_input.text()) {
            Ok(count) => count,
            Err(err) => {
                tracing::debug!(%err, "rejected select count");
                self.status = Some(StatusMessage::Error("Enter a valid number".to_string()));
                return;
            }
        };
        let Some(page) = self.store.page() else {
            self.status = Some(StatusMessage::Error("No page loaded yet".to_string()));
            return;
        };
        let taken = self.selection.select_first(page, count);
        self.status = Some(StatusMessage::Info(format!(
            "Selected first {taken} rows of page {}",
            page.index().page_number()
        )));
        self.cancel_select_count();
    }

    /// React to a resolved page request.
    pub fn on_load_outcome(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Applied { .. } => {
                self.cursor = 0;
                if matches!(self.status, Some(StatusMessage::Error(_))) {
                    self.status = None;
                }
            }
            LoadOutcome::Failed { error, .. } => {
                self.status = Some(StatusMessage::Error(error.to_string()));
            }
            LoadOutcome::Stale { .. } => {}
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
