//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod page_store;
pub mod select_input;
pub mod selection;

// Re-export for convenience
pub use app_state::{AppState, Effect, StatusMessage};
pub use page_store::{LoadOutcome, LoadRequest, PageStore, RequestToken};
pub use select_input::SelectInput;
pub use selection::{SelectCount, SelectionSet};
