//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod record;

// Re-export for convenience
pub use error::{AppError, FetchError, InvalidSelectionCount, SelectionError};
pub use identifiers::{PageIndex, RecordId};
pub use key_action::KeyAction;
pub use record::{total_pages, FetchedPage, Page, Record, EMPTY_CELL};
