//! pagesel
//!
//! Browse a paginated record set in a terminal table and build a selection
//! that spans pages. Only one page of records is ever resident; the
//! selection is a set of record ids that outlives every page.
//!
//! Pure core (`model`, `state`) and impure shell (`source`, `view`).

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
