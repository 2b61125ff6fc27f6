//! Domain types for dmenu-cache.
//!
//! - [`FrequencyTable`]: term → usage count, with aging and ranked iteration

mod table;

pub use table::*;
