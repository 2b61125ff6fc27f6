//! # dmenu-cache Core
//!
//! Core types, errors, and configuration for the dmenu-cache frequency ranker.
//!
//! This crate provides the foundational building blocks used by all other dmenu-cache crates:
//!
//! - **Types**: The [`FrequencyTable`] with its aging and ordering rules
//! - **Errors**: A single error enum with storage and contract-violation variants
//! - **Constants**: Tuning factors and storage layout
//! - **Config**: [`CacheConfig`], resolved from the XDG environment
//! - **Traits**: [`TermSource`], the seam for "currently valid terms"
//!
//! ## Example
//!
//! ```rust
//! use dmenu_cache_core::FrequencyTable;
//!
//! # fn main() -> dmenu_cache_core::Result<()> {
//! let mut table = FrequencyTable::new();
//! table.add("vim", 5)?;
//! table.add("vim", 5)?;
//! assert_eq!(table.get("vim"), Some(10));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::CacheConfig;
pub use constants::*;
pub use error::{CacheError, Result};
pub use traits::TermSource;
pub use types::*;
