//! # dmenu-cache Store
//!
//! The disk-persisted frequency cache behind dmenu-cache.
//!
//! - **Session**: [`Cache`] loads the table on open and writes it back on close
//! - **Persistence**: [`JsonStore`] keeps the table as a flat JSON object
//!
//! ## Example
//!
//! ```rust,no_run
//! use dmenu_cache_core::{CacheConfig, Result};
//! use dmenu_cache_store::Cache;
//!
//! fn main() -> Result<()> {
//!     let config = CacheConfig::from_env()?;
//!
//!     // The session is persisted even if the block fails
//!     let ranked = Cache::with_session(config, |cache| {
//!         cache.use_term("firefox")?;
//!         cache.show(&["firefox", "vim"])
//!     })?;
//!
//!     for term in ranked {
//!         println!("{term}");
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod session;
mod store;

pub use session::{Cache, ReseedReport};
pub use store::JsonStore;
