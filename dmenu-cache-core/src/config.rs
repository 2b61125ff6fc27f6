//! Cache configuration.
//!
//! Paths and tuning factors travel together in [`CacheConfig`], which is
//! handed to the cache session when it opens.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::constants::{
    CACHE_DIR_NAME, CACHE_FILE_NAME, DATA_HOME_ENV, DATA_HOME_FALLBACK, DEFAULT_AGE_FACTOR,
    DEFAULT_USE_FACTOR,
};
use crate::error::{CacheError, Result};

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Location of the persisted frequency table
    pub path: PathBuf,
    /// Weight added per use
    pub use_factor: u64,
    /// Weight removed per aging pass
    pub age_factor: u64,
}

impl CacheConfig {
    /// Creates a configuration for the given cache file with default factors.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            use_factor: DEFAULT_USE_FACTOR,
            age_factor: DEFAULT_AGE_FACTOR,
        }
    }

    /// Resolves the cache location from the environment.
    ///
    /// Uses `$XDG_DATA_HOME/dmenu_cache/cache.json`, falling back to
    /// `~/.local/share` when the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let path = resolve_cache_path(std::env::var_os(DATA_HOME_ENV), dirs::home_dir())?;
        Ok(Self::new(path))
    }

    /// Overrides the use factor.
    pub fn with_use_factor(mut self, use_factor: u64) -> Self {
        self.use_factor = use_factor;
        self
    }

    /// Overrides the age factor.
    pub fn with_age_factor(mut self, age_factor: u64) -> Self {
        self.age_factor = age_factor;
        self
    }
}

/// Builds the cache file path from an optional data home and an optional
/// home directory.
pub fn resolve_cache_path(data_home: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    let base = match data_home.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let mut base = home.ok_or_else(|| {
                CacheError::ConfigError(format!(
                    "{DATA_HOME_ENV} is unset and no home directory is available"
                ))
            })?;
            for seg in DATA_HOME_FALLBACK {
                base.push(seg);
            }
            base
        }
    };

    Ok(base.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME))
}
