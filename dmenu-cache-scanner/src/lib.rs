//! # dmenu-cache Scanner
//!
//! Discovers the terms a launcher can currently offer by listing every
//! directory on the search path.
//!
//! ## Features
//!
//! - **Deduplication**: Names found in several directories are reported once
//! - **Best effort**: Missing or unreadable directories are skipped
//!
//! ## Example
//!
//! ```rust,no_run
//! use dmenu_cache_core::TermSource;
//! use dmenu_cache_scanner::PathScanner;
//!
//! let scanner = PathScanner::from_env();
//! let terms = scanner.valid_terms();
//! println!("{} executables on PATH", terms.len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use dmenu_cache_core::constants::SEARCH_PATH_ENV;
use dmenu_cache_core::traits::TermSource;

/// Lists directory entries across a search path.
#[derive(Clone, Debug, Default)]
pub struct PathScanner {
    /// Directories to scan, in search-path order
    dirs: Vec<PathBuf>,
}

impl PathScanner {
    /// Creates a scanner over the given directories.
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Creates a scanner over the directories in `$PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(SEARCH_PATH_ENV) {
            Some(paths) => Self::from_search_path(&paths),
            None => {
                debug!("{} is unset, no terms to scan", SEARCH_PATH_ENV);
                Self::default()
            }
        }
    }

    /// Creates a scanner from a platform search-path string (`:`-separated on Unix).
    pub fn from_search_path(paths: &OsStr) -> Self {
        Self::new(std::env::split_paths(paths).filter(|p| !p.as_os_str().is_empty()))
    }

    /// Collects entry names from one directory into `terms`.
    fn scan_dir(dir: &Path, terms: &mut HashSet<String>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                return;
            }
        };

        for entry in entries.flatten() {
            match entry.file_name().into_string() {
                Ok(name) => {
                    terms.insert(name);
                }
                Err(name) => {
                    debug!(name = ?name, "Skipping non UTF-8 entry");
                }
            }
        }
    }
}

impl TermSource for PathScanner {
    #[instrument(skip(self), fields(dirs = self.dirs.len()))]
    fn valid_terms(&self) -> HashSet<String> {
        let mut terms = HashSet::new();
        for dir in &self.dirs {
            Self::scan_dir(dir, &mut terms);
        }
        debug!(count = terms.len(), "Scanned search path");
        terms
    }
}
