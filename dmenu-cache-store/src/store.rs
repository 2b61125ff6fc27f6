//! JSON file persistence for the frequency table.
//!
//! # File Format
//!
//! ```text
//! {
//!   "firefox": 12,
//!   "vim": 40
//! }
//! ```
//!
//! A flat object of term → count, pretty-printed with two-space indentation
//! and keys in ascending order. Entries that are not a non-empty term with a
//! non-negative integer count are dropped on load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use dmenu_cache_core::error::{CacheError, Result};
use dmenu_cache_core::types::FrequencyTable;

/// Reads and writes the persisted frequency table.
#[derive(Clone, Debug)]
pub struct JsonStore {
    /// Path to the storage file
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store backed by the given file. Nothing is read or written yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the table from disk.
    ///
    /// Fails if the file cannot be read or is not a JSON object. Individual
    /// malformed entries are skipped with a warning.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<FrequencyTable> {
        let contents = fs::read_to_string(&self.path)?;
        let entries: Map<String, Value> = serde_json::from_str(&contents)?;

        let mut skipped = 0usize;
        let table: FrequencyTable = entries
            .into_iter()
            .filter_map(|(term, value)| match value.as_u64() {
                Some(count) if !term.is_empty() => Some((term, count)),
                _ => {
                    warn!(term = %term, value = %value, "Skipping malformed cache entry");
                    skipped += 1;
                    None
                }
            })
            .collect();

        info!(count = table.len(), skipped, "Loaded frequency table");
        Ok(table)
    }

    /// Moves an unreadable cache file aside so the next save does not
    /// destroy it. Returns the backup path.
    pub fn quarantine(&self) -> Result<PathBuf> {
        let backup = self.path.with_extension("json.bad");
        fs::rename(&self.path, &backup)?;
        Ok(backup)
    }

    /// Creates the directory holding the cache file.
    ///
    /// An existing directory is not an error.
    pub fn ensure_dir(&self) -> Result<()> {
        let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        match fs::create_dir_all(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(CacheError::StorageDirectory {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the table to disk, replacing any previous content.
    #[instrument(skip(self, table), fields(path = %self.path.display()))]
    pub fn save(&self, table: &FrequencyTable) -> Result<()> {
        let mut serialized = serde_json::to_string_pretty(&table.to_sorted_map())?;
        serialized.push('\n');

        info!(count = table.len(), "Saving frequency table");

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serialized)?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove temp file");
            }
            return Err(e.into());
        }

        debug!("Frequency table saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn sample() -> FrequencyTable {
        [("vim".to_string(), 10), ("nano".to_string(), 3)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("cache.json"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, CacheError::IoError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("cache.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn test_file_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let store = JsonStore::new(&path);

        store.save(&sample()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"nano\": 3,\n  \"vim\": 10\n}\n");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("cache.json"));

        store.save(&sample()).unwrap();
        store.save(&FrequencyTable::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, b"not json").unwrap();

        let err = JsonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CacheError::JsonError(_)));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(
            &path,
            br#"{"vim": 40, "firefox": 12, "x": -1, "y": 2.5, "z": "3", "": 4}"#,
        )
        .unwrap();

        let table = JsonStore::new(&path).load().unwrap();
        let expected: FrequencyTable = [("vim".to_string(), 40), ("firefox".to_string(), 12)]
            .into_iter()
            .collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn test_non_object_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, b"[1, 2, 3]").unwrap();

        let err = JsonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CacheError::JsonError(_)));
    }

    #[test]
    fn test_quarantine() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, b"garbage").unwrap();

        let backup = JsonStore::new(&path).quarantine().unwrap();
        assert_eq!(backup, dir.path().join("cache.json.bad"));
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(backup).unwrap(), "garbage");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::create_dir(&path).unwrap();

        let err = JsonStore::new(&path).save(&sample()).unwrap_err();
        assert!(matches!(err, CacheError::IoError(_)));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_ensure_dir_creates_and_tolerates_existing() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("a").join("b").join("cache.json"));

        store.ensure_dir().unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        store.ensure_dir().unwrap();
    }

    #[test]
    fn test_ensure_dir_fails_under_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let store = JsonStore::new(blocker.join("sub").join("cache.json"));
        let err = store.ensure_dir().unwrap_err();
        assert!(matches!(err, CacheError::StorageDirectory { .. }));
    }

    #[test]
    fn test_atomic_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let store = JsonStore::new(&path);

        store.save(&sample()).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.exists());
    }

    proptest! {
        #[test]
        fn prop_save_load_roundtrip(
            counts in prop::collection::hash_map("\\PC{1,12}", any::<u64>(), 0..30)
        ) {
            let dir = tempdir().unwrap();
            let store = JsonStore::new(dir.path().join("cache.json"));
            let table = FrequencyTable::from(counts.clone());

            store.save(&table).unwrap();
            let loaded = store.load().unwrap();

            prop_assert_eq!(loaded.len(), counts.len());
            for (term, count) in &counts {
                prop_assert_eq!(loaded.get(term), Some(*count));
            }
        }
    }
}
