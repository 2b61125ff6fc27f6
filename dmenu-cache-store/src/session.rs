//! Cache session: load on open, mutate, persist on close.

use std::collections::HashSet;
use std::io::ErrorKind;

use tracing::{debug, instrument, warn};

use dmenu_cache_core::config::CacheConfig;
use dmenu_cache_core::error::{CacheError, Result};
use dmenu_cache_core::traits::TermSource;
use dmenu_cache_core::types::FrequencyTable;

use crate::store::JsonStore;

/// Outcome of reconciling the table against the valid term set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReseedReport {
    /// Valid terms that were missing and got seeded at zero weight
    pub inserted: usize,
    /// Terms that are no longer valid and were dropped
    pub removed: usize,
}

/// A disk-persisted frequency cache session.
///
/// Opening loads the persisted table; closing writes it back. Between the
/// two, every operation works on the in-memory table only. Once closed,
/// every operation fails with [`CacheError::SessionClosed`].
///
/// A session dropped without [`close`](Self::close) still persists its
/// table, but any write error is only logged. Prefer
/// [`with_session`](Self::with_session) or an explicit `close`.
#[derive(Debug)]
pub struct Cache {
    /// In-memory table; `None` once the session is closed
    table: Option<FrequencyTable>,
    store: JsonStore,
    config: CacheConfig,
}

impl Cache {
    /// Opens a session, loading the persisted table.
    ///
    /// A missing or unreadable cache file yields an empty table; the storage
    /// directory is then created so the closing write can succeed. A file
    /// that is not a JSON object is renamed to `*.json.bad` first.
    #[instrument(skip(config), fields(path = %config.path.display()))]
    pub fn open(config: CacheConfig) -> Result<Self> {
        let store = JsonStore::new(&config.path);

        let table = match store.load() {
            Ok(table) => table,
            Err(CacheError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache file yet, starting empty");
                store.ensure_dir()?;
                FrequencyTable::new()
            }
            Err(e) => {
                warn!(path = %store.path().display(), error = %e, "Unreadable cache file, starting empty");
                if matches!(e, CacheError::JsonError(_)) {
                    match store.quarantine() {
                        Ok(backup) => warn!(backup = %backup.display(), "Moved unreadable cache file aside"),
                        Err(err) => warn!(error = %err, "Failed to move unreadable cache file aside"),
                    }
                }
                store.ensure_dir()?;
                FrequencyTable::new()
            }
        };

        Ok(Self {
            table: Some(table),
            store,
            config,
        })
    }

    /// Runs `f` inside a session and closes it afterwards, even if `f` fails.
    ///
    /// An error from `f` takes precedence over an error from closing.
    pub fn with_session<T, E, F>(config: CacheConfig, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Cache) -> std::result::Result<T, E>,
        E: From<CacheError>,
    {
        let mut cache = Cache::open(config)?;
        let outcome = f(&mut cache);
        let closed = cache.close();

        match outcome {
            Ok(value) => {
                closed?;
                Ok(value)
            }
            Err(e) => {
                if let Err(close_err) = closed {
                    warn!(error = %close_err, "Failed to persist cache after an earlier error");
                }
                Err(e)
            }
        }
    }

    /// Persists the table and ends the session.
    ///
    /// Fails with [`CacheError::SessionClosed`] if the session already ended.
    /// The session ends even when the write fails.
    pub fn close(&mut self) -> Result<()> {
        let table = self.table.take().ok_or(CacheError::SessionClosed)?;
        self.store.save(&table)
    }

    /// Returns true while the session is open.
    pub fn is_open(&self) -> bool {
        self.table.is_some()
    }

    fn table(&self) -> Result<&FrequencyTable> {
        self.table.as_ref().ok_or(CacheError::SessionClosed)
    }

    fn table_mut(&mut self) -> Result<&mut FrequencyTable> {
        self.table.as_mut().ok_or(CacheError::SessionClosed)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MUTATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Records one use of `term` with the configured use factor.
    pub fn use_term(&mut self, term: &str) -> Result<u64> {
        let amount = self.config.use_factor;
        self.use_term_by(term, amount)
    }

    /// Adds `amount` to `term`, creating it if needed. Zero seeds the term.
    pub fn use_term_by(&mut self, term: &str, amount: u64) -> Result<u64> {
        let count = self.table_mut()?.add(term, amount)?;
        debug!(term, amount, count, "Used term");
        Ok(count)
    }

    /// Applies one aging pass, returning the terms that expired.
    pub fn age(&mut self) -> Result<Vec<String>> {
        let age_factor = self.config.age_factor;
        let expired = self.table_mut()?.age(age_factor);
        debug!(age_factor, expired = expired.len(), "Aged cache");
        Ok(expired)
    }

    /// Removes a term. Fails with [`CacheError::TermNotFound`] if it is absent.
    pub fn remove(&mut self, term: &str) -> Result<u64> {
        self.table_mut()?.remove(term)
    }

    /// Wipes all history.
    pub fn clear(&mut self) -> Result<()> {
        self.table_mut()?.clear();
        debug!("Cleared cache");
        Ok(())
    }

    /// Reconciles the table with the valid term set.
    ///
    /// Valid terms the table lacks are seeded at zero weight; table terms
    /// outside the set are removed regardless of their count.
    pub fn reseed(&mut self, valid: &HashSet<String>) -> Result<ReseedReport> {
        let table = self.table()?;
        let stale: Vec<String> = table
            .iter()
            .filter(|(term, _)| !valid.contains(*term))
            .map(|(term, _)| term.to_string())
            .collect();
        let missing: Vec<&String> = valid.iter().filter(|term| !table.contains(term)).collect();

        let report = ReseedReport {
            inserted: missing.len(),
            removed: stale.len(),
        };

        for term in missing {
            self.use_term_by(term, 0)?;
        }
        for term in &stale {
            self.remove(term)?;
        }

        debug!(inserted = report.inserted, removed = report.removed, "Reseeded cache");
        Ok(report)
    }

    /// Runs the seed-rank-age cycle and returns the ranked terms.
    ///
    /// Every valid term is listed once, ranked by history. The closing aging
    /// pass drops the zero-weight seeds again, so only terms that were
    /// actually used carry over to the next session.
    pub fn show(&mut self, source: &(impl TermSource + ?Sized)) -> Result<Vec<String>> {
        let valid = source.valid_terms();
        self.reseed(&valid)?;
        let terms = self.terms()?;
        self.age()?;
        Ok(terms)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns the count for a term, if present.
    pub fn get(&self, term: &str) -> Result<Option<u64>> {
        Ok(self.table()?.get(term))
    }

    /// Returns the number of terms.
    pub fn len(&self) -> Result<usize> {
        Ok(self.table()?.len())
    }

    /// Returns true if no terms are stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.table()?.is_empty())
    }

    /// Returns terms by count descending, then alphabetically.
    pub fn terms(&self) -> Result<Vec<String>> {
        Ok(self.table()?.terms().into_iter().map(str::to_string).collect())
    }

    /// Returns `(term, count)` pairs in the same order as [`terms`](Self::terms).
    pub fn ranked(&self) -> Result<Vec<(String, u64)>> {
        Ok(self
            .table()?
            .ranked()
            .into_iter()
            .map(|(term, count)| (term.to_string(), count))
            .collect())
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        if self.is_open() {
            warn!(path = %self.store.path().display(), "Cache dropped while open, persisting");
            if let Err(e) = self.close() {
                warn!(error = %e, "Failed to persist cache on drop");
            }
        }
    }
}
