//! Term frequency table.

use std::collections::{BTreeMap, HashMap};

use crate::error::{CacheError, Result};

/// Mapping from term to usage count.
///
/// # Invariants
///
/// - Aging never leaves a count at zero: a term whose count would reach
///   zero or less is deleted in the same pass.
/// - The only zero counts ever stored are zero-weight seeds added with
///   `add(term, 0)`, which the next aging pass removes.
/// - Terms are non-empty.
///
/// # Ordering
///
/// [`ranked`](Self::ranked) and [`terms`](Self::terms) return entries by
/// count descending, then term ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count for a term, if present.
    pub fn get(&self, term: &str) -> Option<u64> {
        self.counts.get(term).copied()
    }

    /// Returns true if the term is present.
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if the table holds no terms.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Adds `amount` to a term's count, inserting it at `amount` if absent.
    ///
    /// Returns the new count. `amount` may be zero, which records the term's
    /// presence without giving it any weight.
    pub fn add(&mut self, term: &str, amount: u64) -> Result<u64> {
        if term.is_empty() {
            return Err(CacheError::EmptyTerm);
        }
        let count = self.counts.entry(term.to_string()).or_insert(0);
        *count = count.saturating_add(amount);
        Ok(*count)
    }

    /// Removes a term, returning its last count.
    pub fn remove(&mut self, term: &str) -> Result<u64> {
        self.counts
            .remove(term)
            .ok_or_else(|| CacheError::TermNotFound(term.to_string()))
    }

    /// Drops every term.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Subtracts `age_factor` from every count and deletes the terms that
    /// reach zero or less.
    ///
    /// Returns the deleted terms in ascending order.
    pub fn age(&mut self, age_factor: u64) -> Vec<String> {
        let mut expired = Vec::new();
        for (term, count) in self.counts.iter_mut() {
            if *count <= age_factor {
                expired.push(term.clone());
            } else {
                *count -= age_factor;
            }
        }

        // Deletion runs after the pass so no entry is skipped or visited twice.
        for term in &expired {
            self.counts.remove(term);
        }

        expired.sort_unstable();
        expired
    }

    /// Returns `(term, count)` pairs by count descending, then term ascending.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(term, count)| (term.as_str(), *count))
            .collect();

        // Two stable passes: the second keeps the alphabetical order of the first
        // within each count group.
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Returns terms in ranked order.
    pub fn terms(&self) -> Vec<&str> {
        self.ranked().into_iter().map(|(term, _)| term).collect()
    }

    /// Returns the table keyed in ascending term order, for stable output.
    pub fn to_sorted_map(&self) -> BTreeMap<&str, u64> {
        self.counts
            .iter()
            .map(|(term, count)| (term.as_str(), *count))
            .collect()
    }

    /// Iterates over `(term, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(term, count)| (term.as_str(), *count))
    }
}

impl From<HashMap<String, u64>> for FrequencyTable {
    fn from(counts: HashMap<String, u64>) -> Self {
        Self { counts }
    }
}

impl FromIterator<(String, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
