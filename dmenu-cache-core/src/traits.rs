//! Common traits for dmenu-cache.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use std::collections::HashSet;

// ═══════════════════════════════════════════════════════════════════════════════
// TERM SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Supplies the set of terms that are currently valid.
///
/// Implementations might use:
/// - Directory listings of the search path (the default for launchers)
/// - A fixed list of names (for testing)
///
/// Sources never fail: entries that cannot be read are skipped.
pub trait TermSource {
    /// Returns every currently valid term, deduplicated.
    fn valid_terms(&self) -> HashSet<String>;
}

impl TermSource for [&str] {
    fn valid_terms(&self) -> HashSet<String> {
        self.iter().map(|t| (*t).to_string()).collect()
    }
}

impl<const N: usize> TermSource for [&str; N] {
    fn valid_terms(&self) -> HashSet<String> {
        self[..].valid_terms()
    }
}
