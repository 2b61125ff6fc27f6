//! Tuning constants and storage layout for dmenu-cache.

// ═══════════════════════════════════════════════════════════════════════════════
// TUNING FACTORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Weight added to a term each time it is used.
pub const DEFAULT_USE_FACTOR: u64 = 5;

/// Weight removed from every term on each aging pass.
/// A term whose count would drop to zero or below is deleted.
pub const DEFAULT_AGE_FACTOR: u64 = 1;

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE LAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable naming the XDG data directory.
pub const DATA_HOME_ENV: &str = "XDG_DATA_HOME";

/// Fallback data directory, relative to the user's home.
pub const DATA_HOME_FALLBACK: &[&str] = &[".local", "share"];

/// Directory under the data home that holds the cache.
pub const CACHE_DIR_NAME: &str = "dmenu_cache";

/// File name of the persisted frequency table.
pub const CACHE_FILE_NAME: &str = "cache.json";

// ═══════════════════════════════════════════════════════════════════════════════
// TERM SOURCES
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable listing the directories scanned for valid terms.
pub const SEARCH_PATH_ENV: &str = "PATH";
