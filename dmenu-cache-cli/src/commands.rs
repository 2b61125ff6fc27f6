//! Command handlers. Each one runs a short sequence of cache operations
//! against an open session and writes its output to `out`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use dmenu_cache_core::traits::TermSource;
use dmenu_cache_store::Cache;

/// Records one use per non-blank input line and echoes every line unchanged.
///
/// Returns the number of terms recorded.
pub fn update(cache: &mut Cache, mut input: impl BufRead, out: &mut impl Write) -> Result<usize> {
    let mut line = String::new();
    let mut used = 0;

    loop {
        line.clear();
        if input.read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }

        out.write_all(line.as_bytes()).context("Failed to echo input")?;

        let term = line.trim();
        if term.is_empty() {
            continue;
        }
        cache.use_term(term)?;
        used += 1;
    }

    out.flush()?;
    debug!(used, "Update finished");
    Ok(used)
}

/// Prints every valid term, most used first.
pub fn show(cache: &mut Cache, source: &impl TermSource, out: &mut impl Write) -> Result<()> {
    for term in cache.show(source)? {
        writeln!(out, "{term}")?;
    }
    out.flush()?;
    Ok(())
}

/// Wipes all usage history.
pub fn reset(cache: &mut Cache) -> Result<()> {
    cache.clear()?;
    Ok(())
}

/// Prints `term: count` pairs, most used first.
pub fn print(cache: &Cache, out: &mut impl Write) -> Result<()> {
    for (term, count) in cache.ranked()? {
        writeln!(out, "{term}: {count}")?;
    }
    out.flush()?;
    Ok(())
}
