//! JSON persistence of the query cache.
//!
//! The snapshot is written to a temporary file in the target directory and
//! renamed into place, so a crash mid-write never leaves a truncated cache
//! behind. Loading tolerates a missing file (fresh start) but not a
//! malformed one.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::store::{CacheCounters, CacheEntry, QueryCache};
use super::CacheError;

#[derive(Serialize, Deserialize)]
struct CacheSnapshot {
    entries: HashMap<String, CacheEntry>,
    counters: CacheCounters,
}

/// Atomically write the cache contents to `path` as pretty-printed JSON.
pub fn save_to_path(cache: &QueryCache, path: &Path) -> Result<(), CacheError> {
    let (entries, counters) = cache.snapshot();
    let snapshot = CacheSnapshot { entries, counters };
    let json = serde_json::to_vec_pretty(&snapshot)?;

    // parent() yields "" for a bare filename; the temp file must land in the
    // same directory as the destination for the rename to stay atomic.
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.persist(path).map_err(|e| CacheError::Io(e.error))?;

    info!(path = %path.display(), entries = snapshot.entries.len(), "cache saved");
    Ok(())
}

/// Load a persisted snapshot into the cache, dropping entries that have
/// already expired. Returns the number of entries kept; a missing file is a
/// fresh start, not an error.
pub fn load_from_path(cache: &QueryCache, path: &Path) -> Result<usize, CacheError> {
    load_from_path_at(cache, path, Utc::now())
}

pub fn load_from_path_at(
    cache: &QueryCache,
    path: &Path,
    now: DateTime<Utc>,
) -> Result<usize, CacheError> {
    if !path.exists() {
        return Ok(0);
    }
    let json = std::fs::read(path)?;
    let snapshot: CacheSnapshot = serde_json::from_slice(&json)?;
    let kept = cache.restore(snapshot.entries, snapshot.counters, now);
    info!(path = %path.display(), kept, "cache loaded");
    Ok(kept)
}
