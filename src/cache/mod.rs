//! Deduplicating, expiring query cache with JSON persistence.
//!
//! [`key::LookupId`] canonicalizes identifier spellings so cosmetic variants
//! of the same registration share one cache slot, [`store::QueryCache`] holds
//! the entries behind a mutex with time-based expiry, [`dedup`] collapses a
//! request batch to one fetch per distinct identifier, and [`persist`] saves
//! and restores the cache as pretty-printed JSON with an atomic rename.

pub mod dedup;
pub mod key;
pub mod persist;
pub mod store;

pub use dedup::{duplicates_avoided, group_requests, RequestGroup};
pub use key::{LookupId, VALID_UFS};
pub use persist::{load_from_path, save_to_path};
pub use store::{CacheCounters, CacheEntry, QueryCache};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed cache file: {0}")]
    Malformed(#[from] serde_json::Error),
}
