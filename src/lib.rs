//! Lookup and structuring of OAB (Ordem dos Advogados do Brasil) registration
//! records.
//!
//! Two tightly coupled subsystems:
//!
//! - [`pipeline`]: turns a low-quality rendering of a registration card into a
//!   best-effort structured record: image variants, recognition multiplexing
//!   over an external engine, quality scoring, text normalization, repair of
//!   names whose whitespace was lost, and field-specific extractors.
//! - [`cache`]: collapses logically identical lookups (cosmetic spelling
//!   differences of the same identifier) into one expensive fetch per distinct
//!   identifier, with time-based expiry and JSON persistence across runs.
//!
//! [`lookup::LookupService`] ties both together: it groups a batch of raw
//! requests, consults the cache per group, drives the page-automation and
//! recognition collaborators on misses, and fans the result back out to every
//! originating request.

pub mod cache;
pub mod config;
pub mod lookup;
pub mod models;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries and integration harnesses.
///
/// Honors `RUST_LOG`; defaults to `oab_lookup=info` when unset.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("oab_lookup=info")),
        )
        .init();
}
