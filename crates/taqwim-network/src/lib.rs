//! Remote calendar and prayer-time provider.
//!
//! [`AladhanClient`] talks HTTP with a bounded deadline; [`CachedSource`]
//! wraps any [`RemoteSource`] with a TTL cache keyed by rounded coordinates.
//! Every failure comes back as an error value so callers can fall back to
//! the offline calculators.

pub mod aladhan;
pub mod cache;
pub mod config;
pub mod provider;

pub use aladhan::AladhanClient;
pub use cache::{hijri_key, timings_key, CacheEntry, Dated, ResponseCache};
pub use config::{RemoteConfig, DEFAULT_BASE_URL};
pub use provider::{CachedSource, RemoteSource, TimingsQuery};

use std::sync::Arc;
use taqwim_types::{Clock, TaqwimError};

/// The standard remote stack: an Aladhan client behind a response cache.
pub type DefaultRemote = CachedSource<AladhanClient>;

/// Builds an [`AladhanClient`] wrapped in a cache using `config`'s TTL.
pub fn default_remote(config: RemoteConfig, clock: Arc<dyn Clock>) -> Result<DefaultRemote, TaqwimError> {
    let ttl = config.cache_ttl();
    Ok(CachedSource::new(AladhanClient::new(config)?, ttl, clock))
}
