//! Response cache with lazy eviction on read and write.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use taqwim_types::{CalculationMethod, Clock, Coordinates, DailyPrayerTimes, HijriDate, Madhab};
use tracing::debug;

/// A payload that describes one civil date.
pub trait Dated {
    fn civil_date(&self) -> NaiveDate;
}

impl Dated for DailyPrayerTimes {
    fn civil_date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for HijriDate {
    fn civil_date(&self) -> NaiveDate {
        self.gregorian
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T: Dated> CacheEntry<T> {
    /// Fresh and for the queried day.
    pub fn is_valid(&self, now: DateTime<Utc>, ttl: Duration, date: NaiveDate) -> bool {
        now - self.fetched_at < ttl && self.payload.civil_date() == date
    }
}

/// Key for a prayer-times entry: `timings_{lat}_{lng}_{method}_{school}`.
///
/// The date is not part of the key; an entry for another day is a miss.
pub fn timings_key(coords: Coordinates, method: CalculationMethod, madhab: Madhab) -> String {
    let (lat, lng) = coords.rounded();
    format!("timings_{lat:.2}_{lng:.2}_{}_{}", method.provider_id(), madhab.school_id())
}

/// Key for a Hijri-date entry: `hijri_{DD-MM-YYYY}`.
pub fn hijri_key(date: NaiveDate) -> String {
    format!("hijri_{}", date.format("%d-%m-%Y"))
}

/// Key → entry map owned by a provider.
#[derive(Debug)]
pub struct ResponseCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Dated + Clone> ResponseCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl, clock }
    }

    /// Returns the cached payload for `key` if it is fresh and for `date`.
    ///
    /// Stale or mismatched entries are evicted.
    pub fn get(&self, key: &str, date: NaiveDate) -> Option<T> {
        let now = self.clock.now();
        if let Ok(guard) = self.entries.read() {
            match guard.get(key) {
                Some(entry) if entry.is_valid(now, self.ttl, date) => {
                    debug!(key, "cache hit");
                    return Some(entry.payload.clone());
                }
                Some(_) => {}
                None => {
                    debug!(key, "cache miss");
                    return None;
                }
            }
        }

        if let Ok(mut guard) = self.entries.write() {
            // Another writer may have refreshed the entry in between
            if guard.get(key).is_some_and(|e| !e.is_valid(now, self.ttl, date)) {
                debug!(key, %date, "evicting stale cache entry");
                guard.remove(key);
            }
        }
        None
    }

    /// Stores a payload stamped with the current time. Last write wins.
    ///
    /// Expired entries under other keys are dropped while the lock is held;
    /// per-date keys are never read again once their day has passed.
    pub fn insert(&self, key: String, payload: T) {
        let now = self.clock.now();
        let entry = CacheEntry { payload, fetched_at: now };
        if let Ok(mut guard) = self.entries.write() {
            let before = guard.len();
            guard.retain(|_, e| now - e.fetched_at < self.ttl);
            if guard.len() < before {
                debug!(evicted = before - guard.len(), "pruned expired cache entries");
            }
            guard.insert(key, entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.write() {
            guard.clear();
        }
    }
}
