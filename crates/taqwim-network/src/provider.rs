//! Remote source abstraction and its caching decorator.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use taqwim_types::{CalculationMethod, Clock, Coordinates, DailyPrayerTimes, HijriDate, Madhab, TaqwimError};
use tracing::debug;

use crate::cache::{hijri_key, timings_key, ResponseCache};

/// One prayer-times request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingsQuery {
    pub coords: Coordinates,
    pub date: NaiveDate,
    pub method: CalculationMethod,
    pub madhab: Madhab,
}

impl TimingsQuery {
    pub fn new(coords: Coordinates, date: NaiveDate) -> Self {
        Self { coords, date, method: CalculationMethod::default(), madhab: Madhab::default() }
    }

    pub fn method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }
}

/// A remote calendar and prayer-time provider.
///
/// Implementations validate coordinates before any I/O and report every
/// other failure as [`TaqwimError::Provider`].
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches wall-clock prayer times for the query's date and location.
    async fn fetch_prayer_times(&self, query: TimingsQuery) -> Result<DailyPrayerTimes, TaqwimError>;

    /// Fetches the Hijri date corresponding to `date`.
    async fn fetch_hijri_date(&self, date: NaiveDate) -> Result<HijriDate, TaqwimError>;

    /// Returns a name for this source (used in logging).
    fn name(&self) -> &str {
        "RemoteSource"
    }
}

#[async_trait]
impl<S: RemoteSource + ?Sized> RemoteSource for Arc<S> {
    async fn fetch_prayer_times(&self, query: TimingsQuery) -> Result<DailyPrayerTimes, TaqwimError> {
        (**self).fetch_prayer_times(query).await
    }

    async fn fetch_hijri_date(&self, date: NaiveDate) -> Result<HijriDate, TaqwimError> {
        (**self).fetch_hijri_date(date).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Serves repeated requests from memory.
///
/// Only successful responses are stored. Failures pass through untouched.
pub struct CachedSource<S> {
    inner: S,
    timings: ResponseCache<DailyPrayerTimes>,
    hijri: ResponseCache<HijriDate>,
}

impl<S: RemoteSource> CachedSource<S> {
    pub fn new(inner: S, ttl: chrono::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            timings: ResponseCache::new(ttl, clock.clone()),
            hijri: ResponseCache::new(ttl, clock),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached prayer-time and Hijri entries.
    pub fn cached_entries(&self) -> usize {
        self.timings.len() + self.hijri.len()
    }
}

#[async_trait]
impl<S: RemoteSource> RemoteSource for CachedSource<S> {
    async fn fetch_prayer_times(&self, query: TimingsQuery) -> Result<DailyPrayerTimes, TaqwimError> {
        query.coords.validate()?;

        let key = timings_key(query.coords, query.method, query.madhab);
        if let Some(hit) = self.timings.get(&key, query.date) {
            return Ok(hit);
        }

        let fresh = self.inner.fetch_prayer_times(query).await?;
        debug!(%key, source = self.inner.name(), "caching prayer times");
        self.timings.insert(key, fresh.clone());
        Ok(fresh)
    }

    async fn fetch_hijri_date(&self, date: NaiveDate) -> Result<HijriDate, TaqwimError> {
        let key = hijri_key(date);
        if let Some(hit) = self.hijri.get(&key, date) {
            return Ok(hit);
        }

        let fresh = self.inner.fetch_hijri_date(date).await?;
        self.hijri.insert(key, fresh.clone());
        Ok(fresh)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use taqwim_types::{FixedClock, ProviderError, ScheduleSource};

    /// Counts calls and answers with fixed times for whatever date is asked.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RemoteSource for CountingSource {
        async fn fetch_prayer_times(&self, query: TimingsQuery) -> Result<DailyPrayerTimes, TaqwimError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::HttpStatus(500).into());
            }
            let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
            Ok(DailyPrayerTimes {
                date: query.date,
                fajr: t(5),
                sunrise: Some(t(6)),
                dhuhr: t(12),
                asr: t(15),
                maghrib: t(18),
                isha: t(19),
                source: ScheduleSource::Remote,
            })
        }

        async fn fetch_hijri_date(&self, date: NaiveDate) -> Result<HijriDate, TaqwimError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(taqwim_calendar::gregorian_to_hijri(date))
        }
    }

    fn cached(fail: bool) -> (Arc<FixedClock>, CachedSource<CountingSource>) {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()));
        let source = CachedSource::new(
            CountingSource { fail, ..Default::default() },
            chrono::Duration::hours(6),
            clock.clone(),
        );
        (clock, source)
    }

    fn query(day: u32) -> TimingsQuery {
        let mecca = Coordinates::new(21.4225, 39.8262).unwrap();
        TimingsQuery::new(mecca, NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
    }

    #[tokio::test]
    async fn test_same_day_served_from_cache() {
        let (_, source) = cached(false);
        let first = source.fetch_prayer_times(query(1)).await.unwrap();
        // nearby coordinates round to the same key
        let mut nearby = query(1);
        nearby.coords = Coordinates::new(21.4201, 39.8271).unwrap();
        let second = source.fetch_prayer_times(nearby).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_day_refetches() {
        let (_, source) = cached(false);
        source.fetch_prayer_times(query(1)).await.unwrap();
        let next = source.fetch_prayer_times(query(2)).await.unwrap();
        assert_eq!(next.date, query(2).date);
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_method_is_part_of_key() {
        let (_, source) = cached(false);
        source.fetch_prayer_times(query(1)).await.unwrap();
        source.fetch_prayer_times(query(1).madhab(Madhab::Hanafi)).await.unwrap();
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let (clock, source) = cached(false);
        source.fetch_prayer_times(query(1)).await.unwrap();
        clock.advance(chrono::Duration::hours(6) + chrono::Duration::seconds(1));
        source.fetch_prayer_times(query(1)).await.unwrap();
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (_, source) = cached(true);
        assert!(source.fetch_prayer_times(query(1)).await.is_err());
        assert!(source.fetch_prayer_times(query(1)).await.is_err());
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.cached_entries(), 0);
    }

    #[tokio::test]
    async fn test_invalid_coordinates_never_reach_source() {
        let (_, source) = cached(false);
        let mut bad = query(1);
        bad.coords = Coordinates::new_unchecked(f64::NAN, 39.8);
        let err = source.fetch_prayer_times(bad).await.unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_hijri_cached_per_date() {
        let (_, source) = cached(false);
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let h1 = source.fetch_hijri_date(date).await.unwrap();
        let h2 = source.fetch_hijri_date(date).await.unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.ymd(), (1445, 9, 1));
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 1);
    }
}
