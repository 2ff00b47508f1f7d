//! Remote-first resolution with offline fallback.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use taqwim_astronomy::PrayerParams;
use taqwim_calendar::describe;
use taqwim_network::{RemoteSource, TimingsQuery};
use taqwim_types::{
    resolve_location, Clock, Coordinates, DailyPrayerTimes, EngineConfig, HijriDate, LocationSource, TaqwimError,
};
use tracing::{info, warn};

use crate::local::{is_consistent, local_hijri_date, local_prayer_times};
use crate::view::{build_schedule, ScheduleView};

/// Resolves prayer schedules from a remote source, falling back to the
/// local calculator whenever the source fails.
///
/// # Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use taqwim_network::{default_remote, RemoteConfig};
/// use taqwim_schedule::ScheduleResolver;
/// use taqwim_types::{Coordinates, EngineConfig, SystemClock};
///
/// #[tokio::main]
/// async fn main() {
///     let clock = Arc::new(SystemClock);
///     let remote = default_remote(RemoteConfig::default(), clock.clone()).unwrap();
///     let resolver = ScheduleResolver::new(remote, EngineConfig::default(), clock);
///
///     let mecca = Coordinates::new(21.4225, 39.8262).unwrap();
///     let view = resolver.resolve_now(mecca, chrono_tz::Asia::Riyadh).await.unwrap();
///     println!("Next: {} in {}", view.next, view.countdown());
/// }
/// ```
pub struct ScheduleResolver<R> {
    remote: R,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
}

impl<R: RemoteSource> ScheduleResolver<R> {
    pub fn new(remote: R, config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self { remote, config, clock }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Prayer times for `date` in `tz`: remote first, local on any provider failure.
    ///
    /// # Errors
    /// `InvalidCoordinates` before any I/O; `Unavailable` if neither source
    /// produced usable times.
    pub async fn daily_times(&self, coords: Coordinates, tz: Tz, date: NaiveDate) -> Result<DailyPrayerTimes, TaqwimError> {
        coords.validate()?;

        let query = TimingsQuery::new(coords, date).method(self.config.method).madhab(self.config.madhab);
        match self.remote.fetch_prayer_times(query).await {
            Ok(times) if is_consistent(&times) => return Ok(times),
            Ok(_) => warn!(source = self.remote.name(), %date, "remote prayer times out of order, using local calculation"),
            Err(e) if e.is_input_error() => return Err(e),
            Err(e) => warn!(source = self.remote.name(), error = %e, "remote prayer times unavailable, using local calculation"),
        }

        let local = local_prayer_times(coords, tz, date, &PrayerParams::from(&self.config));
        if is_consistent(&local) {
            Ok(local)
        } else {
            warn!(lat = coords.lat, lng = coords.lng, %date, "no usable prayer times for this location and date");
            Err(TaqwimError::Unavailable)
        }
    }

    /// Resolves the schedule around `now`.
    pub async fn resolve_schedule(&self, coords: Coordinates, tz: Tz, now: DateTime<Utc>) -> Result<ScheduleView, TaqwimError> {
        let now = now.with_timezone(&tz);
        let times = self.daily_times(coords, tz, now.date_naive()).await?;
        Ok(build_schedule(&times, now))
    }

    /// Resolves the schedule around the injected clock's current time.
    pub async fn resolve_now(&self, coords: Coordinates, tz: Tz) -> Result<ScheduleView, TaqwimError> {
        self.resolve_schedule(coords, tz, self.clock.now()).await
    }

    /// Resolves for wherever `source` says the user is, or the configured
    /// fallback location when it reports nothing.
    pub async fn resolve_for(&self, source: &dyn LocationSource) -> Result<ScheduleView, TaqwimError> {
        let location = resolve_location(source, &self.config.fallback_location);
        if location == self.config.fallback_location {
            info!(location = %location.display_name(), "using fallback location");
        }
        self.resolve_now(location.coords, location.timezone).await
    }
}

/// Hijri dates from a remote source, falling back to the tabular calendar.
pub struct HijriService<R> {
    remote: R,
    config: EngineConfig,
}

impl<R: RemoteSource> HijriService<R> {
    pub fn new(remote: R, config: EngineConfig) -> Self {
        Self { remote, config }
    }

    /// The Hijri date for `date` with the configured adjustment. Never fails.
    ///
    /// The remote source is asked about the adjusted day; names and weekday
    /// still follow `date`.
    pub async fn get_hijri_date(&self, date: NaiveDate) -> HijriDate {
        let shifted = date
            .checked_add_signed(Duration::days(self.config.hijri_adjustment))
            .unwrap_or(date);

        match self.remote.fetch_hijri_date(shifted).await {
            Ok(h) => describe(h.year, h.month, h.day, date, h.holiday_name),
            Err(e) => {
                warn!(source = self.remote.name(), error = %e, "remote Hijri date unavailable, using tabular calendar");
                local_hijri_date(date, &self.config)
            }
        }
    }
}
