//! # Taqwim Core
//!
//! Islamic date and prayer time engine: tabular Hijri calendar, offline
//! prayer time calculation, and next/current prayer resolution with an
//! optional remote provider (feature `async`).
//!
//! ## Usage
//!
//! ```rust
//! use taqwim_core::prelude::*;
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let config = EngineConfig::default();
//! let ramadan = get_hijri_date(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(), &config);
//! assert_eq!(ramadan.month_name, "Ramadan");
//!
//! let mecca = Coordinates::new(21.4225, 39.8262).unwrap();
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
//! let view = get_prayer_schedule(mecca, chrono_tz::Asia::Riyadh, now, &config).unwrap();
//! assert_eq!(view.next, Prayer::Asr);
//! ```

pub mod extension;
pub mod state;

pub use taqwim_astronomy as astronomy;
pub use taqwim_calendar as calendar;
pub use taqwim_schedule as schedule;
pub use taqwim_types as types;

#[cfg(feature = "async")]
pub use taqwim_network as network;

pub use extension::TaqwimDateExt;
pub use state::LoadState;

pub use taqwim_astronomy::{calculate_prayer_times, PrayerParams};
pub use taqwim_calendar::{gregorian_to_hijri, hijri_to_gregorian, to_hijri, to_jdn};
pub use taqwim_schedule::{format_countdown, PrayerInstant, ScheduleView};
pub use taqwim_types::{
    parse_timezone, resolve_location, CalculationMethod, CalendarProfile, Clock, Coordinates, DailyPrayerTimes,
    EngineConfig, EngineConfigBuilder, FixedClock, FixedLocation, HighLatitudeRule, HijriDate, LocationInfo,
    LocationSource, Madhab, Prayer, ProviderError, ScheduleSource, SystemClock, TaqwimError, Tz, MECCA,
};

#[cfg(feature = "async")]
pub use taqwim_network::{default_remote, AladhanClient, CachedSource, DefaultRemote, RemoteConfig, RemoteSource};
#[cfg(feature = "async")]
pub use taqwim_schedule::{HijriService, ScheduleResolver};

pub mod prelude {
    pub use crate::extension::TaqwimDateExt;
    pub use crate::state::LoadState;
    pub use crate::{get_hijri_date, get_prayer_schedule, get_prayer_schedule_for};
    pub use taqwim_schedule::ScheduleView;
    pub use taqwim_types::{
        CalculationMethod, Coordinates, EngineConfig, HijriDate, LocationInfo, Madhab, Prayer, TaqwimError,
    };

    #[cfg(feature = "async")]
    pub use taqwim_schedule::{HijriService, ScheduleResolver};
}

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

/// Hijri date for `date` using the tabular calendar and the configured
/// adjustment. Total over civil dates.
pub fn get_hijri_date(date: NaiveDate, config: &EngineConfig) -> HijriDate {
    taqwim_schedule::local_hijri_date(date, config)
}

/// Offline prayer schedule around `now`.
///
/// # Errors
/// `InvalidCoordinates` for bad input, `Unavailable` if the sun gives no
/// usable times at this latitude and date.
pub fn get_prayer_schedule(
    coords: Coordinates,
    tz: Tz,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<ScheduleView, TaqwimError> {
    taqwim_schedule::local_schedule(coords, tz, now, config)
}

/// Offline prayer schedule wherever `source` says the user is, falling back
/// to the configured location (Mecca by default).
pub fn get_prayer_schedule_for(
    source: &dyn LocationSource,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<ScheduleView, TaqwimError> {
    let location = resolve_location(source, &config.fallback_location);
    info!(location = %location.display_name(), "resolving prayer schedule");
    get_prayer_schedule(location.coords, location.timezone, now, config)
}
