//! Core types shared by the taqwim crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod geo;
pub mod hijri;
pub mod method;
pub mod prayer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, EngineConfigBuilder, MAX_HIJRI_ADJUSTMENT};
pub use error::{civil_date, ProviderError, TaqwimError};
pub use geo::{parse_timezone, resolve_location, Coordinates, FixedLocation, LocationInfo, LocationSource, MECCA};
pub use hijri::{CalendarProfile, ConversionAlgorithm, HijriDate};
pub use method::{AngleOrMinutes, CalculationMethod, HighLatitudeRule, Madhab, MethodParams};
pub use prayer::{DailyPrayerTimes, Prayer, ScheduleSource};

pub use chrono_tz::Tz;
