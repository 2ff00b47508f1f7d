//! Prayer schedule resolution.
//!
//! Turns one day's prayer times into a [`ScheduleView`]: the five prayers
//! placed on the timeline of a timezone, which one is current, which is next
//! and how long until it starts.
//!
//! [`local_schedule`] works fully offline. With the `async` feature,
//! [`ScheduleResolver`] asks a remote source first and falls back to the
//! local calculator on any provider failure; [`HijriService`] does the same
//! for Hijri dates.

pub mod local;
pub mod tz;
pub mod view;

#[cfg(feature = "async")]
pub mod resolver;

pub use local::{is_consistent, local_hijri_date, local_prayer_times, local_schedule};
pub use tz::{anchor, utc_offset_hours};
pub use view::{build_schedule, format_countdown, PrayerInstant, ScheduleView};

#[cfg(feature = "async")]
pub use resolver::{HijriService, ScheduleResolver};
