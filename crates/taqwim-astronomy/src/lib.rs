//! Offline prayer time calculation.
//!
//! Used whenever the remote provider cannot answer. The calculation is total:
//! every valid coordinate on every date yields a full set of times.

pub mod prayer;
mod solar;

pub use prayer::{calculate_prayer_times, PrayerParams};
