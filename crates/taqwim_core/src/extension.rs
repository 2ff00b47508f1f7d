//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;
use chrono_tz::Tz;
use taqwim_astronomy::PrayerParams;
use taqwim_calendar::{gregorian_to_hijri, to_hijri, to_jdn};
use taqwim_schedule::local_prayer_times;
use taqwim_types::{Coordinates, DailyPrayerTimes, EngineConfig, HijriDate, TaqwimError};

/// Extends `NaiveDate` with calendar and prayer time lookups.
pub trait TaqwimDateExt {
    /// Tabular Hijri date without adjustment.
    fn hijri(&self) -> HijriDate;

    /// Tabular Hijri date with the configured adjustment.
    fn hijri_with(&self, config: &EngineConfig) -> HijriDate;

    /// Julian Day Number.
    fn jdn(&self) -> i64;

    /// True if the date carries a named Islamic holiday.
    fn is_islamic_holiday(&self) -> bool;

    /// Offline prayer times at `coords` in `tz`.
    fn prayer_times(&self, coords: Coordinates, tz: Tz, config: &EngineConfig) -> Result<DailyPrayerTimes, TaqwimError>;

    /// Finds the next date carrying a holiday (up to 400 days ahead, today excluded).
    fn next_holiday(&self) -> Option<(NaiveDate, HijriDate)>;
}

impl TaqwimDateExt for NaiveDate {
    fn hijri(&self) -> HijriDate {
        gregorian_to_hijri(*self)
    }

    fn hijri_with(&self, config: &EngineConfig) -> HijriDate {
        to_hijri(*self, config.hijri_adjustment)
    }

    fn jdn(&self) -> i64 {
        to_jdn(*self)
    }

    fn is_islamic_holiday(&self) -> bool {
        self.hijri().is_holiday
    }

    fn prayer_times(&self, coords: Coordinates, tz: Tz, config: &EngineConfig) -> Result<DailyPrayerTimes, TaqwimError> {
        coords.validate()?;
        Ok(local_prayer_times(coords, tz, *self, &PrayerParams::from(config)))
    }

    fn next_holiday(&self) -> Option<(NaiveDate, HijriDate)> {
        self.iter_days()
            .skip(1)
            .take(400)
            .map(|d| (d, d.hijri()))
            .find(|(_, h)| h.is_holiday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hijri_and_holiday() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(date.hijri().ymd(), (1445, 9, 1));
        assert!(date.is_islamic_holiday());
        assert_eq!(date.hijri_with(&EngineConfig::new().hijri_adjustment(1)).ymd(), (1445, 9, 2));
        assert_eq!(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().jdn(), 2_451_545);
    }

    #[test]
    fn test_next_holiday_skips_today() {
        let ramadan = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let (date, h) = ramadan.next_holiday().unwrap();
        assert!(date > ramadan);
        assert!(h.is_holiday);
        assert!(h.holiday_name.is_some());
    }

    #[test]
    fn test_prayer_times_rejects_bad_coordinates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let res = date.prayer_times(Coordinates::new_unchecked(91.0, 0.0), Tz::UTC, &EngineConfig::default());
        assert!(res.is_err());
    }
}
