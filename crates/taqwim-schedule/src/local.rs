use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use taqwim_astronomy::{calculate_prayer_times, PrayerParams};
use taqwim_calendar::to_hijri;
use taqwim_types::{Coordinates, DailyPrayerTimes, EngineConfig, HijriDate, Prayer, TaqwimError};

use crate::tz::utc_offset_hours;
use crate::view::{build_schedule, ScheduleView};

/// Offline prayer times for `date` in `tz`.
pub fn local_prayer_times(coords: Coordinates, tz: Tz, date: NaiveDate, params: &PrayerParams) -> DailyPrayerTimes {
    calculate_prayer_times(date, coords, utc_offset_hours(tz, date), params)
}

/// The four daytime prayers must be strictly ordered. Isha may pass midnight.
pub fn is_consistent(times: &DailyPrayerTimes) -> bool {
    let t = |p| times.time_of(p);
    t(Prayer::Fajr) < t(Prayer::Dhuhr) && t(Prayer::Dhuhr) < t(Prayer::Asr) && t(Prayer::Asr) < t(Prayer::Maghrib)
}

/// Builds a schedule without touching the network.
///
/// # Errors
/// `InvalidCoordinates` for bad input; `Unavailable` when the sun gives no
/// usable times (polar day or night).
pub fn local_schedule(
    coords: Coordinates,
    tz: Tz,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<ScheduleView, TaqwimError> {
    coords.validate()?;
    let now = now.with_timezone(&tz);
    let times = local_prayer_times(coords, tz, now.date_naive(), &PrayerParams::from(config));
    if !is_consistent(&times) {
        return Err(TaqwimError::Unavailable);
    }
    Ok(build_schedule(&times, now))
}

/// Tabular Hijri date with the configured moon-sighting adjustment.
pub fn local_hijri_date(date: NaiveDate, config: &EngineConfig) -> HijriDate {
    to_hijri(date, config.hijri_adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use taqwim_types::{CalculationMethod, ScheduleSource};

    #[test]
    fn test_local_schedule_riyadh_afternoon() {
        let coords = Coordinates::new(21.4225, 39.8262).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(); // 13:00 in Riyadh
        let config = EngineConfig::new().method(CalculationMethod::UmmAlQura);

        let view = local_schedule(coords, chrono_tz::Asia::Riyadh, now, &config).unwrap();
        assert_eq!(view.source, ScheduleSource::Local);
        assert_eq!(view.current, Prayer::Dhuhr);
        assert_eq!(view.next, Prayer::Asr);
        assert!(view.seconds_until_next > 2 * 3600 && view.seconds_until_next < 3 * 3600);
    }

    #[test]
    fn test_invalid_coordinates_fail_fast() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let err = local_schedule(Coordinates::new_unchecked(0.0, 200.0), Tz::UTC, now, &EngineConfig::default());
        assert!(matches!(err, Err(TaqwimError::InvalidCoordinates { .. })));
    }

    #[test]
    fn test_timezone_offset_applied() {
        let coords = Coordinates::new(51.5074, -0.1278).unwrap();
        let params = PrayerParams::mwl();
        let winter = local_prayer_times(coords, chrono_tz::Europe::London, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), &params);
        let summer = local_prayer_times(coords, chrono_tz::Europe::London, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(), &params);
        // Dhuhr sits near 12:10 GMT in January and near 13:06 BST in July
        assert_eq!(winter.dhuhr.format("%H").to_string(), "12");
        assert_eq!(summer.dhuhr.format("%H").to_string(), "13");
    }

    #[test]
    fn test_local_hijri_uses_adjustment() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let config = EngineConfig::new().hijri_adjustment(-1);
        assert_eq!(local_hijri_date(date, &config).ymd(), (1445, 8, 29));
        assert_eq!(local_hijri_date(date, &EngineConfig::default()).ymd(), (1445, 9, 1));
    }
}
