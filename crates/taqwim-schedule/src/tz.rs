//! Timezone glue between wall-clock prayer times and absolute instants.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Places a wall-clock time on `date` in `tz`.
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant.
/// Times inside a gap (clocks turned forward) move forward by one hour.
pub fn anchor(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// UTC offset of `tz` at local noon on `date`, in hours.
pub fn utc_offset_hours(tz: Tz, date: NaiveDate) -> f64 {
    let noon = anchor(tz, date, NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    f64::from(noon.offset().fix().local_minus_utc()) / 3600.0
}
