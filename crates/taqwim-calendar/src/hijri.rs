//! Tabular Islamic calendar: 30-year cycles of 10631 days, 11 leap years each.

use chrono::{Datelike, Duration, NaiveDate};
use taqwim_types::{HijriDate, TaqwimError};
use tracing::warn;

use crate::julian::{from_jdn, to_jdn};
use crate::names;

/// JDN of 1 Muharram 1 AH (civil epoch, 622-07-19 proleptic Gregorian).
pub const ISLAMIC_EPOCH_JDN: i64 = 1_948_440;
/// Days in one 30-year cycle.
pub const CYCLE_DAYS: i64 = 10_631;
/// Leap years within a cycle (1-based).
pub const LEAP_YEARS_IN_CYCLE: [u32; 11] = [2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29];
/// Maximum moon-sighting adjustment in days.
pub const MAX_ADJUSTMENT: i64 = 30;

pub fn is_leap_year(year: u32) -> bool {
    let in_cycle = (year.saturating_sub(1)) % 30 + 1;
    LEAP_YEARS_IN_CYCLE.contains(&in_cycle)
}

pub fn year_length(year: u32) -> u32 {
    if is_leap_year(year) { 355 } else { 354 }
}

/// Odd months have 30 days, even months 29, except Dhu al-Hijjah in a leap year.
pub fn month_length(year: u32, month: u32) -> u32 {
    if month % 2 == 1 || (month == 12 && is_leap_year(year)) { 30 } else { 29 }
}

/// Hijri `(year, month, day)` for a Julian Day Number.
///
/// Dates before the epoch return the sentinel `(1, 1, 1)`.
pub fn hijri_ymd_from_jdn(jdn: i64) -> (u32, u32, u32) {
    let days_since_epoch = jdn - ISLAMIC_EPOCH_JDN;
    if days_since_epoch < 0 {
        return (1, 1, 1);
    }

    let cycles = days_since_epoch / CYCLE_DAYS;
    let mut remaining = days_since_epoch % CYCLE_DAYS;

    let base_year = (cycles * 30) as u32;
    let mut year_in_cycle = 1;
    while year_in_cycle < 30 {
        let len = year_length(base_year + year_in_cycle) as i64;
        if remaining < len {
            break;
        }
        remaining -= len;
        year_in_cycle += 1;
    }
    let year = base_year + year_in_cycle;

    let mut month = 1;
    while month < 12 {
        let len = month_length(year, month) as i64;
        if remaining < len {
            break;
        }
        remaining -= len;
        month += 1;
    }

    let day = remaining + 1;
    if !(1..=30).contains(&day) {
        warn!(jdn, year, month, day, "tabular Hijri day out of range, clamping");
    }
    let day = day.clamp(1, 30) as u32;

    (year, month.clamp(1, 12), day)
}

/// Converts a civil date to a Hijri date.
pub fn gregorian_to_hijri(date: NaiveDate) -> HijriDate {
    describe_jdn(to_jdn(date), date)
}

/// Converts with a moon-sighting adjustment (positive = Hijri ahead).
///
/// The adjustment is clamped to ±30 days. Names of the week still follow `date`.
pub fn to_hijri(date: NaiveDate, adjustment: i64) -> HijriDate {
    let adjustment = adjustment.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT);
    let shifted = date.checked_add_signed(Duration::days(adjustment)).unwrap_or(date);
    describe_jdn(to_jdn(shifted), date)
}

/// The pre-epoch sentinel carries names but never a holiday.
fn describe_jdn(jdn: i64, civil: NaiveDate) -> HijriDate {
    let (year, month, day) = hijri_ymd_from_jdn(jdn);
    let mut hijri = describe(year, month, day, civil, None);
    if jdn < ISLAMIC_EPOCH_JDN {
        hijri.is_holiday = false;
        hijri.holiday_name = None;
    }
    hijri
}

/// JDN of a Hijri date.
///
/// # Errors
/// Returns `InvalidHijriDate` if the year is zero, the month is outside
/// 1..=12, or the day exceeds the month's length.
pub fn hijri_to_jdn(year: u32, month: u32, day: u32) -> Result<i64, TaqwimError> {
    if year == 0 || !(1..=12).contains(&month) || day == 0 || day > month_length(year, month) {
        return Err(TaqwimError::InvalidHijriDate { year: year as i64, month, day });
    }

    let cycles = (year - 1) / 30;
    let mut days = cycles as i64 * CYCLE_DAYS;
    for y in (cycles * 30 + 1)..year {
        days += year_length(y) as i64;
    }
    for m in 1..month {
        days += month_length(year, m) as i64;
    }
    days += (day - 1) as i64;

    Ok(ISLAMIC_EPOCH_JDN + days)
}

/// Converts a Hijri date to a civil date.
pub fn hijri_to_gregorian(year: u32, month: u32, day: u32) -> Result<NaiveDate, TaqwimError> {
    let jdn = hijri_to_jdn(year, month, day)?;
    from_jdn(jdn).ok_or(TaqwimError::InvalidHijriDate { year: year as i64, month, day })
}

/// Builds a [`HijriDate`] with names and holiday for the given components.
///
/// `fallback_holiday` is used only when the fixed table has no entry.
pub fn describe(year: u32, month: u32, day: u32, civil: NaiveDate, fallback_holiday: Option<String>) -> HijriDate {
    let weekday = civil.weekday();
    let holiday_name = names::holiday(month, day).map(str::to_string).or(fallback_holiday);

    HijriDate {
        day,
        month,
        year,
        month_name: names::hijri_month_name(month).to_string(),
        month_name_arabic: names::hijri_month_name_arabic(month).to_string(),
        day_name: names::weekday_name(weekday).to_string(),
        day_name_arabic: names::weekday_name_arabic(weekday).to_string(),
        is_holiday: holiday_name.is_some(),
        holiday_name,
        gregorian: civil,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_of_ramadan_1445() {
        let h = gregorian_to_hijri(ymd(2024, 3, 11));
        assert_eq!(h.ymd(), (1445, 9, 1));
        assert_eq!(h.month_name, "Ramadan");
        assert!(h.is_holiday);
        assert_eq!(h.holiday_name.as_deref(), Some("First Day of Ramadan"));
        assert_eq!(h.day_name, "Monday");
        assert_eq!(h.day_name_arabic, "الاثنين");
    }

    #[test]
    fn test_eids_1445() {
        let fitr = gregorian_to_hijri(ymd(2024, 4, 10));
        assert_eq!(fitr.ymd(), (1445, 10, 1));
        assert_eq!(fitr.holiday_name.as_deref(), Some("Eid al-Fitr"));

        let arafah = gregorian_to_hijri(ymd(2024, 6, 16));
        assert_eq!(arafah.ymd(), (1445, 12, 9));
        assert_eq!(arafah.holiday_name.as_deref(), Some("Day of Arafah"));
    }

    #[test]
    fn test_epoch_and_pre_epoch_sentinel() {
        assert_eq!(gregorian_to_hijri(ymd(622, 7, 19)).ymd(), (1, 1, 1));
        assert_eq!(gregorian_to_hijri(ymd(622, 7, 18)).ymd(), (1, 1, 1));
        assert_eq!(gregorian_to_hijri(ymd(1, 1, 1)).ymd(), (1, 1, 1));
        assert_eq!(hijri_to_gregorian(1, 1, 1).unwrap(), ymd(622, 7, 19));

        // The real 1 Muharram 1 is a new year; the sentinel is not a holiday
        assert!(gregorian_to_hijri(ymd(622, 7, 19)).is_holiday);
        let sentinel = gregorian_to_hijri(ymd(600, 1, 1));
        assert!(!sentinel.is_holiday);
        assert_eq!(sentinel.holiday_name, None);
        assert!(!to_hijri(ymd(622, 7, 20), -5).is_holiday);
    }

    #[test]
    fn test_adjustment_shifts_date() {
        let d = ymd(2024, 3, 11);
        assert_eq!(to_hijri(d, -1).ymd(), (1445, 8, 29));
        assert_eq!(to_hijri(d, 1).ymd(), (1445, 9, 2));
        // weekday still belongs to the civil date
        assert_eq!(to_hijri(d, 1).day_name, "Monday");
        assert_eq!(to_hijri(d, 500).ymd(), to_hijri(d, 30).ymd());
    }

    #[test]
    fn test_invalid_hijri_dates_fail_fast() {
        assert!(hijri_to_gregorian(0, 1, 1).is_err());
        assert!(hijri_to_gregorian(1445, 13, 1).is_err());
        assert!(hijri_to_gregorian(1445, 0, 1).is_err());
        assert!(hijri_to_gregorian(1445, 2, 30).is_err());
        // 1445 is year 5 of its cycle, a leap year
        assert!(hijri_to_gregorian(1445, 12, 30).is_ok());
        assert!(hijri_to_gregorian(1446, 12, 30).is_err());
    }

    #[test]
    fn test_leap_year_lengths() {
        for year in 1..=1600u32 {
            let total: u32 = (1..=12).map(|m| month_length(year, m)).sum();
            let in_cycle = (year - 1) % 30 + 1;
            let expected = if LEAP_YEARS_IN_CYCLE.contains(&in_cycle) { 355 } else { 354 };
            assert_eq!(total, expected, "year {year}");
        }
        let cycle: u32 = (1..=30).map(year_length).sum();
        assert_eq!(cycle as i64, CYCLE_DAYS);
    }

    #[test]
    fn test_stays_near_umm_al_qura() {
        // The tabular calendar is an approximation; it should never drift far
        // from the Umm al-Qura table inside that table's range.
        let mut d = ymd(1940, 1, 1);
        while d < ymd(2075, 12, 31) {
            let uaq = hijri_date::HijriDate::from_gr(d.year() as usize, d.month() as usize, d.day() as usize)
                .expect("in Umm al-Qura range");
            // Umm al-Qura months can be 30 days where the tabular month has 29
            let month_start = hijri_to_jdn(uaq.year() as u32, uaq.month() as u32, 1).expect("valid tabular month");
            let uaq_jdn = month_start + uaq.day() as i64 - 1;
            let drift = (uaq_jdn - to_jdn(d)).abs();
            assert!(drift <= 3, "{d}: drift {drift} days");
            d += Duration::days(17);
        }
    }

    proptest! {
        #[test]
        fn hijri_round_trip(year in 1u32..=1600, month in 1u32..=12, day in 1u32..=30) {
            prop_assume!(day <= month_length(year, month));
            let civil = hijri_to_gregorian(year, month, day).unwrap();
            prop_assert_eq!(gregorian_to_hijri(civil).ymd(), (year, month, day));
        }

        #[test]
        fn hijri_non_decreasing(days in 227_000i32..800_000, gap in 1i32..400) {
            let d1 = NaiveDate::from_num_days_from_ce_opt(days).unwrap();
            let d2 = NaiveDate::from_num_days_from_ce_opt(days + gap).unwrap();
            prop_assert!(gregorian_to_hijri(d1).ymd() <= gregorian_to_hijri(d2).ymd());
        }
    }
}
