//! Julian Day Number conversion for the proleptic Gregorian calendar.
//!
//! Integer forms of the Meeus formulas: every `floor(x * 365.25)` style term
//! is computed with `div_euclid` so results are exact for any year.

use chrono::{Datelike, NaiveDate};

/// JDN of 2000-01-01 (the J2000 civil day).
pub const JDN_J2000: i64 = 2_451_545;

/// Converts a civil date to its Julian Day Number.
///
/// January and February count as months 13 and 14 of the preceding year.
pub fn to_jdn(date: NaiveDate) -> i64 {
    jdn_from_ymd(date.year() as i64, date.month() as i64, date.day() as i64)
}

/// Same as [`to_jdn`] on raw components. No calendar validity checks.
pub fn jdn_from_ymd(year: i64, month: i64, day: i64) -> i64 {
    let (y, m) = if month <= 2 { (year - 1, month + 12) } else { (year, month) };

    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);

    // floor(365.25 * (y + 4716))
    let year_days = 365 * (y + 4716) + (y + 4716).div_euclid(4);
    // floor(30.6001 * (m + 1))
    let month_days = (306_001 * (m + 1)).div_euclid(10_000);

    year_days + month_days + day + b - 1524
}

/// Converts a Julian Day Number back to `(year, month, day)`.
///
/// Applies the century and 400-year corrections unconditionally (proleptic
/// Gregorian, no Julian-calendar switch).
pub fn ymd_from_jdn(jdn: i64) -> (i64, u32, u32) {
    // floor((z - 1867216.25) / 36524.25)
    let alpha = (4 * jdn - 7_468_865).div_euclid(146_097);
    let a = jdn + 1 + alpha - alpha.div_euclid(4);
    let b = a + 1524;
    // floor((b - 122.1) / 365.25)
    let c = (20 * b - 2442).div_euclid(7305);
    // floor(365.25 * c)
    let d = 365 * c + c.div_euclid(4);
    // floor((b - d) / 30.6001)
    let e = ((b - d) * 10_000).div_euclid(306_001);

    let day = b - d - (306_001 * e).div_euclid(10_000);
    let month = if e < 14 { e - 1 } else { e - 13 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };

    (year, month as u32, day as u32)
}

/// Converts a Julian Day Number to a civil date.
///
/// Returns `None` only when the year is outside what `NaiveDate` can hold.
pub fn from_jdn(jdn: i64) -> Option<NaiveDate> {
    let (year, month, day) = ymd_from_jdn(jdn);
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Astronomical Julian Date at 00:00 UT of `date`.
pub fn julian_date_at_midnight(date: NaiveDate) -> f64 {
    to_jdn(date) as f64 - 0.5
}
