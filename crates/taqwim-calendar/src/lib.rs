//! Julian Day Number and tabular Hijri calendar conversion.
//!
//! All conversions are pure and total over civil dates; the only fallible
//! entry points validate Hijri components.

pub mod hijri;
pub mod julian;
pub mod names;

pub use hijri::{
    describe, gregorian_to_hijri, hijri_to_gregorian, hijri_to_jdn, hijri_ymd_from_jdn, is_leap_year,
    month_length, to_hijri, year_length, ISLAMIC_EPOCH_JDN,
};
pub use julian::{from_jdn, julian_date_at_midnight, to_jdn, ymd_from_jdn};
pub use names::{hijri_month_name, hijri_month_name_arabic, holiday};
