//! Low-precision solar position (about 1 arc-minute between 1950 and 2050).

use taqwim_calendar::julian::JDN_J2000;

pub(crate) fn dsin(d: f64) -> f64 {
    d.to_radians().sin()
}

pub(crate) fn dcos(d: f64) -> f64 {
    d.to_radians().cos()
}

pub(crate) fn dtan(d: f64) -> f64 {
    d.to_radians().tan()
}

pub(crate) fn darcsin(x: f64) -> f64 {
    x.asin().to_degrees()
}

/// `acos` in degrees with the argument clamped to [-1, 1].
///
/// Out-of-range arguments mean the sun never reaches the requested altitude;
/// clamping maps that to solar noon or midnight instead of NaN.
pub(crate) fn darccos_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos().to_degrees()
}

pub(crate) fn darctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

pub(crate) fn darccot(x: f64) -> f64 {
    (1.0 / x).atan().to_degrees()
}

fn fix(a: f64, b: f64) -> f64 {
    let a = a - b * (a / b).floor();
    if a < 0.0 { a + b } else { a }
}

pub(crate) fn fix_angle(a: f64) -> f64 {
    fix(a, 360.0)
}

/// Range-reduces hours to [0, 24).
pub(crate) fn fix_hour(a: f64) -> f64 {
    fix(a, 24.0)
}

/// Sun declination (degrees) and equation of time (hours) at Julian Date `jd`.
pub(crate) fn sun_position(jd: f64) -> (f64, f64) {
    // J2000.0 is noon, half a day after the civil day number
    let d = jd - JDN_J2000 as f64;
    let g = fix_angle(357.529 + 0.985_600_28 * d);
    let q = fix_angle(280.459 + 0.985_647_36 * d);
    let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));

    let e = 23.439 - 0.000_000_36 * d;

    let declination = darcsin(dsin(e) * dsin(l));
    let ra = fix_hour(darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0);
    let equation_of_time = q / 15.0 - ra;

    (declination, equation_of_time)
}
