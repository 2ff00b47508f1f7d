//! Prayer Times Calculation Module.
//!
//! Computes the five daily prayers (plus sunrise) from the sun's declination
//! and the equation of time, using hour angles for twilight depression angles
//! and the Asr shadow ratio. Offline and total: never fails for valid
//! coordinates.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use taqwim_calendar::julian_date_at_midnight;
use taqwim_types::{
    AngleOrMinutes, CalculationMethod, Coordinates, DailyPrayerTimes, EngineConfig, HighLatitudeRule, Madhab,
    MethodParams, ScheduleSource,
};

use crate::solar::{darccos_clamped, darccot, dcos, dsin, dtan, fix_hour, sun_position};

/// Apparent altitude of the sun's upper limb at sunrise/sunset, with refraction.
const SUNRISE_ANGLE: f64 = 0.833;
/// Angle assumed for Isha when the method uses a fixed interval.
const DEFAULT_ISHA_ANGLE: f64 = 18.0;
/// Angle assumed for Maghrib when the method uses a fixed interval.
const DEFAULT_MAGHRIB_ANGLE: f64 = 4.0;
const ITERATIONS: usize = 2;

/// Prayer calculation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PrayerParams {
    pub method: CalculationMethod,
    pub madhab: Madhab,
    pub high_latitude: HighLatitudeRule,
}

impl PrayerParams {
    pub fn new(method: CalculationMethod) -> Self {
        Self { method, ..Default::default() }
    }

    /// Muslim World League: Fajr 18°, Isha 17°.
    pub fn mwl() -> Self {
        Self::new(CalculationMethod::MuslimWorldLeague)
    }

    /// Kemenag / MABIMS: Fajr 20°, Isha 18°.
    pub fn kemenag() -> Self {
        Self::new(CalculationMethod::Kemenag)
    }

    pub fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    pub fn high_latitude(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude = rule;
        self
    }
}

impl From<&EngineConfig> for PrayerParams {
    fn from(config: &EngineConfig) -> Self {
        Self { method: config.method, madhab: config.madhab, high_latitude: config.high_latitude }
    }
}

/// Times in fractional hours of local solar time.
#[derive(Debug, Clone, Copy)]
struct DayTimes {
    fajr: f64,
    sunrise: f64,
    dhuhr: f64,
    asr: f64,
    sunset: f64,
    maghrib: f64,
    isha: f64,
}

impl Default for DayTimes {
    fn default() -> Self {
        Self { fajr: 5.0, sunrise: 6.0, dhuhr: 12.0, asr: 13.0, sunset: 18.0, maghrib: 18.0, isha: 18.0 }
    }
}

struct Solver {
    /// Julian Date of local solar midnight.
    jd: f64,
    lat: f64,
    method: MethodParams,
    asr_factor: f64,
}

impl Solver {
    fn mid_day(&self, t: f64) -> f64 {
        let (_, eqt) = sun_position(self.jd + t / 24.0);
        fix_hour(12.0 - eqt)
    }

    /// Time when the sun is `angle` degrees below the horizon; `direction`
    /// is -1 before noon and +1 after.
    fn sun_angle_time(&self, angle: f64, t: f64, direction: f64) -> f64 {
        let (decl, _) = sun_position(self.jd + t / 24.0);
        let noon = self.mid_day(t);
        let cos_h = (-dsin(angle) - dsin(decl) * dsin(self.lat)) / (dcos(decl) * dcos(self.lat));
        noon + direction * darccos_clamped(cos_h) / 15.0
    }

    fn asr_time(&self, t: f64) -> f64 {
        let (decl, _) = sun_position(self.jd + t / 24.0);
        let altitude = darccot(self.asr_factor + dtan((self.lat - decl).abs()));
        self.sun_angle_time(-altitude, t, 1.0)
    }

    fn compute(&self, prev: DayTimes) -> DayTimes {
        let sunset = self.sun_angle_time(SUNRISE_ANGLE, prev.sunset, 1.0);
        let maghrib = match self.method.maghrib {
            AngleOrMinutes::Angle(a) => self.sun_angle_time(a, prev.maghrib, 1.0),
            AngleOrMinutes::Minutes(m) => sunset + m / 60.0,
        };
        let isha = match self.method.isha {
            AngleOrMinutes::Angle(a) => self.sun_angle_time(a, prev.isha, 1.0),
            AngleOrMinutes::Minutes(m) => maghrib + m / 60.0,
        };

        DayTimes {
            fajr: self.sun_angle_time(self.method.fajr_angle, prev.fajr, -1.0),
            sunrise: self.sun_angle_time(SUNRISE_ANGLE, prev.sunrise, -1.0),
            dhuhr: self.mid_day(prev.dhuhr),
            asr: self.asr_time(prev.asr),
            sunset,
            maghrib,
            isha,
        }
    }
}

/// Fraction of the night that bounds a twilight of `angle` degrees.
fn night_portion(rule: HighLatitudeRule, angle: f64) -> Option<f64> {
    match rule {
        HighLatitudeRule::None => None,
        HighLatitudeRule::MiddleOfNight => Some(0.5),
        HighLatitudeRule::OneSeventh => Some(1.0 / 7.0),
        HighLatitudeRule::AngleBased => Some(angle / 60.0),
    }
}

fn adjust_high_latitudes(times: &mut DayTimes, method: &MethodParams, rule: HighLatitudeRule) {
    let night = fix_hour(times.sunrise - times.sunset);

    if let Some(portion) = night_portion(rule, method.fajr_angle) {
        let limit = portion * night;
        if fix_hour(times.sunrise - times.fajr) > limit {
            times.fajr = times.sunrise - limit;
        }
    }

    let isha_angle = match method.isha {
        AngleOrMinutes::Angle(a) => a,
        AngleOrMinutes::Minutes(_) => DEFAULT_ISHA_ANGLE,
    };
    if let Some(portion) = night_portion(rule, isha_angle) {
        let limit = portion * night;
        if fix_hour(times.isha - times.sunset) > limit {
            times.isha = times.sunset + limit;
        }
    }

    let maghrib_angle = match method.maghrib {
        AngleOrMinutes::Angle(a) => a,
        AngleOrMinutes::Minutes(_) => DEFAULT_MAGHRIB_ANGLE,
    };
    if let Some(portion) = night_portion(rule, maghrib_angle) {
        let limit = portion * night;
        if fix_hour(times.maghrib - times.sunset) > limit {
            times.maghrib = times.sunset + limit;
        }
    }
}

/// Converts fractional hours to a wall-clock time rounded to the minute.
fn to_wall_clock(hours: f64) -> NaiveTime {
    let minutes = (fix_hour(hours + 0.5 / 60.0) * 60.0).floor() as u32 % 1440;
    NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Calculates prayer times for a given date and location.
///
/// # Arguments
/// * `date` - The civil date in the location's timezone
/// * `coords` - Geographic coordinates (latitude, longitude)
/// * `utc_offset_hours` - The timezone's UTC offset on `date`, in hours
/// * `params` - Method, Asr school and high-latitude rule
///
/// # Returns
/// Wall-clock times for `date` in the given offset, rounded to the minute.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use taqwim_astronomy::{calculate_prayer_times, PrayerParams};
/// use taqwim_types::Coordinates;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let jakarta = Coordinates::new(-6.2088, 106.8456).unwrap();
///
/// let times = calculate_prayer_times(date, jakarta, 7.0, &PrayerParams::kemenag());
/// println!("Fajr: {}", times.fajr);
/// println!("Maghrib: {}", times.maghrib);
/// ```
pub fn calculate_prayer_times(
    date: NaiveDate,
    coords: Coordinates,
    utc_offset_hours: f64,
    params: &PrayerParams,
) -> DailyPrayerTimes {
    let method = params.method.params();
    let solver = Solver {
        jd: julian_date_at_midnight(date) - coords.lng / (15.0 * 24.0),
        lat: coords.lat,
        method,
        asr_factor: params.madhab.asr_shadow_factor(),
    };

    let mut times = DayTimes::default();
    for _ in 0..ITERATIONS {
        times = solver.compute(times);
    }
    adjust_high_latitudes(&mut times, &method, params.high_latitude);

    let shift = utc_offset_hours - coords.lng / 15.0;
    DailyPrayerTimes {
        date,
        fajr: to_wall_clock(times.fajr + shift),
        sunrise: Some(to_wall_clock(times.sunrise + shift)),
        dhuhr: to_wall_clock(times.dhuhr + shift),
        asr: to_wall_clock(times.asr + shift),
        maghrib: to_wall_clock(times.maghrib + shift),
        isha: to_wall_clock(times.isha + shift),
        source: ScheduleSource::Local,
    }
}
