//! WASM bindings for Taqwim - Hijri dates and prayer schedules
//!
//! Everything here is offline: the tabular calendar and the local solar
//! calculator. `now` always comes from the JavaScript side.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use taqwim_core::{
    get_hijri_date, get_prayer_schedule, parse_timezone, CalculationMethod, Coordinates, EngineConfig, HijriDate,
    Madhab, ScheduleView, TaqwimError,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(date_str: &str) -> Result<NaiveDate, TaqwimError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| TaqwimError::invalid_date(format!("{date_str:?}: {e}")))
}

fn engine_config(method_id: Option<u8>, hanafi: bool, adjustment: i64) -> Result<EngineConfig, TaqwimError> {
    let method = match method_id {
        Some(id) => CalculationMethod::from_provider_id(id)
            .ok_or_else(|| TaqwimError::invalid_config(format!("unknown method id {id}")))?,
        None => CalculationMethod::default(),
    };
    let madhab = if hanafi { Madhab::Hanafi } else { Madhab::Shafi };
    EngineConfig::builder().method(method).madhab(madhab).hijri_adjustment(adjustment).build()
}

/// Converts a date string (YYYY-MM-DD) to a Hijri date.
///
/// # Example (JavaScript)
/// ```js
/// const h = hijriDate("2024-03-11", 0);
/// console.log(h.monthName); // "Ramadan"
/// ```
#[wasm_bindgen(js_name = hijriDate)]
pub fn hijri_date(date_str: &str, adjustment: i32) -> Result<WasmHijriDate, JsValue> {
    let date = parse_date(date_str).map_err(js_error)?;
    let config = engine_config(None, false, i64::from(adjustment)).map_err(js_error)?;
    Ok(get_hijri_date(date, &config).into())
}

/// Computes the prayer schedule around `now_ms` (milliseconds since the Unix epoch).
///
/// # Example (JavaScript)
/// ```js
/// const view = prayerSchedule(21.4225, 39.8262, "Asia/Riyadh", Date.now(), 4, false);
/// console.log(view.next, view.countdown);
/// ```
#[wasm_bindgen(js_name = prayerSchedule)]
pub fn prayer_schedule(
    lat: f64,
    lng: f64,
    timezone: &str,
    now_ms: f64,
    method_id: Option<u8>,
    hanafi: bool,
) -> Result<WasmScheduleView, JsValue> {
    let view = schedule(lat, lng, timezone, now_ms, method_id, hanafi).map_err(js_error)?;
    Ok(view.into())
}

fn schedule(
    lat: f64,
    lng: f64,
    timezone: &str,
    now_ms: f64,
    method_id: Option<u8>,
    hanafi: bool,
) -> Result<ScheduleView, TaqwimError> {
    let coords = Coordinates::new(lat, lng)?;
    let tz = parse_timezone(timezone)?;
    let now = DateTime::<Utc>::from_timestamp_millis(now_ms as i64)
        .ok_or_else(|| TaqwimError::invalid_date(format!("timestamp {now_ms} out of range")))?;
    let config = engine_config(method_id, hanafi, 0)?;
    get_prayer_schedule(coords, tz, now, &config)
}

/// WASM-friendly representation of HijriDate for TypeScript generation.
#[derive(Debug, Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmHijriDate {
    pub day: u32,
    pub month: u32,
    pub year: u32,
    pub month_name: String,
    pub month_name_arabic: String,
    pub day_name: String,
    pub day_name_arabic: String,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub gregorian: String,
}

impl From<HijriDate> for WasmHijriDate {
    fn from(h: HijriDate) -> Self {
        Self {
            day: h.day,
            month: h.month,
            year: h.year,
            month_name: h.month_name,
            month_name_arabic: h.month_name_arabic,
            day_name: h.day_name,
            day_name_arabic: h.day_name_arabic,
            is_holiday: h.is_holiday,
            holiday_name: h.holiday_name,
            gregorian: h.gregorian.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Serialize, tsify::Tsify)]
#[serde(rename_all = "camelCase")]
pub struct WasmPrayerInstant {
    pub name: String,
    pub arabic_name: String,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    /// RFC 3339 with offset.
    pub at: String,
    pub is_current: bool,
    pub is_next: bool,
    pub seconds_until: i64,
}

#[derive(Debug, Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmScheduleView {
    pub date: String,
    pub timezone: String,
    pub prayers: Vec<WasmPrayerInstant>,
    pub sunrise: Option<String>,
    pub current: String,
    pub next: String,
    pub seconds_until_next: i64,
    pub countdown: String,
}

impl From<ScheduleView> for WasmScheduleView {
    fn from(view: ScheduleView) -> Self {
        let prayers = view
            .instants
            .iter()
            .map(|i| WasmPrayerInstant {
                name: i.prayer.to_string(),
                arabic_name: i.prayer.arabic_name().to_string(),
                time: i.at.format("%H:%M").to_string(),
                at: i.at.to_rfc3339(),
                is_current: i.is_current,
                is_next: i.is_next,
                seconds_until: i.seconds_until,
            })
            .collect();

        Self {
            date: view.date.format("%Y-%m-%d").to_string(),
            timezone: view.timezone.name().to_string(),
            prayers,
            sunrise: view.sunrise.map(|s| s.format("%H:%M").to_string()),
            current: view.current.to_string(),
            next: view.next.to_string(),
            seconds_until_next: view.seconds_until_next,
            countdown: view.countdown(),
        }
    }
}
