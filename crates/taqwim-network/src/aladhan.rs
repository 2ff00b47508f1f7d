//! HTTP client for the Aladhan prayer-times API.
//!
//! Responses are decoded into strict structs: a missing or mistyped field is a
//! [`ProviderError::Malformed`], never a partially filled value.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use taqwim_calendar::describe;
use taqwim_types::{DailyPrayerTimes, HijriDate, ProviderError, ScheduleSource, TaqwimError};
use tracing::{debug, instrument, warn};

use crate::config::RemoteConfig;
use crate::provider::{RemoteSource, TimingsQuery};

const DATE_FORMAT: &str = "%d-%m-%Y";

/// Only `code` and `status`, decoded before the payload so a defined failure
/// response is reported as such rather than as a malformed body.
#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    code: u16,
    status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: Timings,
    date: TimingsDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Timings {
    fajr: String,
    #[serde(default)]
    sunrise: Option<String>,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

#[derive(Debug, Deserialize)]
struct TimingsDate {
    gregorian: Gregorian,
}

#[derive(Debug, Deserialize)]
struct Gregorian {
    /// `DD-MM-YYYY`
    date: String,
}

#[derive(Debug, Deserialize)]
struct ConversionData {
    hijri: Hijri,
    gregorian: Gregorian,
}

#[derive(Debug, Deserialize)]
struct Hijri {
    day: String,
    month: HijriMonth,
    year: String,
    #[serde(default)]
    holidays: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    number: u32,
}

/// Client for `{base}/timings/{DD-MM-YYYY}` and `{base}/gToH/{DD-MM-YYYY}`.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl AladhanClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the HTTP client cannot be built.
    pub fn new(config: RemoteConfig) -> Result<Self, TaqwimError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TaqwimError::invalid_config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Races `fut` against the configured deadline.
    async fn with_deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        let timeout = self.config.timeout();
        tokio::time::timeout(timeout, fut)
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String, query: &[(&str, String)]) -> Result<T, ProviderError> {
        self.with_deadline(async {
            let response = self.client.get(&url).query(query).send().await.map_err(transport)?;
            let status = response.status();
            if !status.is_success() {
                return Err(ProviderError::HttpStatus(status.as_u16()));
            }
            let body = response.bytes().await.map_err(transport)?;
            decode(&body)
        })
        .await
    }

    #[instrument(skip(self), fields(lat = query.coords.lat, lng = query.coords.lng, date = %query.date))]
    async fn timings(&self, query: TimingsQuery) -> Result<DailyPrayerTimes, ProviderError> {
        let url = self.config.endpoint(&format!("timings/{}", query.date.format(DATE_FORMAT)));
        // Same rounding as the cache key, so a cached entry describes its key
        let (lat, lng) = query.coords.rounded();
        let params = [
            ("latitude", format!("{lat:.2}")),
            ("longitude", format!("{lng:.2}")),
            ("method", query.method.provider_id().to_string()),
            ("school", query.madhab.school_id().to_string()),
        ];
        let data: TimingsData = self.get_json(url, &params).await?;
        check_date(&data.date.gregorian, query.date)?;

        let times = DailyPrayerTimes {
            date: query.date,
            fajr: parse_time("Fajr", &data.timings.fajr)?,
            sunrise: match &data.timings.sunrise {
                Some(s) => Some(parse_time("Sunrise", s)?),
                None => None,
            },
            dhuhr: parse_time("Dhuhr", &data.timings.dhuhr)?,
            asr: parse_time("Asr", &data.timings.asr)?,
            maghrib: parse_time("Maghrib", &data.timings.maghrib)?,
            isha: parse_time("Isha", &data.timings.isha)?,
            source: ScheduleSource::Remote,
        };
        debug!(fajr = %times.fajr, isha = %times.isha, "fetched prayer times");
        Ok(times)
    }

    #[instrument(skip(self))]
    async fn hijri(&self, date: NaiveDate) -> Result<HijriDate, ProviderError> {
        let url = self.config.endpoint(&format!("gToH/{}", date.format(DATE_FORMAT)));
        let data: ConversionData = self.get_json(url, &[]).await?;
        check_date(&data.gregorian, date)?;

        let day = parse_number("hijri.day", &data.hijri.day)?;
        let year = parse_number("hijri.year", &data.hijri.year)?;
        let month = data.hijri.month.number;
        if !(1..=30).contains(&day) || !(1..=12).contains(&month) || year == 0 {
            return Err(ProviderError::Malformed(format!("hijri date {day}/{month}/{year} out of range")));
        }

        let remote_holiday = data.hijri.holidays.into_iter().next();
        Ok(describe(year, month, day, date, remote_holiday))
    }
}

#[async_trait]
impl RemoteSource for AladhanClient {
    async fn fetch_prayer_times(&self, query: TimingsQuery) -> Result<DailyPrayerTimes, TaqwimError> {
        query.coords.validate()?;
        self.timings(query).await.map_err(|e| {
            warn!(provider = self.name(), error = %e, "prayer times request failed");
            e.into()
        })
    }

    async fn fetch_hijri_date(&self, date: NaiveDate) -> Result<HijriDate, TaqwimError> {
        self.hijri(date).await.map_err(|e| {
            warn!(provider = self.name(), error = %e, "Hijri date request failed");
            e.into()
        })
    }

    fn name(&self) -> &str {
        "Aladhan"
    }
}

fn transport(e: reqwest::Error) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ProviderError> {
    let head: StatusEnvelope = serde_json::from_slice(body).map_err(malformed)?;
    if head.code != 200 || head.status.as_str() != Some("OK") {
        let status = match head.status {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(ProviderError::BadStatus { code: head.code, status });
    }
    let envelope: Envelope<T> = serde_json::from_slice(body).map_err(malformed)?;
    Ok(envelope.data)
}

fn malformed(e: serde_json::Error) -> ProviderError {
    ProviderError::Malformed(e.to_string())
}

fn check_date(gregorian: &Gregorian, expected: NaiveDate) -> Result<(), ProviderError> {
    let actual = NaiveDate::parse_from_str(&gregorian.date, DATE_FORMAT)
        .map_err(|e| ProviderError::Malformed(format!("gregorian.date {:?}: {}", gregorian.date, e)))?;
    if actual != expected {
        return Err(ProviderError::DateMismatch { expected, actual });
    }
    Ok(())
}

/// Parses `"HH:mm"` or `"HH:mm (TZ)"`.
fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, ProviderError> {
    let clock = raw.split_whitespace().next().unwrap_or_default();
    NaiveTime::parse_from_str(clock, "%H:%M")
        .map_err(|e| ProviderError::Malformed(format!("{field} {raw:?}: {e}")))
}

fn parse_number(field: &str, raw: &str) -> Result<u32, ProviderError> {
    raw.trim()
        .parse()
        .map_err(|e| ProviderError::Malformed(format!("{field} {raw:?}: {e}")))
}
