use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failures of the remote calendar / prayer-time provider.
///
/// These never reach an end user: the resolvers absorb them and fall back
/// to the offline calculators.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProviderError {
    /// The request did not complete before the deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or body transfer failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-2xx HTTP status.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The body parsed but the provider reported a failure.
    #[error("provider returned code {code} with status {status:?}")]
    BadStatus { code: u16, status: String },

    /// Missing or mistyped field in the response.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response describes a different day than the one requested.
    #[error("response is for {actual}, expected {expected}")]
    DateMismatch { expected: NaiveDate, actual: NaiveDate },
}

/// Errors from taqwim operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaqwimError {
    /// Latitude/longitude NaN, infinite or out of range.
    #[error("Invalid coordinates ({lat}, {lng}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinates { lat: f64, lng: f64 },

    /// Civil date components that do not form a proleptic-Gregorian date.
    #[error("Invalid date: {reason}")]
    InvalidDate { reason: String },

    /// Hijri date components outside the tabular calendar.
    #[error("Invalid Hijri date {day}/{month}/{year}")]
    InvalidHijriDate { year: i64, month: u32, day: u32 },

    /// Timezone name not present in the IANA database.
    #[error("Unknown timezone {0:?}")]
    UnknownTimezone(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Remote provider failure.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Neither the remote provider nor the local calculator produced a result.
    #[error("No schedule or date could be produced")]
    Unavailable,
}

impl TaqwimError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates an `InvalidDate` error.
    pub fn invalid_date(reason: impl Into<String>) -> Self {
        Self::InvalidDate { reason: reason.into() }
    }

    /// Input errors are surfaced to callers and never retried.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinates { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidHijriDate { .. }
                | Self::UnknownTimezone(_)
                | Self::InvalidConfiguration { .. }
        )
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

/// Builds a civil date from raw components, failing on impossible dates.
pub fn civil_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, TaqwimError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TaqwimError::invalid_date(format!("{year:04}-{month:02}-{day:02} is not a calendar date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        let err = TaqwimError::InvalidCoordinates { lat: f64::NAN, lng: 0.0 };
        assert!(err.is_input_error());
        assert!(!err.is_provider_error());

        let err: TaqwimError = ProviderError::HttpStatus(500).into();
        assert!(err.is_provider_error());
        assert!(!err.is_input_error());
        assert!(!TaqwimError::Unavailable.is_input_error());
    }

    #[test]
    fn test_civil_date_rejects_impossible_days() {
        assert!(civil_date(2024, 2, 29).is_ok());
        assert!(matches!(civil_date(2023, 2, 29), Err(TaqwimError::InvalidDate { .. })));
        assert!(civil_date(2024, 13, 1).is_err());
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::BadStatus { code: 400, status: "BAD_REQUEST".into() };
        assert_eq!(err.to_string(), "provider returned code 400 with status \"BAD_REQUEST\"");
    }
}
