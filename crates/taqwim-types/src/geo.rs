//! Coordinates and location descriptions.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::TaqwimError;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Creates validated coordinates.
    ///
    /// # Errors
    /// Returns `InvalidCoordinates` for NaN, infinite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, TaqwimError> {
        let coords = Self { lat, lng };
        coords.validate()?;
        Ok(coords)
    }

    /// Creates coordinates without range checks.
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Re-checks coordinates that were built literally or deserialized.
    pub fn validate(&self) -> Result<(), TaqwimError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(TaqwimError::InvalidCoordinates { lat: self.lat, lng: self.lng })
        }
    }

    /// Coordinates rounded to two decimals (about 1 km), used for cache keys.
    pub fn rounded(&self) -> (f64, f64) {
        // `+ 0.0` folds -0.0 into 0.0 so both hemispheres share one key
        let round = |v: f64| (v * 100.0).round() / 100.0 + 0.0;
        (round(self.lat), round(self.lng))
    }
}

/// Mecca, used whenever no location is available.
pub const MECCA: Coordinates = Coordinates::new_unchecked(21.3891, 39.8579);

/// Location information with coordinates, place name and timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Geographic coordinates.
    pub coords: Coordinates,
    /// City name (if available).
    pub city: Option<String>,
    /// Country name (if available).
    pub country: Option<String>,
    /// IANA timezone of the location.
    pub timezone: Tz,
}

impl LocationInfo {
    /// The documented fallback location: Mecca, Asia/Riyadh.
    pub fn mecca() -> Self {
        Self {
            coords: MECCA,
            city: Some("Mecca".to_string()),
            country: Some("Saudi Arabia".to_string()),
            timezone: chrono_tz::Asia::Riyadh,
        }
    }

    /// Returns formatted location string (e.g., "Mecca, Saudi Arabia").
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            format!("{:.4}°, {:.4}°", self.coords.lat, self.coords.lng)
        } else {
            parts.join(", ")
        }
    }
}

impl Default for LocationInfo {
    fn default() -> Self {
        Self::mecca()
    }
}

/// Supplier of the device location, e.g. a GPS or permission-gated OS service.
///
/// `None` means the location is unknown or permission was denied.
pub trait LocationSource: Send + Sync {
    fn current_location(&self) -> Option<LocationInfo>;
}

/// A source that always reports the same place.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Option<LocationInfo>);

impl LocationSource for FixedLocation {
    fn current_location(&self) -> Option<LocationInfo> {
        self.0.clone()
    }
}

/// Returns the reported location, or `fallback` when there is none.
pub fn resolve_location(source: &dyn LocationSource, fallback: &LocationInfo) -> LocationInfo {
    source.current_location().unwrap_or_else(|| fallback.clone())
}

/// Parses an IANA timezone name such as `"Asia/Riyadh"`.
pub fn parse_timezone(name: &str) -> Result<Tz, TaqwimError> {
    name.parse::<Tz>().map_err(|_| TaqwimError::UnknownTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(21.4225, 39.8262).is_ok());
        assert!(Coordinates::new(90.0, -180.0).is_ok());
        assert!(Coordinates::new(90.5, 0.0).is_err());
        assert!(Coordinates::new(0.0, 180.01).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinates::new_unchecked(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_rounded_folds_negative_zero() {
        let c = Coordinates::new_unchecked(-0.001, 39.8579);
        let (lat, lng) = c.rounded();
        assert_eq!(format!("{lat:.2}_{lng:.2}"), "0.00_39.86");
    }

    #[test]
    fn test_location_info_display_name() {
        assert_eq!(LocationInfo::mecca().display_name(), "Mecca, Saudi Arabia");

        let info = LocationInfo {
            coords: Coordinates::new_unchecked(-6.2088, 106.8456),
            city: None,
            country: None,
            timezone: chrono_tz::Asia::Jakarta,
        };
        assert!(info.display_name().contains("-6.2088"));
    }

    #[test]
    fn test_missing_location_falls_back() {
        let fallback = LocationInfo::mecca();
        let resolved = resolve_location(&FixedLocation(None), &fallback);
        assert_eq!(resolved.coords, MECCA);
        assert_eq!(resolved.timezone, chrono_tz::Asia::Riyadh);
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Riyadh").unwrap(), chrono_tz::Asia::Riyadh);
        assert!(matches!(parse_timezone("Mars/Olympus"), Err(TaqwimError::UnknownTimezone(_))));
    }
}
