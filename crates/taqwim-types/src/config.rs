use serde::{Deserialize, Serialize};

use crate::error::TaqwimError;
use crate::geo::LocationInfo;
use crate::hijri::CalendarProfile;
use crate::method::{CalculationMethod, HighLatitudeRule, Madhab};

/// Largest accepted Hijri day adjustment, in either direction.
pub const MAX_HIJRI_ADJUSTMENT: i64 = 30;
const STRICT_HIJRI_ADJUSTMENT: i64 = 2;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub method: CalculationMethod,
    /// Asr school.
    pub madhab: Madhab,
    pub high_latitude: HighLatitudeRule,
    /// Hijri day offset for local moon sighting. Clamped to [-30, 30].
    pub hijri_adjustment: i64,
    /// Display label only; conversion is always tabular.
    pub calendar_profile: CalendarProfile,
    /// Used when the location source reports nothing.
    pub fallback_location: LocationInfo,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            method: CalculationMethod::default(),
            madhab: Madhab::default(),
            high_latitude: HighLatitudeRule::default(),
            hijri_adjustment: 0,
            calendar_profile: CalendarProfile::default(),
            fallback_location: LocationInfo::mecca(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    pub fn method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    pub fn high_latitude(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude = rule;
        self
    }

    pub fn hijri_adjustment(mut self, days: i64) -> Self {
        self.hijri_adjustment = days.clamp(-MAX_HIJRI_ADJUSTMENT, MAX_HIJRI_ADJUSTMENT);
        self
    }

    pub fn calendar_profile(mut self, profile: CalendarProfile) -> Self {
        self.calendar_profile = profile;
        self
    }

    pub fn fallback_location(mut self, location: LocationInfo) -> Self {
        self.fallback_location = location;
        self
    }

    /// Re-checks a configuration that was deserialized or built literally.
    pub fn validate(&self) -> Result<(), TaqwimError> {
        if self.hijri_adjustment.abs() > MAX_HIJRI_ADJUSTMENT {
            return Err(TaqwimError::invalid_config(format!(
                "Hijri adjustment {} outside [-30, 30]",
                self.hijri_adjustment
            )));
        }
        self.fallback_location.coords.validate()
    }
}

/// Builder with validation for `EngineConfig`.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    method: Option<CalculationMethod>,
    madhab: Option<Madhab>,
    high_latitude: Option<HighLatitudeRule>,
    hijri_adjustment: Option<i64>,
    calendar_profile: Option<CalendarProfile>,
    fallback_location: Option<LocationInfo>,
    strict_adjustment: bool,
}

impl EngineConfigBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn method(mut self, method: CalculationMethod) -> Self { self.method = Some(method); self }
    pub fn madhab(mut self, madhab: Madhab) -> Self { self.madhab = Some(madhab); self }
    pub fn high_latitude(mut self, rule: HighLatitudeRule) -> Self { self.high_latitude = Some(rule); self }
    pub fn hijri_adjustment(mut self, days: i64) -> Self { self.hijri_adjustment = Some(days); self }
    pub fn calendar_profile(mut self, profile: CalendarProfile) -> Self { self.calendar_profile = Some(profile); self }
    pub fn fallback_location(mut self, location: LocationInfo) -> Self { self.fallback_location = Some(location); self }

    /// Enables strict adjustment bounds [-2, 2].
    pub fn strict_adjustment(mut self, strict: bool) -> Self { self.strict_adjustment = strict; self }

    /// Builds and validates.
    pub fn build(self) -> Result<EngineConfig, TaqwimError> {
        let adjustment = self.hijri_adjustment.unwrap_or(0);

        if self.strict_adjustment && adjustment.abs() > STRICT_HIJRI_ADJUSTMENT {
            return Err(TaqwimError::invalid_config(format!(
                "Adjustment {} outside strict bounds [-2, 2]",
                adjustment
            )));
        }

        let fallback_location = self.fallback_location.unwrap_or_else(LocationInfo::mecca);
        fallback_location.coords.validate()?;

        Ok(EngineConfig {
            method: self.method.unwrap_or_default(),
            madhab: self.madhab.unwrap_or_default(),
            high_latitude: self.high_latitude.unwrap_or_default(),
            hijri_adjustment: adjustment.clamp(-MAX_HIJRI_ADJUSTMENT, MAX_HIJRI_ADJUSTMENT),
            calendar_profile: self.calendar_profile.unwrap_or_default(),
            fallback_location,
        })
    }
}
