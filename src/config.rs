//! Configuration management and validation.
//!
//! Provides the transformation settings (geographic envelope, language
//! preference, label mode, multi-polygon handling) together with layered
//! loading from a JSON file and validation rules.

use crate::constants::{
    DEFAULT_LANGUAGE, DEFAULT_MAX_LATITUDE, DEFAULT_MAX_LONGITUDE, DEFAULT_MIN_LATITUDE,
    DEFAULT_MIN_LONGITUDE, PLACEHOLDER_NAME_PREFIX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Bounding envelope used to decide coordinate axis order
///
/// A pair is accepted as `(latitude, longitude)` when it falls inside the
/// envelope as-is, or as `(longitude, latitude)` when only the swapped
/// reading does. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoEnvelope {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Default for GeoEnvelope {
    fn default() -> Self {
        Self {
            min_latitude: DEFAULT_MIN_LATITUDE,
            max_latitude: DEFAULT_MAX_LATITUDE,
            min_longitude: DEFAULT_MIN_LONGITUDE,
            max_longitude: DEFAULT_MAX_LONGITUDE,
        }
    }
}

impl GeoEnvelope {
    /// Check whether a latitude/longitude reading lies inside the envelope
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// Validate that bounds are finite and ordered
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            self.min_latitude,
            self.max_latitude,
            self.min_longitude,
            self.max_longitude,
        ];
        if bounds.iter().any(|value| !value.is_finite()) {
            return Err(Error::configuration("Envelope bounds must be finite numbers"));
        }

        if self.min_latitude > self.max_latitude {
            return Err(Error::configuration(format!(
                "Envelope latitude range is inverted: {} > {}",
                self.min_latitude, self.max_latitude
            )));
        }

        if self.min_longitude > self.max_longitude {
            return Err(Error::configuration(format!(
                "Envelope longitude range is inverted: {} > {}",
                self.min_longitude, self.max_longitude
            )));
        }

        Ok(())
    }
}

/// How restriction and exemption labels are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Fixed descriptive labels, identical for every zone
    #[default]
    Fixed,
    /// Labels decoded from the regulation's vehicle characteristics
    Decoded,
}

/// Settings for one transformation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Envelope used for coordinate order detection
    pub envelope: GeoEnvelope,

    /// Preferred language tag for names and authorities
    pub preferred_language: String,

    /// Prefix for placeholder names of unnamed records
    pub placeholder_prefix: String,

    /// Restriction/exemption label source
    pub label_mode: LabelMode,

    /// Emit one zone per ring instead of one multi-polygon zone
    pub split_multi_polygons: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            envelope: GeoEnvelope::default(),
            preferred_language: DEFAULT_LANGUAGE.to_string(),
            placeholder_prefix: PLACEHOLDER_NAME_PREFIX.to_string(),
            label_mode: LabelMode::Fixed,
            split_multi_polygons: false,
        }
    }
}

impl TransformConfig {
    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Set the geographic envelope
    pub fn with_envelope(mut self, envelope: GeoEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Set the preferred language tag
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.preferred_language = language.into();
        self
    }

    /// Set the label mode
    pub fn with_label_mode(mut self, label_mode: LabelMode) -> Self {
        self.label_mode = label_mode;
        self
    }

    /// Emit multi-polygon zones as separate numbered parts
    pub fn with_split_multi_polygons(mut self) -> Self {
        self.split_multi_polygons = true;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.envelope.validate()?;

        if self.preferred_language.trim().is_empty() {
            return Err(Error::configuration("Preferred language cannot be empty"));
        }

        if self.placeholder_prefix.trim().is_empty() {
            return Err(Error::configuration("Placeholder name prefix cannot be empty"));
        }

        Ok(())
    }
}
