//! Zone type, city token and lifecycle status classification

use crate::app::models::{ZoneStatus, ZoneType};
use crate::constants::{CITY_PATTERNS, UNKNOWN_CITY, zone_markers};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use tracing::debug;

/// Naive date-time layouts tried after RFC 3339
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Offset date-time layouts not covered by RFC 3339
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Name-based classifier with precompiled patterns
#[derive(Debug, Clone)]
pub struct Classifier {
    ze_word: Regex,
    city_patterns: Vec<Regex>,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let ze_word = compile(zone_markers::ZE_WORD_PATTERN)?;
        let city_patterns = CITY_PATTERNS
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ze_word,
            city_patterns,
        })
    }

    /// Classify a zone by its display name
    ///
    /// Zero-emission when the uppercased name has a standalone `ZE` word or
    /// mentions `ZERO` or `NUL-EMISSIE`; low-emission otherwise.
    pub fn zone_type(&self, name: &str) -> ZoneType {
        let upper = name.to_uppercase();

        if self.ze_word.is_match(&upper)
            || upper.contains(zone_markers::ZERO)
            || upper.contains(zone_markers::NUL_EMISSIE)
        {
            ZoneType::ZeroEmission
        } else {
            ZoneType::LowEmission
        }
    }

    /// Derive a city token from a zone name
    ///
    /// Used only when the record has no issuing authority.
    pub fn city_token(&self, name: &str) -> String {
        for pattern in &self.city_patterns {
            if let Some(city) = pattern.captures(name).and_then(|captures| captures.get(1)) {
                return city.as_str().to_string();
            }
        }

        name.split_whitespace()
            .next()
            .unwrap_or(UNKNOWN_CITY)
            .to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::configuration(format!("Invalid classifier pattern '{}': {}", pattern, e)))
}

/// Parse a validity timestamp as found in the feed
///
/// Accepts RFC 3339, ISO date-times with or without a compact offset (naive
/// values are taken as UTC) and plain dates (midnight UTC).
pub fn parse_validity_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    debug!("Unrecognised validity date: {}", raw);
    None
}

/// Lifecycle status of a validity window at `now`
///
/// A future start wins over a past end. Absent bounds never restrict.
pub fn determine_status(
    valid_from: Option<DateTime<Utc>>,
    valid_to: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ZoneStatus {
    if valid_from.is_some_and(|from| from > now) {
        return ZoneStatus::Upcoming;
    }

    if valid_to.is_some_and(|to| to < now) {
        return ZoneStatus::Inactive;
    }

    ZoneStatus::Active
}
