//! Data models for emission zone processing
//!
//! This module contains the output records consumed by map and list front
//! ends: the emission zone itself, its classification enums and the
//! coordinate/ring geometry types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Geometry
// =============================================================================

/// A point in WGS84 decimal degrees, always latitude first
///
/// Serialized as a `[latitude, longitude]` array, the shape map libraries
/// expect for polygon vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.latitude, coordinate.longitude]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

/// One polygon boundary as an ordered list of coordinates
pub type Ring = Vec<Coordinate>;

/// Axis-aligned bounds over a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Bounds of a single point
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            min_latitude: coordinate.latitude,
            max_latitude: coordinate.latitude,
            min_longitude: coordinate.longitude,
            max_longitude: coordinate.longitude,
        }
    }

    /// Grow the bounds to include a coordinate
    pub fn extend(&mut self, coordinate: Coordinate) {
        self.min_latitude = self.min_latitude.min(coordinate.latitude);
        self.max_latitude = self.max_latitude.max(coordinate.latitude);
        self.min_longitude = self.min_longitude.min(coordinate.longitude);
        self.max_longitude = self.max_longitude.max(coordinate.longitude);
    }

    /// Bounds over every coordinate yielded, `None` when there are none
    pub fn from_coordinates<'a>(coordinates: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = coordinates.into_iter();
        let mut bounds = Self::from_coordinate(*iter.next()?);
        for coordinate in iter {
            bounds.extend(*coordinate);
        }
        Some(bounds)
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Emission zone type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneType {
    /// Zero-emission zone (only emission-free vehicles admitted)
    #[serde(rename = "ZE")]
    ZeroEmission,
    /// Low-emission zone (older, more polluting vehicles excluded)
    #[serde(rename = "LEZ")]
    LowEmission,
}

impl ZoneType {
    /// Short code used in the feed and in serialized output
    pub fn code(&self) -> &'static str {
        match self {
            ZoneType::ZeroEmission => "ZE",
            ZoneType::LowEmission => "LEZ",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Lifecycle status relative to the transformation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Active,
    Upcoming,
    Inactive,
}

impl ZoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneStatus::Active => "active",
            ZoneStatus::Upcoming => "upcoming",
            ZoneStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Emission Zone Record
// =============================================================================

/// A finalized emission zone ready for rendering
///
/// Built once per transformation run and not mutated afterwards. `status`
/// reflects the instant the transformation ran at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionZone {
    /// Source identifier, or a synthetic one derived from record position
    pub id: String,

    /// Display name, suffixed with a part number when split
    pub name: String,

    #[serde(rename = "type")]
    pub zone_type: ZoneType,

    /// Issuing authority when known, otherwise a token derived from the name
    pub city: String,

    /// Issuing authority, empty when absent
    pub authority: String,

    pub status: ZoneStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,

    /// One ring for a simple zone, several for a multi-polygon zone
    pub coordinates: Vec<Ring>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub restrictions: BTreeSet<String>,

    pub exemptions: BTreeSet<String>,
}

impl EmissionZone {
    /// Number of polygon rings
    pub fn ring_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Total number of coordinates across all rings
    pub fn coordinate_count(&self) -> usize {
        self.coordinates.iter().map(Vec::len).sum()
    }

    /// True when the zone consists of more than one ring
    pub fn is_multi_polygon(&self) -> bool {
        self.coordinates.len() > 1
    }

    /// Iterate over every coordinate in ring order
    pub fn all_coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.coordinates.iter().flatten()
    }

    /// Bounds of the zone geometry
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_coordinates(self.all_coordinates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_zone() -> EmissionZone {
        EmissionZone {
            id: "NL-ZE-0001".to_string(),
            name: "ZE Rotterdam".to_string(),
            zone_type: ZoneType::ZeroEmission,
            city: "Gemeente Rotterdam".to_string(),
            authority: "Gemeente Rotterdam".to_string(),
            status: ZoneStatus::Active,
            valid_from: Some("2025-01-01".to_string()),
            valid_to: None,
            coordinates: vec![
                vec![Coordinate::new(51.9, 4.4), Coordinate::new(51.95, 4.5)],
                vec![Coordinate::new(51.88, 4.3)],
            ],
            url: None,
            restrictions: BTreeSet::from(["Dieselvoertuigen".to_string()]),
            exemptions: BTreeSet::new(),
        }
    }

    #[test]
    fn test_zone_serialization_shape() {
        let json = serde_json::to_value(sample_zone()).unwrap();

        assert_eq!(json["type"], "ZE");
        assert_eq!(json["status"], "active");
        assert_eq!(json["validFrom"], "2025-01-01");
        assert!(json.get("validTo").is_none());
        assert!(json.get("url").is_none());
        assert_eq!(json["coordinates"][0][0][0], 51.9);
        assert_eq!(json["coordinates"][0][0][1], 4.4);
        assert_eq!(json["coordinates"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_zone_json_round_trip() {
        let zone = sample_zone();
        let json = serde_json::to_string(&zone).unwrap();
        let restored: EmissionZone = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, zone);
    }

    #[test]
    fn test_geometry_helpers() {
        let zone = sample_zone();

        assert_eq!(zone.ring_count(), 2);
        assert_eq!(zone.coordinate_count(), 3);
        assert!(zone.is_multi_polygon());

        let bounds = zone.bounds().unwrap();
        assert_eq!(bounds.min_latitude, 51.88);
        assert_eq!(bounds.max_latitude, 51.95);
        assert_eq!(bounds.min_longitude, 4.3);
        assert_eq!(bounds.max_longitude, 4.5);
    }

    #[test]
    fn test_bounding_box_empty() {
        let coordinates: Vec<Coordinate> = Vec::new();
        assert!(BoundingBox::from_coordinates(&coordinates).is_none());
    }

    #[test]
    fn test_display_codes() {
        assert_eq!(ZoneType::LowEmission.to_string(), "LEZ");
        assert_eq!(ZoneStatus::Upcoming.to_string(), "upcoming");
    }
}
