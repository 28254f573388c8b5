//! Tests for document-level transformation behaviour

use super::*;
use crate::app::models::{Coordinate, ZoneType};
use crate::config::{GeoEnvelope, LabelMode};
use crate::Error;

#[test]
fn test_single_zone() {
    let xml = document(&[Record::new("ZE Rotterdam")
        .id("NL-0599-ZE")
        .authority("Gemeente Rotterdam")
        .condition(validity(Some("2025-01-01T00:00:00"), None))
        .condition(location(ROTTERDAM_RING))]);

    let result = transform(&xml);

    assert_eq!(result.zone_count(), 1);
    let zone = &result.zones[0];
    assert_eq!(zone.id, "NL-0599-ZE");
    assert_eq!(zone.name, "ZE Rotterdam");
    assert_eq!(zone.zone_type, ZoneType::ZeroEmission);
    assert_eq!(zone.city, "Gemeente Rotterdam");
    assert_eq!(zone.authority, "Gemeente Rotterdam");
    assert_eq!(zone.valid_from.as_deref(), Some("2025-01-01T00:00:00"));
    assert_eq!(zone.coordinates, vec![vec![
        Coordinate::new(51.90, 4.40),
        Coordinate::new(51.95, 4.45),
        Coordinate::new(51.92, 4.50),
        Coordinate::new(51.90, 4.40),
    ]]);
    assert_eq!(result.stats.regulations_found, 1);
    assert!(!result.stats.has_warnings());
}

#[test]
fn test_two_polygons_in_one_record_make_one_zone() {
    let xml = document(&[Record::new("ZE Rotterdam")
        .condition(location(ROTTERDAM_RING))
        .condition(location(ROTTERDAM_PORT_RING))]);

    let result = transform(&xml);

    assert_eq!(result.zone_count(), 1);
    assert_eq!(result.zones[0].ring_count(), 2);
    assert_eq!(result.stats.rings, 2);
}

#[test]
fn test_records_sharing_a_name_are_grouped() {
    let xml = document(&[
        Record::new("ZE Rotterdam").id("first").condition(location(ROTTERDAM_RING)),
        Record::new("Milieuzone Utrecht").id("utrecht").condition(location(UTRECHT_RING_SWAPPED)),
        Record::new("ZE Rotterdam").id("second").condition(location(ROTTERDAM_PORT_RING)),
    ]);

    let result = transform(&xml);

    assert_eq!(result.zone_count(), 2);
    assert_eq!(result.zones[0].id, "first");
    assert_eq!(result.zones[0].ring_count(), 2);
    assert_eq!(result.zones[1].id, "utrecht");
    assert_eq!(result.stats.records_merged, 1);
}

#[test]
fn test_swapped_coordinates_are_normalized() {
    let xml = document(&[Record::new("Milieuzone Utrecht").condition(location(UTRECHT_RING_SWAPPED))]);

    let result = transform(&xml);
    let zone = &result.zones[0];

    assert_eq!(zone.coordinates[0][0], Coordinate::new(52.08, 5.10));
    assert_eq!(zone.zone_type, ZoneType::LowEmission);
    assert_eq!(zone.city, "Milieuzone");
    assert_eq!(result.stats.pairs_swapped, 4);
}

#[test]
fn test_record_without_geometry_is_dropped() {
    let xml = document(&[
        Record::new("ZE Leeg").condition(validity(Some("2025-01-01"), None)),
        Record::new("ZE Rotterdam").condition(location(ROTTERDAM_RING)),
    ]);

    let result = transform(&xml);

    assert_eq!(result.zone_count(), 1);
    assert_eq!(result.zones[0].name, "ZE Rotterdam");
    assert_eq!(result.stats.records_without_geometry, 1);
    assert_eq!(result.stats.zones_dropped, 1);
    assert!(result.stats.warnings.iter().any(|warning| warning.contains("ZE Leeg")));
}

#[test]
fn test_record_with_only_invalid_coordinates_is_dropped() {
    let xml = document(&[Record::new("ZE Buitenland").condition(location("0 0 10 10 abc def"))]);

    let result = transform(&xml);

    assert!(result.is_empty());
    assert_eq!(result.stats.pairs_discarded, 3);
}

#[test]
fn test_record_without_traffic_regulation_is_skipped() {
    let xml = document(&[
        Record::new("ZE Nergens").without_traffic_regulation(),
        Record::new("ZE Rotterdam").condition(location(ROTTERDAM_RING)),
    ]);

    let result = transform(&xml);

    assert_eq!(result.zone_count(), 1);
    assert_eq!(result.stats.regulations_found, 2);
    assert_eq!(result.stats.regulations_skipped, 1);
    assert!(result.stats.warnings[0].contains("ZE Nergens"));
}

#[test]
fn test_unnamed_record_gets_placeholder_and_synthetic_id() {
    let xml = document(&[
        Record::new("ZE Rotterdam").id("NL-1").condition(location(ROTTERDAM_RING)),
        Record::unnamed().condition(location(ROTTERDAM_PORT_RING)),
    ]);

    let result = transform(&xml);
    let zone = &result.zones[1];

    assert_eq!(zone.name, "Onbekende Stad 2");
    assert_eq!(zone.id, "zone_1");
    assert_eq!(zone.city, "Onbekende");
    assert_eq!(zone.zone_type, ZoneType::LowEmission);
}

#[test]
fn test_duplicate_source_ids_are_disambiguated() {
    let xml = document(&[
        Record::new("ZE Rotterdam").id("NL-1").condition(location(ROTTERDAM_RING)),
        Record::new("ZE Utrecht").id("NL-1").condition(location(UTRECHT_RING_SWAPPED)),
    ]);

    let result = transform(&xml);
    let ids: Vec<_> = result.zones.iter().map(|zone| zone.id.as_str()).collect();

    assert_eq!(ids, vec!["NL-1", "NL-1_1"]);
    assert_eq!(result.stats.duplicate_ids, 1);
}

#[test]
fn test_malformed_document_is_fatal() {
    let transformer = ZoneTransformer::new(TransformConfig::default()).unwrap();

    let error = transformer
        .transform_document("feed.xml", "<payload><unclosed></payload>", now())
        .unwrap_err();

    assert!(error.is_malformed_document());
    assert!(matches!(error, Error::MalformedDocument { ref document, .. } if document == "feed.xml"));
}

#[test]
fn test_document_without_records_is_empty() {
    let result = transform(&document(&[]));

    assert!(result.is_empty());
    assert_eq!(result.stats.regulations_found, 0);
}

#[test]
fn test_transformation_is_idempotent() {
    let xml = document(&[
        Record::new("ZE Rotterdam").condition(location(ROTTERDAM_RING)),
        Record::new("Milieuzone Utrecht").condition(location(UTRECHT_RING_SWAPPED)),
        Record::new("ZE Rotterdam").condition(location(ROTTERDAM_PORT_RING)),
    ]);
    let transformer = ZoneTransformer::new(TransformConfig::default()).unwrap();

    let first = transformer.transform_at(&xml, now()).unwrap();
    let second = transformer.transform_at(&xml, now()).unwrap();

    assert_eq!(first.zones, second.zones);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_all_output_coordinates_are_in_envelope() {
    let xml = document(&[Record::new("ZE Mix").condition(location(
        "51.9 4.4 4.5 51.95 999 999 52.0 4.6 x y 7.0 53.0",
    ))]);

    let result = transform(&xml);
    let envelope = GeoEnvelope::default();

    assert_eq!(result.zones[0].coordinate_count(), 4);
    assert!(
        result.zones[0]
            .all_coordinates()
            .all(|c| envelope.contains(c.latitude, c.longitude))
    );
}

#[test]
fn test_split_multi_polygons() {
    let xml = document(&[Record::new("ZE Rotterdam")
        .id("NL-1")
        .condition(location(ROTTERDAM_RING))
        .condition(location(ROTTERDAM_PORT_RING))]);

    let result = transform_with(TransformConfig::default().with_split_multi_polygons(), &xml);

    assert_eq!(result.zone_count(), 2);
    assert_eq!(result.zones[0].name, "ZE Rotterdam (deel 1)");
    assert_eq!(result.zones[1].id, "NL-1-2");
    assert_eq!(result.zones[1].city, "Rotterdam");
}

#[test]
fn test_fixed_and_decoded_labels() {
    let characteristics = r#"<tro:conditions xsi:type="tro:VehicleCondition"><tro:vehicleCharacteristics><com:fuelType>diesel</com:fuelType></tro:vehicleCharacteristics></tro:conditions>"#;
    let xml = document(&[Record::new("ZE Rotterdam")
        .condition(location(ROTTERDAM_RING))
        .condition(characteristics.to_string())]);

    let fixed = transform(&xml);
    assert!(fixed.zones[0].restrictions.contains("Dieselvoertuigen"));
    assert!(fixed.zones[0].exemptions.contains("Oldtimers"));

    let decoded = transform_with(TransformConfig::default().with_label_mode(LabelMode::Decoded), &xml);
    let restrictions: Vec<_> = decoded.zones[0].restrictions.iter().cloned().collect();
    assert_eq!(restrictions, vec!["Brandstof Type: diesel"]);
    assert!(decoded.zones[0].exemptions.is_empty());
}

#[test]
fn test_json_output_shape() {
    let xml = document(&[Record::new("ZE Rotterdam")
        .id("NL-1")
        .condition(location(ROTTERDAM_RING))]);

    let result = transform(&xml);
    let json = serde_json::to_value(&result.zones).unwrap();

    assert_eq!(json[0]["id"], "NL-1");
    assert_eq!(json[0]["type"], "ZE");
    assert_eq!(json[0]["status"], "active");
    assert_eq!(json[0]["coordinates"][0][0][0], 51.9);
    assert_eq!(json[0]["coordinates"][0][0][1], 4.4);
    assert!(json[0].get("validFrom").is_none());
}

#[test]
fn test_custom_envelope() {
    let belgium = GeoEnvelope {
        min_latitude: 49.5,
        max_latitude: 51.5,
        min_longitude: 2.5,
        max_longitude: 6.4,
    };
    let xml = document(&[Record::new("LEZ Antwerpen").condition(location("4.40 51.21 4.42 51.22 4.45 51.20"))]);

    let result = transform_with(TransformConfig::default().with_envelope(belgium), &xml);

    assert_eq!(result.zones[0].coordinates[0][0], Coordinate::new(51.21, 4.40));
    assert_eq!(result.zones[0].city, "Antwerpen");
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let config = TransformConfig::default().with_language("");
    assert!(ZoneTransformer::new(config).is_err());
}

#[test]
fn test_doctype_prolog_is_accepted() {
    let xml = document(&[Record::new("ZE Rotterdam").condition(location(ROTTERDAM_RING))])
        .replacen("<d2:payload", "<!DOCTYPE d2:payload>\n<d2:payload", 1);

    let result = transform(&xml);

    assert_eq!(result.zone_count(), 1);
    assert_eq!(result.zones[0].name, "ZE Rotterdam");
}
