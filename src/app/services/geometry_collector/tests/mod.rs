//! Test utilities for geometry collection
//!
//! Provides XML builders for traffic regulation fragments in the different
//! shapes seen across feeds.

use roxmltree::Document;

use super::{CollectedGeometry, GeometryCollector};
use crate::config::GeoEnvelope;


/// Ring inside the envelope, latitude first
pub const RING_A: &str = "51.90 4.40 51.95 4.45 51.92 4.50 51.90 4.40";

/// Second ring inside the envelope, latitude first
pub const RING_B: &str = "52.35 4.85 52.40 4.90 52.37 4.95 52.35 4.85";

/// Ring written longitude first
pub const RING_SWAPPED: &str = "5.10 52.08 5.15 52.10 5.12 52.12 5.10 52.08";

/// Wrap condition markup in a namespaced traffic regulation element
pub fn traffic_regulation(conditions: &str) -> String {
    format!(
        r#"<tro:trafficRegulation xmlns:tro="http://datex2.eu/schema/3/trafficRegulation" xmlns:loc="http://datex2.eu/schema/3/locationReferencing" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{}</tro:trafficRegulation>"#,
        conditions
    )
}

/// A typed condition holding one GML polygon
pub fn location_condition(condition_type: &str, pos_list: &str) -> String {
    format!(
        r#"<tro:conditions xsi:type="{}"><tro:locationByOrder><loc:gmlPolygon><loc:exterior><loc:gmlLinearRing><loc:posList>{}</loc:posList></loc:gmlLinearRing></loc:exterior></loc:gmlPolygon></tro:locationByOrder></tro:conditions>"#,
        condition_type, pos_list
    )
}

/// Validity condition without geometry
pub fn validity_condition() -> String {
    r#"<tro:conditions xsi:type="tro:ValidityCondition"><tro:validity><overallStartTime>2025-01-01T00:00:00</overallStartTime></tro:validity></tro:conditions>"#
        .to_string()
}

/// Run the default collector over a traffic regulation document
pub fn collect(xml: &str) -> CollectedGeometry {
    let doc = Document::parse(xml).unwrap();
    GeometryCollector::new(GeoEnvelope::default()).collect(doc.root_element())
}
