//! Test utilities for the transformation pipeline
//!
//! Builds complete feed documents from small record fragments and runs them
//! through a transformer pinned to a fixed instant.

use chrono::{DateTime, TimeZone, Utc};

use super::{TransformResult, ZoneTransformer};
use crate::config::TransformConfig;

mod transform_tests;

/// Rotterdam-area ring, latitude first
pub const ROTTERDAM_RING: &str = "51.90 4.40 51.95 4.45 51.92 4.50 51.90 4.40";

/// Second Rotterdam-area ring, latitude first
pub const ROTTERDAM_PORT_RING: &str = "51.88 4.28 51.89 4.30 51.87 4.31 51.88 4.28";

/// Utrecht-area ring, longitude first
pub const UTRECHT_RING_SWAPPED: &str = "5.10 52.08 5.15 52.10 5.12 52.12 5.10 52.08";

/// Instant used for status evaluation
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Location condition holding one polygon
pub fn location(pos_list: &str) -> String {
    format!(
        r#"<tro:conditions xsi:type="tro:LocationCondition"><tro:locationByOrder><loc:gmlPolygon><loc:exterior><loc:posList>{}</loc:posList></loc:exterior></loc:gmlPolygon></tro:locationByOrder></tro:conditions>"#,
        pos_list
    )
}

/// Validity condition with optional bounds
pub fn validity(start: Option<&str>, end: Option<&str>) -> String {
    let start = start
        .map(|value| format!("<com:overallStartTime>{}</com:overallStartTime>", value))
        .unwrap_or_default();
    let end = end
        .map(|value| format!("<com:overallEndTime>{}</com:overallEndTime>", value))
        .unwrap_or_default();
    format!(
        r#"<tro:conditions xsi:type="tro:ValidityCondition"><tro:validity><com:validityTimeSpecification>{}{}</com:validityTimeSpecification></tro:validity></tro:conditions>"#,
        start, end
    )
}

/// Regulation record builder
#[derive(Debug, Default, Clone)]
pub struct Record {
    id: Option<String>,
    name: Option<String>,
    authority: Option<String>,
    conditions: Vec<String>,
    traffic_regulation: bool,
}

impl Record {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            traffic_regulation: true,
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self {
            traffic_regulation: true,
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn authority(mut self, authority: &str) -> Self {
        self.authority = Some(authority.to_string());
        self
    }

    pub fn condition(mut self, condition: String) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn without_traffic_regulation(mut self) -> Self {
        self.traffic_regulation = false;
        self
    }

    pub fn build(&self) -> String {
        let id = self
            .id
            .as_ref()
            .map(|id| format!(r#" id="{}""#, id))
            .unwrap_or_default();
        let name = self
            .name
            .as_ref()
            .map(|name| {
                format!(
                    r#"<uvar:name><com:values><com:value lang="nl">{}</com:value></com:values></uvar:name>"#,
                    name
                )
            })
            .unwrap_or_default();
        let authority = self
            .authority
            .as_ref()
            .map(|authority| {
                format!(
                    r#"<uvar:issuingAuthority><com:values><com:value lang="nl">{}</com:value></com:values></uvar:issuingAuthority>"#,
                    authority
                )
            })
            .unwrap_or_default();
        let traffic = if self.traffic_regulation {
            format!(
                "<tro:trafficRegulationOrder><tro:trafficRegulation>{}</tro:trafficRegulation></tro:trafficRegulationOrder>",
                self.conditions.concat()
            )
        } else {
            String::new()
        };

        format!(
            "<uvar:urbanVehicleAccessRegulation{}>{}{}{}</uvar:urbanVehicleAccessRegulation>",
            id, name, authority, traffic
        )
    }
}

/// Wrap records in a namespaced feed payload
pub fn document(records: &[Record]) -> String {
    let body: String = records.iter().map(Record::build).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<d2:payload xmlns:d2="http://datex2.eu/schema/3/d2Payload" xmlns:uvar="http://datex2.eu/schema/3/urbanVehicleAccessRegulations" xmlns:tro="http://datex2.eu/schema/3/trafficRegulation" xmlns:com="http://datex2.eu/schema/3/common" xmlns:loc="http://datex2.eu/schema/3/locationReferencing" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{}</d2:payload>"#,
        body
    )
}

/// Transform with a given configuration at [`now`]
pub fn transform_with(config: TransformConfig, xml: &str) -> TransformResult {
    ZoneTransformer::new(config)
        .unwrap()
        .transform_at(xml, now())
        .unwrap()
}

/// Transform with the default configuration at [`now`]
pub fn transform(xml: &str) -> TransformResult {
    transform_with(TransformConfig::default(), xml)
}
