//! Document transformation pipeline
//!
//! Turns one emission zone XML document into an ordered list of
//! [`EmissionZone`] records. The pipeline runs once per document:
//!
//! 1. **Parse** the document; a malformed document is the only fatal error
//! 2. **Extract** metadata and geometry per `urbanVehicleAccessRegulation`
//! 3. **Classify** zone type, city and status against a fixed instant
//! 4. **Aggregate** records into zones grouped by display name
//!
//! Missing substructure inside a record is recovered locally and reported
//! through [`TransformStats`]. The transformer performs no I/O and holds no
//! state between runs, so the same input and instant always give the same
//! output.
//!
//! # Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use emission_zones::{TransformConfig, ZoneStatus, ZoneTransformer};
//!
//! # fn example() -> emission_zones::Result<()> {
//! let xml = r#"<payload>
//!   <urbanVehicleAccessRegulation id="NL-ZE-1">
//!     <name><values><value lang="nl">ZE Rotterdam</value></values></name>
//!     <trafficRegulation>
//!       <conditions type="tro:LocationCondition">
//!         <gmlPolygon><posList>51.90 4.40 51.95 4.45 51.92 4.50</posList></gmlPolygon>
//!       </conditions>
//!     </trafficRegulation>
//!   </urbanVehicleAccessRegulation>
//! </payload>"#;
//!
//! let transformer = ZoneTransformer::new(TransformConfig::default())?;
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
//! let result = transformer.transform_at(xml, now)?;
//!
//! assert_eq!(result.zones.len(), 1);
//! assert_eq!(result.zones[0].status, ZoneStatus::Active);
//! println!("{}", result.summary());
//! # Ok(())
//! # }
//! ```

pub mod stats;

#[cfg(test)]
pub mod tests;

pub use stats::{TransformResult, TransformStats};

use crate::app::models::{EmissionZone, Ring};
use crate::app::services::attribute_extractor::{AttributeExtractor, RegulationAttributes};
use crate::app::services::classifier::{Classifier, determine_status, parse_validity_date};
use crate::app::services::geometry_collector::GeometryCollector;
use crate::app::services::label_synthesizer::LabelSynthesizer;
use crate::app::services::xml_nodes::{descendants_named, first_descendant_named};
use crate::app::services::zone_aggregator::ZoneAggregator;
use crate::config::TransformConfig;
use crate::constants::elements;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, info, warn};

/// Name used for documents transformed without an explicit source label
const UNNAMED_DOCUMENT: &str = "<input>";

/// Converts emission zone documents into zone records
#[derive(Debug, Clone)]
pub struct ZoneTransformer {
    config: TransformConfig,
    classifier: Classifier,
    collector: GeometryCollector,
    extractor: AttributeExtractor,
    labels: LabelSynthesizer,
}

impl ZoneTransformer {
    /// Create a transformer, validating the configuration
    pub fn new(config: TransformConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: Classifier::new()?,
            collector: GeometryCollector::new(config.envelope),
            extractor: AttributeExtractor::new(&config),
            labels: LabelSynthesizer::new(config.label_mode),
            config,
        })
    }

    /// Transform a document, evaluating status against the current time
    pub fn transform(&self, xml: &str) -> Result<TransformResult> {
        self.transform_at(xml, Utc::now())
    }

    /// Transform a document, evaluating status against `now`
    pub fn transform_at(&self, xml: &str, now: DateTime<Utc>) -> Result<TransformResult> {
        self.transform_document(UNNAMED_DOCUMENT, xml, now)
    }

    /// Transform a document labelled `document` in errors and logs
    pub fn transform_document(
        &self,
        document: &str,
        xml: &str,
        now: DateTime<Utc>,
    ) -> Result<TransformResult> {
        let doc = Document::parse_with_options(xml, parsing_options())
            .map_err(|e| Error::malformed_document(document, e))?;

        let mut stats = TransformStats::new();
        let mut aggregator = ZoneAggregator::new();

        let regulations: Vec<Node<'_, '_>> =
            descendants_named(doc.root(), elements::REGULATION).collect();
        stats.regulations_found = regulations.len();
        info!("{}: found {} regulation record(s)", document, regulations.len());

        for (index, regulation) in regulations.into_iter().enumerate() {
            let traffic_regulation = first_descendant_named(regulation, elements::TRAFFIC_REGULATION);
            let attributes = self.extractor.extract(regulation, traffic_regulation, index);

            let Some(traffic_regulation) = traffic_regulation else {
                warn!("{}: no traffic regulation for '{}', skipping", document, attributes.name);
                stats.regulations_skipped += 1;
                stats.add_warning(format!("No traffic regulation found for '{}'", attributes.name));
                continue;
            };

            debug!("Processing record {}: {}", index, attributes.name);

            let geometry = self.collector.collect(traffic_regulation);
            stats.record_geometry(&geometry.stats);
            if geometry.is_empty() {
                debug!("Record {} ('{}') has no usable geometry", index, attributes.name);
                stats.records_without_geometry += 1;
            }

            let zone = self.build_zone(
                attributes,
                geometry.rings,
                traffic_regulation,
                now,
                &mut stats,
            );
            aggregator.add(zone);
        }

        let aggregated = aggregator.finish(self.config.split_multi_polygons);

        for name in &aggregated.dropped_groups {
            stats.add_warning(format!("Dropped '{}': no valid geometry", name));
        }

        stats.records_merged = aggregated.merged_records;
        stats.zones_dropped = aggregated.dropped_groups.len();
        stats.duplicate_ids = aggregated.renamed_ids;
        stats.zones_emitted = aggregated.zones.len();
        stats.rings = aggregated.zones.iter().map(EmissionZone::ring_count).sum();

        info!("{}: {}", document, stats.summary());

        Ok(TransformResult::new(aggregated.zones, stats))
    }

    fn build_zone(
        &self,
        attributes: RegulationAttributes,
        rings: Vec<Ring>,
        traffic_regulation: Node<'_, '_>,
        now: DateTime<Utc>,
        stats: &mut TransformStats,
    ) -> EmissionZone {
        let zone_type = self.classifier.zone_type(&attributes.name);
        let city = if attributes.authority.is_empty() {
            self.classifier.city_token(&attributes.name)
        } else {
            attributes.authority.clone()
        };

        let valid_from = validity_bound(attributes.valid_from.as_deref(), "start", &attributes.name, stats);
        let valid_to = validity_bound(attributes.valid_to.as_deref(), "end", &attributes.name, stats);
        let status = determine_status(valid_from, valid_to, now);

        let labels = self.labels.synthesize(traffic_regulation);

        EmissionZone {
            id: attributes.id,
            name: attributes.name,
            zone_type,
            city,
            authority: attributes.authority,
            status,
            valid_from: attributes.valid_from,
            valid_to: attributes.valid_to,
            coordinates: rings,
            url: attributes.url,
            restrictions: labels.restrictions,
            exemptions: labels.exemptions,
        }
    }
}

/// Parsing options accepting a DOCTYPE prolog
fn parsing_options() -> ParsingOptions {
    ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    }
}

/// Parse one bound of the validity window, noting unreadable values
fn validity_bound(
    raw: Option<&str>,
    bound: &str,
    name: &str,
    stats: &mut TransformStats,
) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_validity_date(raw);

    if parsed.is_none() {
        warn!("Unparseable validity {} '{}' for '{}', ignoring for status", bound, raw, name);
        stats.add_warning(format!("Unparseable validity {} '{}' for '{}'", bound, raw, name));
    }

    parsed
}
