//! Polygon boundary discovery inside regulation records
//!
//! Location conditions and their polygons are not tagged consistently across
//! feeds, so both are found through fallback cascades:
//!
//! - [`strategies::CONDITION_CASCADE`] narrows the regulation down to the
//!   condition nodes that carry geometry
//! - [`strategies::POLYGON_CASCADE`] finds polygon boundaries inside each of
//!   those conditions
//!
//! Each polygon's coordinate list is handed to the
//! [coordinate parser](crate::app::services::coordinate_parser) and every
//! non-empty result becomes one ring. Missing coordinate lists and empty
//! parses are skipped without affecting sibling polygons.
//!
//! ## Usage
//!
//! ```rust
//! use emission_zones::GeoEnvelope;
//! use emission_zones::app::services::geometry_collector::GeometryCollector;
//!
//! let xml = r#"<trafficRegulation>
//!     <conditions type="tro:LocationCondition">
//!         <gmlPolygon><posList>51.9 4.4 51.95 4.5 51.9 4.5</posList></gmlPolygon>
//!     </conditions>
//! </trafficRegulation>"#;
//!
//! let doc = roxmltree::Document::parse(xml).unwrap();
//! let collector = GeometryCollector::new(GeoEnvelope::default());
//! let geometry = collector.collect(doc.root_element());
//!
//! assert_eq!(geometry.rings.len(), 1);
//! ```

pub mod cascade;
pub mod strategies;

#[cfg(test)]
pub mod tests;

pub use cascade::{CascadeMatch, SelectionStrategy, resolve};
pub use strategies::{CONDITION_CASCADE, ConditionStrategy, POLYGON_CASCADE, PolygonStrategy};

use crate::app::models::Ring;
use crate::app::services::coordinate_parser::parse_coordinates;
use crate::app::services::xml_nodes::{
    element_descendants, first_descendant_named, has_local_name, text_content,
};
use crate::config::GeoEnvelope;
use crate::constants::{MIN_ANONYMOUS_POS_LIST_TOKENS, POS_LIST_FRAGMENT, elements};
use roxmltree::{Node, NodeId};
use std::collections::HashSet;
use tracing::debug;

/// Counters describing one geometry collection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryStats {
    /// Condition nodes examined for polygons
    pub conditions_examined: usize,

    /// Polygon candidates found across all conditions
    pub polygons_found: usize,

    /// Polygons without any coordinate list
    pub polygons_without_pos_list: usize,

    /// Coordinate lists already consumed by an earlier candidate
    pub duplicate_pos_lists: usize,

    /// Coordinate lists that produced no valid coordinates
    pub empty_rings: usize,

    /// Coordinate pairs accepted into rings
    pub pairs_accepted: usize,

    /// Accepted pairs that had to be swapped to latitude-first
    pub pairs_swapped: usize,

    /// Pairs dropped for bad tokens or falling outside the envelope
    pub pairs_discarded: usize,
}

/// Rings found for one regulation record
#[derive(Debug, Clone, Default)]
pub struct CollectedGeometry {
    /// Non-empty rings in discovery order
    pub rings: Vec<Ring>,

    /// Condition tier that supplied the candidates
    pub condition_strategy: Option<ConditionStrategy>,

    pub stats: GeometryStats,
}

impl CollectedGeometry {
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

/// Collects polygon rings from a traffic regulation subtree
#[derive(Debug, Clone)]
pub struct GeometryCollector {
    envelope: GeoEnvelope,
}

impl GeometryCollector {
    /// Create a collector using the given envelope for axis order detection
    pub fn new(envelope: GeoEnvelope) -> Self {
        Self { envelope }
    }

    /// Collect every ring under `scope`, normally a `trafficRegulation` node
    pub fn collect(&self, scope: Node<'_, '_>) -> CollectedGeometry {
        let mut geometry = CollectedGeometry::default();
        let mut consumed: HashSet<NodeId> = HashSet::new();

        let conditions = resolve(scope, &CONDITION_CASCADE);
        geometry.condition_strategy = conditions.strategy;

        if conditions.is_empty() {
            debug!("No condition nodes found");
            return geometry;
        }

        for (condition_index, condition) in conditions.nodes.iter().enumerate() {
            geometry.stats.conditions_examined += 1;

            let polygons = resolve(*condition, &POLYGON_CASCADE);
            debug!(
                "Condition {}: {} polygon candidate(s)",
                condition_index,
                polygons.len()
            );

            for (polygon_index, polygon) in polygons.nodes.iter().enumerate() {
                geometry.stats.polygons_found += 1;
                self.collect_polygon(*polygon, polygon_index, &mut consumed, &mut geometry);
            }
        }

        debug!(
            "Collected {} ring(s) from {} condition(s)",
            geometry.rings.len(),
            geometry.stats.conditions_examined
        );

        geometry
    }

    fn collect_polygon(
        &self,
        polygon: Node<'_, '_>,
        polygon_index: usize,
        consumed: &mut HashSet<NodeId>,
        geometry: &mut CollectedGeometry,
    ) {
        let Some(pos_list) = find_pos_list(polygon) else {
            debug!("Polygon {} has no coordinate list, skipping", polygon_index);
            geometry.stats.polygons_without_pos_list += 1;
            return;
        };

        if !consumed.insert(pos_list.id()) {
            geometry.stats.duplicate_pos_lists += 1;
            return;
        }

        let content = text_content(pos_list);
        let parsed = parse_coordinates(content.trim(), &self.envelope);

        geometry.stats.pairs_accepted += parsed.coordinates.len();
        geometry.stats.pairs_swapped += parsed.swapped;
        geometry.stats.pairs_discarded += parsed.discarded();

        if parsed.coordinates.is_empty() {
            debug!("Polygon {} yielded no valid coordinates, skipping", polygon_index);
            geometry.stats.empty_rings += 1;
            return;
        }

        geometry.rings.push(parsed.coordinates);
    }
}

/// Locate the coordinate list belonging to a polygon candidate
///
/// Tries, in order: the candidate itself when it is a `posList`, its first
/// `posList` descendant, then the first descendant whose name mentions
/// "poslist" or whose text looks like a long number sequence.
pub fn find_pos_list<'a, 'input>(polygon: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    if has_local_name(polygon, elements::POS_LIST) {
        return Some(polygon);
    }

    if let Some(pos_list) = first_descendant_named(polygon, elements::POS_LIST) {
        return Some(pos_list);
    }

    element_descendants(polygon).find(|node| {
        node.tag_name()
            .name()
            .to_lowercase()
            .contains(POS_LIST_FRAGMENT)
            || text_content(*node).split_whitespace().count() > MIN_ANONYMOUS_POS_LIST_TOKENS
    })
}
