//! Selection tiers for location conditions and polygon boundaries
//!
//! Both cascades go from the strictest structural match to the loosest. The
//! arrays below fix the order in which tiers are tried.

use super::cascade::SelectionStrategy;
use crate::app::services::xml_nodes::{descendants_named, element_descendants, type_attribute};
use crate::constants::{POLYGON_FRAGMENT, condition_types, elements};
use roxmltree::Node;

/// Tiers locating the condition nodes that carry spatial boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionStrategy {
    /// `conditions` typed exactly `tro:LocationCondition`
    QualifiedLocationType,
    /// `conditions` typed `LocationCondition` without a prefix
    UnqualifiedLocationType,
    /// `conditions` whose type mentions `Location` anywhere
    TypeContainsLocation,
    /// Every `conditions` node, accepting over-inclusion
    AllConditions,
}

/// Condition tiers in the order they are tried
pub const CONDITION_CASCADE: [ConditionStrategy; 4] = [
    ConditionStrategy::QualifiedLocationType,
    ConditionStrategy::UnqualifiedLocationType,
    ConditionStrategy::TypeContainsLocation,
    ConditionStrategy::AllConditions,
];

impl SelectionStrategy for ConditionStrategy {
    fn label(&self) -> &'static str {
        match self {
            ConditionStrategy::QualifiedLocationType => "qualified location condition",
            ConditionStrategy::UnqualifiedLocationType => "unqualified location condition",
            ConditionStrategy::TypeContainsLocation => "location-like condition",
            ConditionStrategy::AllConditions => "any condition",
        }
    }

    fn select<'a, 'input>(&self, scope: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        let conditions = descendants_named(scope, elements::CONDITIONS);

        match self {
            ConditionStrategy::QualifiedLocationType => conditions
                .filter(|node| type_attribute(*node) == Some(condition_types::LOCATION_QUALIFIED))
                .collect(),
            ConditionStrategy::UnqualifiedLocationType => conditions
                .filter(|node| type_attribute(*node) == Some(condition_types::LOCATION_UNQUALIFIED))
                .collect(),
            ConditionStrategy::TypeContainsLocation => conditions
                .filter(|node| {
                    type_attribute(*node)
                        .is_some_and(|kind| kind.contains(condition_types::LOCATION_FRAGMENT))
                })
                .collect(),
            ConditionStrategy::AllConditions => conditions.collect(),
        }
    }
}

/// Tiers locating polygon boundaries inside one condition node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonStrategy {
    /// Elements named `gmlPolygon`
    GmlPolygonTag,
    /// Elements whose name contains "polygon", any case
    PolygonInTagName,
    /// Elements whose name or declared type contains "polygon", any case
    PolygonInTagOrType,
    /// Bare `posList` elements, each treated as a single-ring polygon
    BarePosList,
}

/// Polygon tiers in the order they are tried
pub const POLYGON_CASCADE: [PolygonStrategy; 4] = [
    PolygonStrategy::GmlPolygonTag,
    PolygonStrategy::PolygonInTagName,
    PolygonStrategy::PolygonInTagOrType,
    PolygonStrategy::BarePosList,
];

fn name_mentions_polygon(node: Node<'_, '_>) -> bool {
    node.tag_name()
        .name()
        .to_lowercase()
        .contains(POLYGON_FRAGMENT)
}

fn type_mentions_polygon(node: Node<'_, '_>) -> bool {
    type_attribute(node).is_some_and(|kind| kind.to_lowercase().contains(POLYGON_FRAGMENT))
}

impl SelectionStrategy for PolygonStrategy {
    fn label(&self) -> &'static str {
        match self {
            PolygonStrategy::GmlPolygonTag => "gmlPolygon element",
            PolygonStrategy::PolygonInTagName => "polygon-named element",
            PolygonStrategy::PolygonInTagOrType => "polygon-typed element",
            PolygonStrategy::BarePosList => "bare posList element",
        }
    }

    fn select<'a, 'input>(&self, scope: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        match self {
            PolygonStrategy::GmlPolygonTag => {
                descendants_named(scope, elements::GML_POLYGON).collect()
            }
            PolygonStrategy::PolygonInTagName => element_descendants(scope)
                .filter(|node| name_mentions_polygon(*node))
                .collect(),
            PolygonStrategy::PolygonInTagOrType => element_descendants(scope)
                .filter(|node| name_mentions_polygon(*node) || type_mentions_polygon(*node))
                .collect(),
            PolygonStrategy::BarePosList => descendants_named(scope, elements::POS_LIST).collect(),
        }
    }
}
