//! Restriction and exemption labels
//!
//! In [`LabelMode::Fixed`] every zone carries the same descriptive labels. In
//! [`LabelMode::Decoded`] labels are read from the vehicle characteristics of
//! the regulation: characteristics under a negated condition describe
//! exemptions, all others describe restrictions.

use crate::app::services::xml_nodes::{
    attribute_by_local_name, descendants_named, has_local_name, trimmed_text,
};
use crate::config::LabelMode;
use crate::constants::{decoded_labels, elements, fixed_labels};
use roxmltree::Node;
use std::collections::BTreeSet;
use tracing::debug;

/// Restriction and exemption labels for one zone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneLabels {
    pub restrictions: BTreeSet<String>,
    pub exemptions: BTreeSet<String>,
}

impl ZoneLabels {
    /// The fixed label set
    pub fn fixed() -> Self {
        Self {
            restrictions: fixed_labels::RESTRICTIONS
                .iter()
                .map(|label| label.to_string())
                .collect(),
            exemptions: fixed_labels::EXEMPTIONS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty() && self.exemptions.is_empty()
    }
}

/// Produces [`ZoneLabels`] according to the configured mode
#[derive(Debug, Clone, Copy)]
pub struct LabelSynthesizer {
    mode: LabelMode,
}

impl LabelSynthesizer {
    pub fn new(mode: LabelMode) -> Self {
        Self { mode }
    }

    /// Labels for the regulation rooted at `scope`
    pub fn synthesize(&self, scope: Node<'_, '_>) -> ZoneLabels {
        match self.mode {
            LabelMode::Fixed => ZoneLabels::fixed(),
            LabelMode::Decoded => decode_labels(scope),
        }
    }
}

/// Decode labels from every `vehicleCharacteristics` block under `scope`
///
/// May return empty sets when the regulation describes no characteristics.
pub fn decode_labels(scope: Node<'_, '_>) -> ZoneLabels {
    let mut labels = ZoneLabels::default();

    for characteristics in descendants_named(scope, elements::VEHICLE_CHARACTERISTICS) {
        if is_negated(characteristics, scope) {
            decode_exemptions(characteristics, &mut labels.exemptions);
        } else {
            decode_restrictions(characteristics, &mut labels.restrictions);
        }
    }

    debug!(
        "Decoded {} restriction(s) and {} exemption(s)",
        labels.restrictions.len(),
        labels.exemptions.len()
    );

    labels
}

fn decode_restrictions(characteristics: Node<'_, '_>, restrictions: &mut BTreeSet<String>) {
    push_values(
        characteristics,
        elements::EU_VEHICLE_CATEGORY,
        decoded_labels::EU_VEHICLE_CATEGORY,
        restrictions,
    );
    push_values(
        characteristics,
        elements::EMISSION_CLASSIFICATION_EURO,
        decoded_labels::EURO_EMISSION,
        restrictions,
    );
    push_values(
        characteristics,
        elements::FUEL_TYPE,
        decoded_labels::FUEL_TYPE,
        restrictions,
    );
}

fn decode_exemptions(characteristics: Node<'_, '_>, exemptions: &mut BTreeSet<String>) {
    push_values(
        characteristics,
        elements::EU_SPECIAL_PURPOSE_VEHICLE,
        decoded_labels::SPECIAL_PURPOSE,
        exemptions,
    );
    push_values(
        characteristics,
        elements::OWNER_TYPE,
        decoded_labels::OWNER_TYPE,
        exemptions,
    );

    for age in descendants_named(characteristics, elements::AGE_CHARACTERISTIC) {
        let operator = descendants_named(age, elements::COMPARISON_OPERATOR)
            .find_map(trimmed_text);
        let vehicle_age = descendants_named(age, elements::VEHICLE_AGE).find_map(trimmed_text);

        if let (Some(operator), Some(vehicle_age)) = (operator, vehicle_age) {
            exemptions.insert(format!(
                "{}: {} {} {}",
                decoded_labels::VEHICLE_AGE,
                operator,
                vehicle_age,
                decoded_labels::YEARS
            ));
        }
    }

    push_values(
        characteristics,
        elements::FUEL_TYPE,
        decoded_labels::FUEL_TYPE,
        exemptions,
    );
}

fn push_values(
    scope: Node<'_, '_>,
    element: &'static str,
    prefix: &str,
    labels: &mut BTreeSet<String>,
) {
    for value in descendants_named(scope, element).filter_map(trimmed_text) {
        labels.insert(format!("{}: {}", prefix, value));
    }
}

/// True when a condition between `node` and `scope` carries `negate = true`
///
/// The flag is accepted as a `negate` child element or attribute.
fn is_negated(node: Node<'_, '_>, scope: Node<'_, '_>) -> bool {
    node.ancestors()
        .take_while(|ancestor| ancestor.id() != scope.id())
        .filter(|ancestor| ancestor.is_element())
        .any(|ancestor| {
            let by_attribute = attribute_by_local_name(ancestor, elements::NEGATE)
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));

            let by_child = ancestor
                .children()
                .filter(|child| has_local_name(*child, elements::NEGATE))
                .filter_map(trimmed_text)
                .any(|value| value.eq_ignore_ascii_case("true"));

            by_attribute || by_child
        })
}
