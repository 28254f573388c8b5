//! Descriptive metadata extraction for regulation records
//!
//! Pulls the name, identifier, validity window, reference link and issuing
//! authority out of one `urbanVehicleAccessRegulation` element. Every field is
//! optional in the feed; a missing field never aborts the record.

use crate::app::services::xml_nodes::{
    attribute_by_local_name, descendant_text, descendants_named, lang_attribute, trimmed_text,
    type_attribute,
};
use crate::config::TransformConfig;
use crate::constants::{SYNTHETIC_ID_PREFIX, attributes, condition_types, elements};
use roxmltree::Node;
use tracing::debug;

/// Metadata of a single regulation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegulationAttributes {
    /// Source identifier, or `zone_{index}` when the record has none
    pub id: String,

    /// True when `id` was synthesized from the record position
    pub id_is_synthetic: bool,

    /// Display name in the preferred language when available
    pub name: String,

    /// True when no name was found and a placeholder was used
    pub name_is_placeholder: bool,

    /// Raw `overallStartTime` text
    pub valid_from: Option<String>,

    /// Raw `overallEndTime` text
    pub valid_to: Option<String>,

    pub url: Option<String>,

    /// Issuing authority name, empty when absent
    pub authority: String,
}

/// Extracts [`RegulationAttributes`] using the configured language preference
#[derive(Debug, Clone)]
pub struct AttributeExtractor {
    preferred_language: String,
    placeholder_prefix: String,
}

impl AttributeExtractor {
    pub fn new(config: &TransformConfig) -> Self {
        Self {
            preferred_language: config.preferred_language.clone(),
            placeholder_prefix: config.placeholder_prefix.clone(),
        }
    }

    /// Extract metadata from `regulation`, the `index`-th record in the document
    ///
    /// The validity window is looked up inside `traffic_regulation` when given,
    /// otherwise anywhere under the record.
    pub fn extract<'a, 'input>(
        &self,
        regulation: Node<'a, 'input>,
        traffic_regulation: Option<Node<'a, 'input>>,
        index: usize,
    ) -> RegulationAttributes {
        let (id, id_is_synthetic) = match attribute_by_local_name(regulation, attributes::ID)
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => (id.to_string(), false),
            None => (format!("{}{}", SYNTHETIC_ID_PREFIX, index), true),
        };

        let (name, name_is_placeholder) =
            match self.localized_value(regulation, elements::NAME) {
                Some(name) => (name, false),
                None => {
                    debug!("Record {} has no name, using placeholder", index);
                    (format!("{} {}", self.placeholder_prefix, index + 1), true)
                }
            };

        let validity_scope = traffic_regulation.unwrap_or(regulation);
        let (valid_from, valid_to) = match find_validity_condition(validity_scope) {
            Some(condition) => (
                descendant_text(condition, elements::OVERALL_START_TIME),
                descendant_text(condition, elements::OVERALL_END_TIME),
            ),
            None => (None, None),
        };

        let authority = self
            .localized_value(regulation, elements::ISSUING_AUTHORITY)
            .unwrap_or_default();

        RegulationAttributes {
            id,
            id_is_synthetic,
            name,
            name_is_placeholder,
            valid_from,
            valid_to,
            url: descendant_text(regulation, elements::URL_FOR_FURTHER_INFORMATION),
            authority,
        }
    }

    /// First non-blank `value` under a `container` element, preferring the
    /// configured language and falling back to any language
    fn localized_value(&self, scope: Node<'_, '_>, container: &'static str) -> Option<String> {
        let values = || {
            descendants_named(scope, container)
                .flat_map(|node| descendants_named(node, elements::VALUE))
        };

        values()
            .filter(|value| {
                lang_attribute(*value)
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(&self.preferred_language))
            })
            .find_map(trimmed_text)
            .or_else(|| values().find_map(trimmed_text))
    }
}

/// First condition carrying the validity window
///
/// An exact `tro:ValidityCondition` type wins over any type merely mentioning
/// `Validity`.
pub fn find_validity_condition<'a, 'input>(scope: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    descendants_named(scope, elements::CONDITIONS)
        .find(|node| type_attribute(*node) == Some(condition_types::VALIDITY_QUALIFIED))
        .or_else(|| {
            descendants_named(scope, elements::CONDITIONS).find(|node| {
                type_attribute(*node)
                    .is_some_and(|kind| kind.contains(condition_types::VALIDITY_FRAGMENT))
            })
        })
}
