//! Application constants for the emission zone transformer
//!
//! This module contains the element names probed in the source feed, the
//! default geographic envelope, classifier markers and display labels used
//! throughout the application.

// =============================================================================
// Source Document Structure
// =============================================================================

/// Element names (local names, namespace prefixes are ignored)
pub mod elements {
    /// One regulation record per emission zone
    pub const REGULATION: &str = "urbanVehicleAccessRegulation";

    /// Container holding the conditions of a regulation
    pub const TRAFFIC_REGULATION: &str = "trafficRegulation";

    /// Condition node, nested arbitrarily deep in condition sets
    pub const CONDITIONS: &str = "conditions";

    /// Localised name container
    pub const NAME: &str = "name";

    /// Localised string value inside name/authority containers
    pub const VALUE: &str = "value";

    /// Issuing authority container
    pub const ISSUING_AUTHORITY: &str = "issuingAuthority";

    /// Reference link for further information
    pub const URL_FOR_FURTHER_INFORMATION: &str = "urlForFurtherInformation";

    /// Validity window start
    pub const OVERALL_START_TIME: &str = "overallStartTime";

    /// Validity window end
    pub const OVERALL_END_TIME: &str = "overallEndTime";

    /// GML polygon wrapper
    pub const GML_POLYGON: &str = "gmlPolygon";

    /// Flattened coordinate list
    pub const POS_LIST: &str = "posList";

    /// Negation flag on a condition
    pub const NEGATE: &str = "negate";

    /// Vehicle characteristics block
    pub const VEHICLE_CHARACTERISTICS: &str = "vehicleCharacteristics";

    pub const EU_VEHICLE_CATEGORY: &str = "euVehicleCategory";
    pub const EMISSION_CLASSIFICATION_EURO: &str = "emissionClassificationEuro";
    pub const FUEL_TYPE: &str = "fuelType";
    pub const EU_SPECIAL_PURPOSE_VEHICLE: &str = "euSpecialPurposeVehicle";
    pub const OWNER_TYPE: &str = "ownerType";
    pub const AGE_CHARACTERISTIC: &str = "ageCharacteristic";
    pub const COMPARISON_OPERATOR: &str = "comparisonOperator";
    pub const VEHICLE_AGE: &str = "vehicleAge";
}

/// Attribute names (local names)
pub mod attributes {
    /// Declared node type, normally `xsi:type`
    pub const TYPE: &str = "type";

    /// Language tag, `lang` or `xml:lang`
    pub const LANG: &str = "lang";

    /// Source record identifier
    pub const ID: &str = "id";
}

/// Condition type values probed by the fallback cascades
pub mod condition_types {
    pub const LOCATION_QUALIFIED: &str = "tro:LocationCondition";
    pub const LOCATION_UNQUALIFIED: &str = "LocationCondition";
    pub const LOCATION_FRAGMENT: &str = "Location";
    pub const VALIDITY_QUALIFIED: &str = "tro:ValidityCondition";
    pub const VALIDITY_FRAGMENT: &str = "Validity";
}

/// Case-insensitive fragments used by the polygon cascade
pub const POLYGON_FRAGMENT: &str = "polygon";
pub const POS_LIST_FRAGMENT: &str = "poslist";

/// Minimum token count for an anonymous element to be treated as a coordinate list
pub const MIN_ANONYMOUS_POS_LIST_TOKENS: usize = 10;

// =============================================================================
// Geographic Envelope (Netherlands)
// =============================================================================

pub const DEFAULT_MIN_LATITUDE: f64 = 50.5;
pub const DEFAULT_MAX_LATITUDE: f64 = 53.7;
pub const DEFAULT_MIN_LONGITUDE: f64 = 3.2;
pub const DEFAULT_MAX_LONGITUDE: f64 = 7.3;

// =============================================================================
// Naming and Classification
// =============================================================================

/// Preferred language for localised values
pub const DEFAULT_LANGUAGE: &str = "nl";

/// Prefix for records without a usable name; suffixed with a 1-based index
pub const PLACEHOLDER_NAME_PREFIX: &str = "Onbekende Stad";

/// City token used when a name yields nothing
pub const UNKNOWN_CITY: &str = "Onbekend";

/// Prefix for synthetic identifiers; suffixed with the record position
pub const SYNTHETIC_ID_PREFIX: &str = "zone_";

/// Marker word for a part of a split multi-polygon zone
pub const PART_LABEL: &str = "deel";

/// Zero-emission markers matched against the uppercased name
pub mod zone_markers {
    /// Standalone "ZE" word
    pub const ZE_WORD_PATTERN: &str = r"\bZE\b";
    pub const ZERO: &str = "ZERO";
    pub const NUL_EMISSIE: &str = "NUL-EMISSIE";
}

/// City token patterns, tried in order, first capture group is the city
pub const CITY_PATTERNS: &[&str] = &[
    r"(?i)ZE\s+(\w+)",
    r"(?i)LEZ\s+(\w+)",
    r"(?i)(\w+)\s+ZE",
    r"(?i)(\w+)\s+LEZ",
    r"(\w+)\s+\d{4}",
];

// =============================================================================
// Display Labels
// =============================================================================

/// Fixed labels used by the default label mode
pub mod fixed_labels {
    pub const RESTRICTIONS: &[&str] = &["Dieselvoertuigen", "Oude voertuigen"];
    pub const EXEMPTIONS: &[&str] = &["Elektrische voertuigen", "Waterstof voertuigen", "Oldtimers"];
}

/// Label prefixes used when decoding vehicle characteristics
pub mod decoded_labels {
    pub const EU_VEHICLE_CATEGORY: &str = "EU Voertuig Categorie";
    pub const EURO_EMISSION: &str = "Euro Emissie Norm";
    pub const FUEL_TYPE: &str = "Brandstof Type";
    pub const SPECIAL_PURPOSE: &str = "Speciale Voertuigen";
    pub const OWNER_TYPE: &str = "Eigenaar Type";
    pub const VEHICLE_AGE: &str = "Voertuig Leeftijd";
    pub const YEARS: &str = "jaar";
}

// =============================================================================
// Source Fetching and CLI Defaults
// =============================================================================

/// Directory name under the user data directory holding the default feed
pub const DATA_DIR_NAME: &str = "emission-zones";

/// Default feed file name
pub const DEFAULT_DOCUMENT_NAME: &str = "emission-zones.xml";

/// Extension of feed files discovered in directories
pub const DOCUMENT_EXTENSION: &str = "xml";

/// Default HTTP timeout for remote feeds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Upper bound for concurrent document workers
pub const MAX_WORKERS: usize = 64;
