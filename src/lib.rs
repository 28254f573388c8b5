//! Emission Zones Library
//!
//! A Rust library for converting Dutch urban vehicle access regulation (UVAR)
//! XML feeds into typed emission zone records for map-rendering front ends.
//!
//! This library provides tools for:
//! - Locating regulation records in loosely namespaced DATEX II style XML
//! - Extracting polygon boundaries through tiered fallback searches
//! - Disambiguating latitude/longitude order with a geographic envelope test
//! - Grouping multi-polygon zones per city
//! - Classifying zone type and lifecycle status
//! - Summarising restrictions and exemptions as display labels
//!
//! ```rust
//! use emission_zones::{TransformConfig, ZoneTransformer};
//!
//! # fn example(xml: &str) -> emission_zones::Result<()> {
//! let transformer = ZoneTransformer::new(TransformConfig::default())?;
//! let result = transformer.transform(xml)?;
//!
//! for zone in &result.zones {
//!     println!("{} ({:?}): {} rings", zone.name, zone.zone_type, zone.ring_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod attribute_extractor;
        pub mod classifier;
        pub mod coordinate_parser;
        pub mod geometry_collector;
        pub mod label_synthesizer;
        pub mod transformer;
        pub mod xml_nodes;
        pub mod zone_aggregator;
        pub mod zone_query;
    }
    pub mod adapters {
        pub mod source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Coordinate, EmissionZone, Ring, ZoneStatus, ZoneType};
pub use app::services::transformer::{TransformResult, TransformStats, ZoneTransformer};
pub use config::{GeoEnvelope, LabelMode, TransformConfig};

/// Result type alias for emission zone processing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for emission zone processing
///
/// Only document-level failures surface here. Missing or malformed
/// substructure inside a well-formed document is recovered locally by the
/// transformer and reported through [`TransformStats`] instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The source document is not well-formed XML
    #[error("Malformed document '{document}': {source}")]
    MalformedDocument {
        document: String,
        #[source]
        source: roxmltree::Error,
    },

    /// The source document could not be retrieved
    #[error("Failed to fetch '{location}': {message}")]
    FetchFailed { location: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a malformed document error
    pub fn malformed_document(document: impl Into<String>, source: roxmltree::Error) -> Self {
        Self::MalformedDocument {
            document: document.into(),
            source,
        }
    }

    /// Create a fetch failure error
    pub fn fetch_failed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True when the document itself was unusable rather than unreachable
    pub fn is_malformed_document(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }

    /// True when retrieving the document failed
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
