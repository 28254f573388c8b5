//! Statistics and result structures for document transformation

use crate::app::models::EmissionZone;
use crate::app::services::geometry_collector::GeometryStats;
use serde::Serialize;

/// Counters describing one transformation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    /// Regulation records found in the document
    pub regulations_found: usize,
    /// Records skipped because they had no traffic regulation
    pub regulations_skipped: usize,
    /// Records that yielded no rings
    pub records_without_geometry: usize,
    /// Records merged into an earlier zone of the same name
    pub records_merged: usize,
    /// Zones in the result
    pub zones_emitted: usize,
    /// Zone groups dropped for lack of geometry
    pub zones_dropped: usize,
    /// Rings across all emitted zones
    pub rings: usize,
    /// Coordinate pairs accepted into rings
    pub pairs_accepted: usize,
    /// Accepted pairs that were read longitude-first
    pub pairs_swapped: usize,
    /// Pairs dropped as non-numeric or outside the envelope
    pub pairs_discarded: usize,
    /// Identifiers suffixed to stay unique
    pub duplicate_ids: usize,
    /// Human-readable notes about recovered problems
    pub warnings: Vec<String>,
}

impl TransformStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recovered problem
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Fold the geometry counters of one record into the totals
    pub fn record_geometry(&mut self, geometry: &GeometryStats) {
        self.pairs_accepted += geometry.pairs_accepted;
        self.pairs_swapped += geometry.pairs_swapped;
        self.pairs_discarded += geometry.pairs_discarded;
    }

    /// Share of coordinate pairs that survived parsing, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        let total = self.pairs_accepted + self.pairs_discarded;
        if total == 0 {
            100.0
        } else {
            (self.pairs_accepted as f64 / total as f64) * 100.0
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Transform Summary: {} regulations -> {} zones ({} rings) | \
             Skipped: {} | Dropped: {} | Merged: {} | \
             Pairs: {} accepted ({} swapped), {} discarded ({:.1}% accepted) | Warnings: {}",
            self.regulations_found,
            self.zones_emitted,
            self.rings,
            self.regulations_skipped,
            self.zones_dropped,
            self.records_merged,
            self.pairs_accepted,
            self.pairs_swapped,
            self.pairs_discarded,
            self.acceptance_rate(),
            self.warnings.len()
        )
    }
}

/// Zones produced from one document together with run statistics
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub zones: Vec<EmissionZone>,
    pub stats: TransformStats,
}

impl TransformResult {
    pub fn new(zones: Vec<EmissionZone>, stats: TransformStats) -> Self {
        Self { zones, stats }
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
