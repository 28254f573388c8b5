//! Grouping of regulation records into emission zones
//!
//! Several regulation records may describe the same zone, each contributing
//! one or more polygons. Records are grouped by display name: the first record
//! of a group supplies the zone metadata, later records only add rings and
//! labels. Groups that end up without geometry are dropped.

use crate::app::models::EmissionZone;
use crate::constants::PART_LABEL;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Output of one aggregation pass
#[derive(Debug, Clone, Default)]
pub struct AggregatedZones {
    /// Zones in order of first appearance
    pub zones: Vec<EmissionZone>,

    /// Records merged into an earlier group of the same name
    pub merged_records: usize,

    /// Groups dropped because no record contributed a ring
    pub dropped_groups: Vec<String>,

    /// Identifiers rewritten to keep them unique
    pub renamed_ids: usize,
}

/// Accumulates zones for a single transformation run
#[derive(Debug, Default)]
pub struct ZoneAggregator {
    zones: Vec<EmissionZone>,
    index_by_name: HashMap<String, usize>,
    merged_records: usize,
}

impl ZoneAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the zone built from one record, returns true when it opened a new group
    pub fn add(&mut self, zone: EmissionZone) -> bool {
        if let Some(&position) = self.index_by_name.get(&zone.name) {
            let group = &mut self.zones[position];
            debug!(
                "Merging {} ring(s) from record {} into '{}'",
                zone.coordinates.len(),
                zone.id,
                group.name
            );
            group.coordinates.extend(zone.coordinates);
            group.restrictions.extend(zone.restrictions);
            group.exemptions.extend(zone.exemptions);
            self.merged_records += 1;
            return false;
        }

        self.index_by_name.insert(zone.name.clone(), self.zones.len());
        self.zones.push(zone);
        true
    }

    /// Finalize the groups into the emitted zone list
    pub fn finish(self, split_multi_polygons: bool) -> AggregatedZones {
        let mut dropped_groups = Vec::new();
        let mut zones = Vec::with_capacity(self.zones.len());

        for mut zone in self.zones {
            zone.coordinates.retain(|ring| !ring.is_empty());

            if zone.coordinates.is_empty() {
                debug!("Dropping '{}': no valid geometry", zone.name);
                dropped_groups.push(zone.name);
                continue;
            }

            if split_multi_polygons && zone.is_multi_polygon() {
                zones.extend(split_parts(zone));
            } else {
                zones.push(zone);
            }
        }

        let renamed_ids = ensure_unique_ids(&mut zones);

        AggregatedZones {
            zones,
            merged_records: self.merged_records,
            dropped_groups,
            renamed_ids,
        }
    }
}

/// One zone per ring, numbered from 1
fn split_parts(zone: EmissionZone) -> Vec<EmissionZone> {
    let EmissionZone {
        id,
        name,
        coordinates,
        ..
    } = &zone;

    coordinates
        .iter()
        .enumerate()
        .map(|(position, ring)| EmissionZone {
            id: format!("{}-{}", id, position + 1),
            name: format!("{} ({} {})", name, PART_LABEL, position + 1),
            coordinates: vec![ring.clone()],
            ..zone.clone()
        })
        .collect()
}

/// Suffix repeated identifiers with `_<index>`, returns how many were changed
pub fn ensure_unique_ids(zones: &mut [EmissionZone]) -> usize {
    let mut seen: HashSet<String> = HashSet::with_capacity(zones.len());
    let mut renamed = 0;

    for (index, zone) in zones.iter_mut().enumerate() {
        if seen.insert(zone.id.clone()) {
            continue;
        }

        let mut candidate = format!("{}_{}", zone.id, index);
        while seen.contains(&candidate) {
            candidate.push('_');
        }

        debug!("Duplicate id '{}' renamed to '{}'", zone.id, candidate);
        seen.insert(candidate.clone());
        zone.id = candidate;
        renamed += 1;
    }

    renamed
}
