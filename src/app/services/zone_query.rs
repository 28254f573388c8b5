//! Filtering, summary counts and map bounds over transformed zones

use crate::app::models::{BoundingBox, EmissionZone, ZoneStatus, ZoneType};
use serde::Serialize;

/// Criteria for selecting zones; unset criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneFilter {
    /// Case-insensitive substring matched against name and city
    pub search: Option<String>,
    pub zone_type: Option<ZoneType>,
    pub status: Option<ZoneStatus>,
}

impl ZoneFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_type(mut self, zone_type: ZoneType) -> Self {
        self.zone_type = Some(zone_type);
        self
    }

    pub fn with_status(mut self, status: ZoneStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when every set criterion matches the zone
    pub fn matches(&self, zone: &EmissionZone) -> bool {
        if self.zone_type.is_some_and(|zone_type| zone.zone_type != zone_type) {
            return false;
        }

        if self.status.is_some_and(|status| zone.status != status) {
            return false;
        }

        match &self.search {
            Some(search) => {
                let needle = search.trim().to_lowercase();
                zone.name.to_lowercase().contains(&needle)
                    || zone.city.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Matching zones in their original order
    pub fn apply<'a>(&self, zones: &'a [EmissionZone]) -> Vec<&'a EmissionZone> {
        zones.iter().filter(|zone| self.matches(zone)).collect()
    }
}

/// Zone counts per type and status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneSummary {
    pub total: usize,
    pub zero_emission: usize,
    pub low_emission: usize,
    pub active: usize,
    pub upcoming: usize,
    pub inactive: usize,
}

impl ZoneSummary {
    pub fn from_zones<'a>(zones: impl IntoIterator<Item = &'a EmissionZone>) -> Self {
        let mut summary = Self::default();

        for zone in zones {
            summary.total += 1;

            match zone.zone_type {
                ZoneType::ZeroEmission => summary.zero_emission += 1,
                ZoneType::LowEmission => summary.low_emission += 1,
            }

            match zone.status {
                ZoneStatus::Active => summary.active += 1,
                ZoneStatus::Upcoming => summary.upcoming += 1,
                ZoneStatus::Inactive => summary.inactive += 1,
            }
        }

        summary
    }
}

/// Bounds over every coordinate of every zone, `None` when there are none
pub fn bounding_box<'a>(zones: impl IntoIterator<Item = &'a EmissionZone>) -> Option<BoundingBox> {
    BoundingBox::from_coordinates(zones.into_iter().flat_map(EmissionZone::all_coordinates))
}
