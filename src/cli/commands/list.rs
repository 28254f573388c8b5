//! List command: filtered zone listing with summary counts

use super::shared::{self, RunStats};
use crate::app::models::{BoundingBox, EmissionZone, ZoneStatus, ZoneType};
use crate::app::services::zone_query::{ZoneFilter, ZoneSummary, bounding_box};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// JSON listing report
#[derive(Debug, Serialize)]
pub struct ListReport<'a> {
    pub zones: Vec<&'a EmissionZone>,
    pub summary: ZoneSummary,
    pub bounds: Option<BoundingBox>,
}

/// Run the list command
pub async fn run_list(args: ListArgs) -> Result<RunStats> {
    let started = Instant::now();
    let common = &args.common;

    shared::setup_logging(common)?;
    common.validate()?;

    let (transformer, fetcher) = shared::prepare_pipeline(common)?;
    let sources = shared::resolve_inputs(&common.inputs)?;

    let collected = shared::process_documents(
        sources,
        transformer,
        fetcher,
        common.workers,
        common.show_progress(),
        common.keep_going,
    )
    .await?;

    let filter = build_filter(&args);
    let selected = filter.apply(&collected.zones);
    info!(
        "{} of {} zone(s) match the filter",
        selected.len(),
        collected.zones.len()
    );

    match args.output_format {
        OutputFormat::Human => print_human(&selected),
        OutputFormat::Json => println!("{}", render_json(&selected)?),
    }

    Ok(RunStats {
        documents_processed: collected.documents_processed,
        documents_failed: collected.documents_failed,
        zones_emitted: selected.len(),
        warnings: collected.stats.warnings.len(),
        processing_time: started.elapsed(),
    })
}

/// Filter from the command-line criteria
pub fn build_filter(args: &ListArgs) -> ZoneFilter {
    let mut filter = ZoneFilter::new();
    if let Some(search) = &args.search {
        filter = filter.with_search(search.clone());
    }
    if let Some(zone_type) = args.zone_type {
        filter = filter.with_type(ZoneType::from(zone_type));
    }
    if let Some(status) = args.status {
        filter = filter.with_status(ZoneStatus::from(status));
    }
    filter
}

/// JSON report with zones, counts and map bounds
pub fn render_json(zones: &[&EmissionZone]) -> Result<String> {
    let report = ListReport {
        zones: zones.to_vec(),
        summary: ZoneSummary::from_zones(zones.iter().copied()),
        bounds: bounding_box(zones.iter().copied()),
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| Error::serialization("Failed to serialize zone listing", e))
}

fn print_human(zones: &[&EmissionZone]) {
    if zones.is_empty() {
        println!("{}", "No zones match the given criteria".bright_yellow());
        return;
    }

    for zone in zones {
        println!("{}", format_zone_line(zone));
    }

    let summary = ZoneSummary::from_zones(zones.iter().copied());
    println!("\n{}", "Zone Summary".bright_green().bold());
    println!(
        "  {} {} ({} ZE, {} LEZ)",
        "Total:".bright_cyan(),
        summary.total.to_string().bright_white().bold(),
        summary.zero_emission,
        summary.low_emission
    );
    println!(
        "  {} {} active, {} upcoming, {} inactive",
        "Status:".bright_cyan(),
        summary.active,
        summary.upcoming,
        summary.inactive
    );
}

fn format_zone_line(zone: &EmissionZone) -> String {
    let zone_type = match zone.zone_type {
        ZoneType::ZeroEmission => zone.zone_type.code().bright_green().bold(),
        ZoneType::LowEmission => zone.zone_type.code().bright_blue().bold(),
    };
    let status = match zone.status {
        ZoneStatus::Active => zone.status.as_str().green(),
        ZoneStatus::Upcoming => zone.status.as_str().yellow(),
        ZoneStatus::Inactive => zone.status.as_str().dimmed(),
    };

    format!(
        "{:<4} {:<9} {} {} {}",
        zone_type,
        status,
        zone.name.bright_white(),
        format!("({})", zone.city).bright_cyan(),
        format!("[{} polygon(s)]", zone.ring_count()).dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Coordinate;
    use crate::cli::args::{Args, Commands};
    use clap::Parser;
    use std::collections::BTreeSet;

    fn zone(name: &str, zone_type: ZoneType, status: ZoneStatus) -> EmissionZone {
        EmissionZone {
            id: name.to_lowercase(),
            name: name.to_string(),
            zone_type,
            city: "Rotterdam".to_string(),
            authority: String::new(),
            status,
            valid_from: None,
            valid_to: None,
            coordinates: vec![vec![Coordinate::new(51.9, 4.4), Coordinate::new(52.0, 4.5)]],
            url: None,
            restrictions: BTreeSet::new(),
            exemptions: BTreeSet::new(),
        }
    }

    fn list_args(extra: &[&str]) -> ListArgs {
        let mut argv = vec!["emission-zones", "list"];
        argv.extend_from_slice(extra);
        match Args::try_parse_from(argv).unwrap().command {
            Some(Commands::List(list)) => list,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_build_filter_from_args() {
        let filter = build_filter(&list_args(&["--type", "lez", "--search", "haven"]));

        assert_eq!(filter.zone_type, Some(ZoneType::LowEmission));
        assert_eq!(filter.search.as_deref(), Some("haven"));
        assert!(filter.status.is_none());
    }

    #[test]
    fn test_render_json_report() {
        let zones = [
            zone("ZE Rotterdam", ZoneType::ZeroEmission, ZoneStatus::Active),
            zone("LEZ Rotterdam", ZoneType::LowEmission, ZoneStatus::Upcoming),
        ];
        let selected: Vec<&EmissionZone> = zones.iter().collect();

        let json: serde_json::Value = serde_json::from_str(&render_json(&selected).unwrap()).unwrap();

        assert_eq!(json["zones"].as_array().unwrap().len(), 2);
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["upcoming"], 1);
        assert!(json["bounds"].is_object());
    }

    #[test]
    fn test_render_json_without_zones_has_no_bounds() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&[]).unwrap()).unwrap();

        assert_eq!(json["summary"]["total"], 0);
        assert!(json["bounds"].is_null());
    }

    #[test]
    fn test_zone_line_mentions_name_and_rings() {
        colored::control::set_override(false);
        let line = format_zone_line(&zone("ZE Rotterdam", ZoneType::ZeroEmission, ZoneStatus::Active));

        assert!(line.starts_with("ZE"));
        assert!(line.contains("ZE Rotterdam (Rotterdam)"));
        assert!(line.contains("[1 polygon(s)]"));
    }
}
