//! Convert command: feed documents to a JSON array of zones

use super::shared::{self, RunStats};
use crate::app::models::EmissionZone;
use crate::cli::args::ConvertArgs;
use crate::{Error, Result};
use colored::*;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Run the convert command
pub async fn run_convert(args: ConvertArgs) -> Result<RunStats> {
    let started = Instant::now();
    let common = &args.common;

    shared::setup_logging(common)?;
    common.validate()?;

    let (transformer, fetcher) = shared::prepare_pipeline(common)?;
    let sources = shared::resolve_inputs(&common.inputs)?;
    info!("Converting {} document(s)", sources.len());

    let collected = shared::process_documents(
        sources,
        transformer,
        fetcher,
        common.workers,
        common.show_progress(),
        common.keep_going,
    )
    .await?;

    let json = render_zones(&collected.zones, args.pretty)?;
    match &args.output_file {
        Some(path) => write_output(path, &json)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).map_err(|e| Error::io("Failed to write to stdout", e))?;
        }
    }

    let stats = RunStats {
        documents_processed: collected.documents_processed,
        documents_failed: collected.documents_failed,
        zones_emitted: collected.zones.len(),
        warnings: collected.stats.warnings.len(),
        processing_time: started.elapsed(),
    };
    info!("{}", stats.summary());

    if common.show_progress() {
        print_summary(&stats, args.output_file.as_deref());
    }

    Ok(stats)
}

/// Serialize zones as a JSON array
pub fn render_zones(zones: &[EmissionZone], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(zones)
    } else {
        serde_json::to_string(zones)
    };
    json.map_err(|e| Error::serialization("Failed to serialize zones", e))
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::io(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }

    std::fs::write(path, format!("{}\n", json))
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    info!("Wrote {} bytes to {}", json.len() + 1, path.display());
    Ok(())
}

fn print_summary(stats: &RunStats, output: Option<&Path>) {
    eprintln!("\n{}", "Conversion Summary".bright_green().bold());
    eprintln!(
        "  {} {}",
        "Documents:".bright_cyan(),
        stats.documents_processed.to_string().bright_white()
    );
    if stats.documents_failed > 0 {
        eprintln!(
            "  {} {}",
            "Failed:".bright_red(),
            stats.documents_failed.to_string().bright_red().bold()
        );
    }
    eprintln!(
        "  {} {}",
        "Zones:".bright_cyan(),
        stats.zones_emitted.to_string().bright_white().bold()
    );
    if stats.warnings > 0 {
        eprintln!(
            "  {} {}",
            "Warnings:".bright_yellow(),
            stats.warnings.to_string().bright_yellow()
        );
    }
    if let Some(path) = output {
        eprintln!("  {} {}", "Output:".bright_cyan(), path.display());
    }
    eprintln!(
        "  {} {:.2}s",
        "Time elapsed:".bright_cyan(),
        stats.processing_time.as_secs_f64()
    );
}
