//! Shared components for CLI commands
//!
//! Logging setup, layered configuration, input resolution and the
//! concurrent fetch/transform pipeline used by both commands.

use crate::app::adapters::source::{DocumentSource, SourceFetcher, expand_inputs};
use crate::app::models::EmissionZone;
use crate::app::services::transformer::{TransformStats, ZoneTransformer};
use crate::app::services::zone_aggregator::ensure_unique_ids;
use crate::cli::args::CommonArgs;
use crate::config::{LabelMode, TransformConfig};
use crate::constants::{DATA_DIR_NAME, DEFAULT_DOCUMENT_NAME};
use crate::{Error, Result};
use anyhow::Context;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, error, info, warn};

/// File name of the optional per-user configuration
const CONFIG_FILE_NAME: &str = "config.json";

/// Run statistics reported across all commands
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Documents transformed successfully
    pub documents_processed: usize,
    /// Documents that could not be fetched or parsed
    pub documents_failed: usize,
    /// Zones in the final output
    pub zones_emitted: usize,
    /// Warnings collected across all documents
    pub warnings: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl RunStats {
    pub fn summary(&self) -> String {
        format!(
            "Run Summary: {} document(s) processed, {} failed | Zones: {} | Warnings: {} | Time: {:.2}s",
            self.documents_processed,
            self.documents_failed,
            self.zones_emitted,
            self.warnings,
            self.processing_time.as_secs_f64()
        )
    }
}

/// Zones from all documents in input order
#[derive(Debug, Clone, Default)]
pub struct CollectedZones {
    pub zones: Vec<EmissionZone>,
    pub stats: TransformStats,
    pub documents_processed: usize,
    pub documents_failed: usize,
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("emission_zones={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Per-user configuration file, e.g. ~/.config/emission-zones/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(DATA_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Default feed location, e.g. ~/.local/share/emission-zones/emission-zones.xml
pub fn default_document_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME).join(DEFAULT_DOCUMENT_NAME))
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<TransformConfig> {
    let config_file = match &args.config_file {
        Some(path) => Some(path.clone()),
        None => default_config_path().filter(|path| path.exists()),
    };

    let mut config = match &config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            TransformConfig::from_file(path)?
        }
        None => {
            debug!("No config file found, using defaults");
            TransformConfig::default()
        }
    };

    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut TransformConfig, args: &CommonArgs) {
    if let Some(language) = &args.language {
        config.preferred_language = language.trim().to_string();
    }
    if let Some(labels) = args.labels {
        config.label_mode = LabelMode::from(labels);
    }
    if args.split_polygons {
        config.split_multi_polygons = true;
    }
}

/// Expand the given inputs, or fall back to the default feed location
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<DocumentSource>> {
    discover_sources(inputs).map_err(|e| Error::configuration(format!("{:#}", e)))
}

fn discover_sources(inputs: &[String]) -> anyhow::Result<Vec<DocumentSource>> {
    let sources = if inputs.is_empty() {
        let path = default_document_path().context("Could not determine the user data directory")?;
        anyhow::ensure!(
            path.exists(),
            "No input given and default feed {} does not exist",
            path.display()
        );
        vec![DocumentSource::File(path)]
    } else {
        expand_inputs(inputs).with_context(|| format!("Failed to expand inputs {:?}", inputs))?
    };

    anyhow::ensure!(!sources.is_empty(), "No feed documents found in {:?}", inputs);
    Ok(sources)
}

/// Fetch and transform every document, keeping input order
///
/// Any failed document fails the run with the first error in input order.
/// With `keep_going` failures are logged and counted instead, and the run
/// fails only when no document could be processed.
pub async fn process_documents(
    sources: Vec<DocumentSource>,
    transformer: Arc<ZoneTransformer>,
    fetcher: SourceFetcher,
    workers: usize,
    show_progress: bool,
    keep_going: bool,
) -> Result<CollectedZones> {
    let total = sources.len();
    let spinner = show_progress.then(|| create_spinner(&format!("Processing {} document(s)...", total)));
    let now = Utc::now();

    let mut outcomes = stream::iter(sources.into_iter().enumerate())
        .map(|(index, source)| {
            let transformer = Arc::clone(&transformer);
            let fetcher = fetcher.clone();
            let spinner = spinner.clone();
            async move {
                let outcome = process_document(&source, transformer, &fetcher, now).await;
                if let Some(spinner) = &spinner {
                    spinner.set_message(format!("Processed {}", source.label()));
                }
                (index, source, outcome)
            }
        })
        .buffer_unordered(workers.max(1))
        .collect::<Vec<_>>()
        .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut collected = CollectedZones::default();
    let mut first_error = None;

    for (_, source, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                info!("{}: {}", source, result.summary());
                collected.documents_processed += 1;
                merge_stats(&mut collected.stats, &result.stats);
                collected.zones.extend(result.zones);
            }
            Err(e) => {
                error!("Failed to process {}: {}", source, e);
                collected.documents_failed += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    if let Some(e) = first_error {
        if !keep_going || collected.documents_processed == 0 {
            return Err(e);
        }
        warn!(
            "Continuing without {} failed document(s)",
            collected.documents_failed
        );
    }

    let renamed = ensure_unique_ids(&mut collected.zones);
    if renamed > 0 {
        warn!("{} zone id(s) collided across documents and were renamed", renamed);
        collected.stats.duplicate_ids += renamed;
    }
    collected.stats.zones_emitted = collected.zones.len();

    Ok(collected)
}

async fn process_document(
    source: &DocumentSource,
    transformer: Arc<ZoneTransformer>,
    fetcher: &SourceFetcher,
    now: chrono::DateTime<Utc>,
) -> Result<crate::TransformResult> {
    let started = Instant::now();
    let xml = fetcher.fetch(source).await?;
    let label = source.label();

    let result = task::spawn_blocking(move || transformer.transform_document(&label, &xml, now))
        .await
        .map_err(|e| Error::processing_interrupted(format!("Transform task failed: {}", e)))??;

    debug!("{} transformed in {:?}", source, started.elapsed());
    Ok(result)
}

fn merge_stats(total: &mut TransformStats, document: &TransformStats) {
    total.regulations_found += document.regulations_found;
    total.regulations_skipped += document.regulations_skipped;
    total.records_without_geometry += document.records_without_geometry;
    total.records_merged += document.records_merged;
    total.zones_dropped += document.zones_dropped;
    total.rings += document.rings;
    total.pairs_accepted += document.pairs_accepted;
    total.pairs_swapped += document.pairs_swapped;
    total.pairs_discarded += document.pairs_discarded;
    total.duplicate_ids += document.duplicate_ids;
    total.warnings.extend(document.warnings.iter().cloned());
}

/// Build the transformer and fetcher shared by all documents of a run
pub fn prepare_pipeline(args: &CommonArgs) -> Result<(Arc<ZoneTransformer>, SourceFetcher)> {
    let config = load_configuration(args)?;
    let transformer = Arc::new(ZoneTransformer::new(config)?);
    let fetcher = SourceFetcher::new(args.fetch_timeout())?;
    Ok((transformer, fetcher))
}

/// Create a spinner with appropriate styling
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
