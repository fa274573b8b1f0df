//! Refresh command implementation
//!
//! This module implements the `refresh` command: conform every selected raw
//! entity set and replace the conformed layer.

use crate::cli::commands::{
    confirm, parse_as_of, parse_entity_override, setup_exit_code, EXIT_CONFIG, EXIT_FATAL,
    EXIT_PARTIAL, EXIT_SUCCESS,
};
use crate::config::{load_config, StrataConfig};
use crate::core::refresh::{RefreshCoordinator, RefreshSummary};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the refresh command
#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - conform everything without replacing the conformed layer
    #[arg(long)]
    pub dry_run: bool,

    /// Override entity sets to refresh (comma-separated)
    #[arg(long)]
    pub entity: Option<String>,

    /// Override the processing date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<String>,
}

impl RefreshArgs {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut StrataConfig) -> Result<(), String> {
        if let Some(entity) = &self.entity {
            let entities = parse_entity_override(entity)?;
            tracing::info!(entities = ?entities, "Overriding entities from CLI");
            config.refresh.entities = entities;
        }

        if let Some(as_of) = &self.as_of {
            let date = parse_as_of(as_of)?;
            tracing::info!(as_of = %date, "Overriding processing date from CLI");
            config.refresh.as_of = Some(date);
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        config.validate()
    }

    /// Execute the refresh command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting refresh command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Err(e) = self.apply_overrides(&mut config) {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let dry_run = config.application.dry_run;
        if dry_run {
            println!("DRY RUN MODE - conformed sets will not be written");
            println!();
        }

        if !self.yes && !dry_run {
            println!("Refresh Configuration:");
            println!("  Source: {:?}", config.source.kind);
            println!("  Target: {:?}", config.target.kind);
            println!("  Entities: {:?}", config.refresh.entities);
            println!(
                "  As of: {}",
                config
                    .refresh
                    .as_of
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "today".to_string())
            );
            println!();
            if !confirm("Replace the conformed sets?")? {
                println!("Refresh cancelled.");
                return Ok(EXIT_SUCCESS);
            }
        }

        tracing::info!("Creating refresh coordinator");
        let coordinator = match RefreshCoordinator::new(&config, shutdown_signal).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create refresh coordinator");
                eprintln!("Failed to initialize refresh: {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        if let Err(e) = coordinator.test_connection().await {
            tracing::error!(error = %e, "Raw source is not reachable");
            eprintln!("Raw source is not reachable: {e}");
            return Ok(setup_exit_code(&e));
        }

        println!("Starting refresh...");
        println!();

        let summary = match coordinator.execute_refresh().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Refresh failed");
                eprintln!("Refresh failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        print!("{}", render_summary(&summary));

        let exit_code = if summary.is_successful() {
            println!("Refresh completed successfully");
            EXIT_SUCCESS
        } else if summary.interrupted {
            println!("Refresh interrupted. Entities already written are complete.");
            println!("Run the same command again to refresh the skipped entities.");
            tracing::info!("Refresh interrupted by user signal");
            EXIT_PARTIAL
        } else {
            println!("Refresh completed with failures");
            EXIT_PARTIAL
        };

        Ok(exit_code)
    }
}

/// Per-entity count table followed by errors and skipped entities
pub fn render_summary(summary: &RefreshSummary) -> String {
    let mut out = String::new();

    out.push_str("Refresh Summary:\n");
    out.push_str(&format!(
        "  {:<14} {:>10} {:>10} {:>9} {:>9}  {}\n",
        "Entity", "Read", "Written", "Excluded", "Degraded", "Checksum"
    ));
    for report in &summary.reports {
        let stats = &report.stats;
        let degraded = stats.fallback_codes
            + stats.dates_rejected
            + stats.sales_recomputed
            + stats.prices_backfilled;
        out.push_str(&format!(
            "  {:<14} {:>10} {:>10} {:>9} {:>9}  {}\n",
            report.entity.as_str(),
            report.rows_read,
            report.rows_written,
            stats.rows_excluded + stats.duplicates_dropped,
            degraded,
            &report.checksum[..report.checksum.len().min(12)]
        ));
    }
    out.push_str(&format!(
        "  {:<14} {:>10} {:>10}\n",
        "total",
        summary.total_rows_read(),
        summary.total_rows_written()
    ));
    out.push_str(&format!("  Duration: {:.2}s\n", summary.duration.as_secs_f64()));
    if summary.dry_run {
        out.push_str("  (dry run: written counts were not persisted)\n");
    }
    out.push('\n');

    if !summary.errors.is_empty() {
        out.push_str("Errors encountered:\n");
        for error in &summary.errors {
            let entity = error
                .entity
                .map(|e| e.as_str().to_string())
                .unwrap_or_else(|| "run".to_string());
            out.push_str(&format!(
                "  - {entity} ({:?}): {}\n",
                error.error_type, error.message
            ));
        }
        out.push('\n');
    }

    if !summary.skipped.is_empty() {
        let skipped: Vec<&str> = summary.skipped.iter().map(|e| e.as_str()).collect();
        out.push_str(&format!("Not started: {}\n\n", skipped.join(", ")));
    }

    out
}
