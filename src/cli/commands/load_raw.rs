//! Load-raw command implementation
//!
//! This module implements the `load-raw` command: stage the upstream CSV
//! extracts into the relational raw layer, one full replace per entity.

use crate::adapters::csv::CsvSource;
use crate::adapters::storage::{create_raw_loader, RawLoader, RawSource};
use crate::cli::commands::{
    confirm, parse_entity_override, setup_exit_code, EXIT_CONFIG, EXIT_PARTIAL, EXIT_SUCCESS,
};
use crate::config::load_config;
use crate::domain::{Entity, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the load-raw command
#[derive(Args, Debug)]
pub struct LoadRawArgs {
    /// Directory holding the raw CSV extracts
    #[arg(long, value_name = "DIR")]
    pub from: PathBuf,

    /// Entity sets to load (comma-separated, default all)
    #[arg(long)]
    pub entity: Option<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Result of staging one entity
#[derive(Debug)]
pub struct StagedEntity {
    pub entity: Entity,
    pub outcome: Result<usize>,
}

/// Copy each entity from `source` into the raw layer behind `loader`
///
/// Entities are processed in order. A failure is recorded and the next entity
/// still runs. A shutdown signal stops before the next entity starts.
pub async fn stage_raw(
    source: &dyn RawSource,
    loader: &dyn RawLoader,
    entities: &[Entity],
    shutdown_signal: &watch::Receiver<bool>,
) -> Vec<StagedEntity> {
    let mut staged = Vec::with_capacity(entities.len());

    for &entity in entities {
        if *shutdown_signal.borrow() {
            tracing::info!(entity = %entity, "Shutdown requested, stopping raw load");
            break;
        }

        let outcome = match source.fetch(entity).await {
            Ok(batch) => loader.replace_raw(&batch).await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(rows) => tracing::info!(entity = %entity, rows = rows, "Raw set loaded"),
            Err(e) => tracing::error!(entity = %entity, error = %e, "Raw load failed"),
        }

        staged.push(StagedEntity { entity, outcome });
    }

    staged
}

impl LoadRawArgs {
    /// Execute the load-raw command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(from = %self.from.display(), "Starting load-raw command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let entities = match &self.entity {
            Some(value) => match parse_entity_override(value) {
                Ok(entities) => entities,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(EXIT_CONFIG);
                }
            },
            None => Entity::ALL.to_vec(),
        };

        let source = CsvSource::new(self.from.clone());
        if let Err(e) = source.test_connection().await {
            eprintln!("{e}");
            return Ok(EXIT_CONFIG);
        }

        if !self.yes {
            println!("Raw Load Configuration:");
            println!("  From: {}", self.from.display());
            println!("  Entities: {entities:?}");
            println!();
            if !confirm("Replace the raw sets?")? {
                println!("Raw load cancelled.");
                return Ok(EXIT_SUCCESS);
            }
        }

        let loader = match create_raw_loader(&config).await {
            Ok(loader) => loader,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create raw loader");
                eprintln!("Failed to initialize raw load: {e}");
                return Ok(setup_exit_code(&e));
            }
        };

        if let Err(e) = loader.ensure_raw_schema().await {
            tracing::error!(error = %e, "Failed to prepare raw schema");
            eprintln!("Failed to prepare raw schema: {e}");
            return Ok(setup_exit_code(&e));
        }

        let staged = stage_raw(&source, loader.as_ref(), &entities, &shutdown_signal).await;

        println!("Raw Load Summary:");
        let mut failures = 0usize;
        for item in &staged {
            match &item.outcome {
                Ok(rows) => println!("  {:<14} {:>10}", item.entity.as_str(), rows),
                Err(e) => {
                    failures += 1;
                    println!("  {:<14} failed: {e}", item.entity.as_str());
                }
            }
        }
        println!();

        if failures > 0 || staged.len() < entities.len() {
            println!("Raw load completed with failures");
            return Ok(EXIT_PARTIAL);
        }

        println!("Raw load completed successfully");
        Ok(EXIT_SUCCESS)
    }
}
