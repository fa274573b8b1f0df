//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Strata configuration file.

use crate::cli::commands::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::schema::{StorageConfig, StorageKind};
use crate::config::{load_config, redact_connection_string, StrataConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

fn describe_side(side: &StorageConfig) -> String {
    match (side.kind, &side.csv) {
        (StorageKind::Csv, Some(csv)) => format!("csv ({})", csv.directory.display()),
        (StorageKind::Csv, None) => "csv".to_string(),
        (StorageKind::PostgreSQL, _) => "postgresql".to_string(),
    }
}

/// Human-readable summary of a loaded configuration, secrets redacted
pub fn render_config_summary(config: &StrataConfig) -> String {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Environment: {:?}", config.environment),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Dry Run: {}", config.application.dry_run),
        format!("  Source: {}", describe_side(&config.source)),
        format!("  Target: {}", describe_side(&config.target)),
    ];

    if let Some(pg) = config.postgresql.as_ref().filter(|_| config.uses_postgresql()) {
        lines.push(format!(
            "  PostgreSQL Connection: {}",
            redact_connection_string(&pg.connection_string)
        ));
        lines.push(format!("  Max Connections: {}", pg.max_connections));
        lines.push(format!("  SSL Mode: {}", pg.ssl_mode));
        lines.push(format!(
            "  Schemas: {} -> {}",
            pg.raw_schema, pg.conformed_schema
        ));
    }

    let entities: Vec<&str> = config.refresh.entities.iter().map(|e| e.as_str()).collect();
    lines.push(format!("  Entities: {}", entities.join(", ")));
    lines.push(format!("  Max Concurrency: {}", config.refresh.max_concurrency));
    lines.push(format!(
        "  As Of: {}",
        config
            .refresh
            .as_of
            .map(|d| d.to_string())
            .unwrap_or_else(|| "today (UTC)".to_string())
    ));
    lines.push(format!(
        "  File Logging: {}",
        if config.logging.local_enabled {
            format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
        } else {
            "disabled".to_string()
        }
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid");
                println!();
                print!("{}", render_config_summary(&config));
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}
