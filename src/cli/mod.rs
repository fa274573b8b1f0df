//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Strata using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Strata - rule-based conforming engine for CRM/ERP extracts
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
#[command(author = "Strata Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "strata.toml", env = "STRATA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STRATA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Conform the raw entity sets and replace the conformed layer
    Refresh(commands::refresh::RefreshArgs),

    /// Bulk-load raw CSV extracts into the relational raw layer
    LoadRaw(commands::load_raw::LoadRawArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_refresh() {
        let cli = Cli::parse_from(["strata", "refresh"]);
        assert_eq!(cli.config, "strata.toml");
        assert!(matches!(cli.command, Commands::Refresh(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["strata", "--config", "custom.toml", "refresh"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["strata", "--log-level", "debug", "refresh"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_refresh_flags() {
        let cli = Cli::parse_from([
            "strata",
            "refresh",
            "--dry-run",
            "--entity",
            "customers,sales",
            "--as-of",
            "2025-01-31",
            "-y",
        ]);
        let Commands::Refresh(args) = cli.command else {
            panic!("expected refresh");
        };
        assert!(args.dry_run);
        assert!(args.yes);
        assert_eq!(args.entity.as_deref(), Some("customers,sales"));
        assert_eq!(args.as_of.as_deref(), Some("2025-01-31"));
    }

    #[test]
    fn test_cli_parse_load_raw() {
        let cli = Cli::parse_from(["strata", "load-raw", "--from", "datasets"]);
        let Commands::LoadRaw(args) = cli.command else {
            panic!("expected load-raw");
        };
        assert_eq!(args.from, std::path::PathBuf::from("datasets"));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["strata", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["strata", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
