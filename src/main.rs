// Strata - Rule-based conforming engine for CRM/ERP extracts
// Copyright (c) 2025 Strata Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use strata::cli::{Cli, Commands};
use strata::config::{load_config, LoggingConfig, StrataConfig};
use strata::logging::{init_logging, LoggingGuard};
use tokio::sync::watch;

/// File logging is configured per run; commands that do not touch data log to the console only
fn logging_settings(cli: &Cli) -> (String, LoggingConfig) {
    let console_only = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };

    let config: Option<StrataConfig> = match cli.command {
        Commands::Refresh(_) | Commands::LoadRaw(_) => load_config(&cli.config).ok(),
        Commands::ValidateConfig(_) | Commands::Init(_) => None,
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    (level, config.map(|c| c.logging).unwrap_or(console_only))
}

fn init(cli: &Cli) -> LoggingGuard {
    let (level, logging_config) = logging_settings(cli);

    match init_logging(&level, &logging_config) {
        Ok(guard) => guard,
        Err(e) if logging_config.local_enabled => {
            eprintln!("File logging unavailable ({e}), logging to console only");
            let console_only = LoggingConfig {
                local_enabled: false,
                ..logging_config
            };
            match init_logging(&level, &console_only) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("Failed to initialize logging: {e}");
                    process::exit(5);
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    }
}

#[tokio::main]
async fn main() {
    // Optional; a missing .env is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let guard = init(&cli);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Strata - rule-based conforming engine"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                }
            }
            println!("\nShutdown signal received, finishing entities already in progress...");
            let _ = shutdown_tx.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                println!("\nShutdown signal received, finishing entities already in progress...");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // Flush the non-blocking file writer before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Refresh(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::LoadRaw(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
