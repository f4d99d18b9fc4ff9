// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # antiplag
//!
//! One binary for every process of the plagiarism-check cluster.
//!
//! ## Commands
//!
//! - `antiplag gateway` - client-facing aggregation gateway
//! - `antiplag storage` - work service
//! - `antiplag analysis` - report service
//! - `antiplag start` - all three in one process
//! - `antiplag config show|validate|generate` - configuration management

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use antiplag::bootstrap::load_config;
use antiplag::commands::{self, ConfigCommand, ServiceKind};
use antiplag::logging::{init_logging, process_environment};
use antiplag_core::domain::config::CONFIG_PATH_ENV;

/// antiplag - submit works and track their plagiarism reports
#[derive(Parser)]
#[command(name = "antiplag")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error); defaults by environment
    #[arg(long, global = true, env = "ANTIPLAG_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the aggregation gateway
    #[command(name = "gateway")]
    Gateway,

    /// Run the work (storage) service
    #[command(name = "storage")]
    Storage,

    /// Run the report (analysis) service
    #[command(name = "analysis")]
    Analysis,

    /// Run all services in one process
    #[command(name = "start")]
    Start,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let service = match cli.command {
        Some(Commands::Gateway) => ServiceKind::Gateway,
        Some(Commands::Storage) => ServiceKind::Storage,
        Some(Commands::Analysis) => ServiceKind::Analysis,
        Some(Commands::Start) => {
            let config = load_config(cli.config, cli.log_level.as_deref())?;
            return commands::serve::run_all(&config).await;
        }
        Some(Commands::Config { command }) => {
            init_logging(process_environment(), cli.log_level.as_deref())?;
            return commands::config::handle_command(command, cli.config).await;
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    };

    let config = load_config(cli.config, cli.log_level.as_deref())?;
    commands::serve::run_service(service, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "antiplag",
            "gateway",
            "--config",
            "/etc/antiplag/prod.yaml",
            "--log-level",
            "warn",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Commands::Gateway)));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/antiplag/prod.yaml")));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_config_generate_flags() {
        let cli = Cli::try_parse_from([
            "antiplag",
            "config",
            "generate",
            "--output",
            "/tmp/antiplag.yaml",
            "--examples",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Config {
                command: ConfigCommand::Generate { output, examples },
            }) => {
                assert_eq!(output, PathBuf::from("/tmp/antiplag.yaml"));
                assert!(examples);
            }
            _ => panic!("expected config generate"),
        }
    }
}
