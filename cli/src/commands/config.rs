// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use antiplag_core::domain::config::{ClusterConfig, CONFIG_PATH_ENV, LEGACY_CONFIG_PATH_ENV};

const MINIMAL_TEMPLATE: &str = include_str!("../../templates/config-minimal.yaml");
const EXAMPLES_TEMPLATE: &str = include_str!("../../templates/config-with-examples.yaml");

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./antiplag-config.yaml)
        #[arg(short, long, default_value = "./antiplag-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate { output, examples } => generate(&output, examples),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = ClusterConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        match &config_override {
            Some(path) => println!("  --config flag: {}", path.display()),
            None => println!("  --config flag: {}", "(not set)".dimmed()),
        }
        for key in [CONFIG_PATH_ENV, LEGACY_CONFIG_PATH_ENV] {
            println!(
                "  {}: {}",
                key,
                std::env::var(key)
                    .unwrap_or_else(|_| "(not set)".to_string())
                    .dimmed()
            );
        }
        for path in ClusterConfig::search_paths() {
            let marker = if path.exists() { "found".green() } else { "missing".dimmed() };
            println!("  {} [{}]", path.display(), marker);
        }
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();
    println!("  Environment: {}", config.env);
    println!();

    println!("{}", "Gateway:".bold());
    println!("  Address: {}", config.gateway.address);
    println!("  Storage: {}", config.gateway.storage_base_url);
    println!("  Analysis: {}", config.gateway.analysis_base_url);
    println!(
        "  Downstream timeout: {}ms",
        config.gateway.downstream_timeout.as_millis()
    );
    println!();

    println!("{}", "Storage:".bold());
    println!("  Address: {}", config.storage.address);
    println!("  Database: {}", database_label(config.storage.database_url.as_deref()));
    println!();

    println!("{}", "Analysis:".bold());
    println!("  Address: {}", config.analysis.address);
    println!("  Database: {}", database_label(config.analysis.database_url.as_deref()));
    println!();

    Ok(())
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ClusterConfig::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

fn generate(output: &Path, with_examples: bool) -> Result<()> {
    let sample = if with_examples {
        EXAMPLES_TEMPLATE
    } else {
        MINIMAL_TEMPLATE
    };

    std::fs::write(output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

/// DSNs carry credentials, so only the scheme and host part is printed
fn database_label(dsn: Option<&str>) -> String {
    match dsn {
        None => "in-memory".to_string(),
        Some(dsn) => match dsn.split_once('@') {
            Some((_, host)) => format!("postgres://***@{}", host),
            None => dsn.to_string(),
        },
    }
}
