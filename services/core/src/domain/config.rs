// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Cluster Configuration
//
// One manifest describes all three processes:
// - deployment environment tag (drives log level and format)
// - gateway listen address, downstream base URLs and call timeout
// - storage and analysis listen addresses and optional database DSNs
//
// Loaded once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "ANTIPLAG_CONFIG_PATH";
pub const LEGACY_CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Deployment environment tag
///
/// Accepts `dev` and `prod` as aliases. Any other unknown tag runs with
/// local settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Environment {
    #[default]
    Local,
    Development,
    Test,
    Production,
}

impl Environment {
    /// Default log level filter for this environment
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Production => "info",
            _ => "debug",
        }
    }

    /// Whether logs are emitted as JSON lines rather than text
    pub fn json_logs(&self) -> bool {
        !matches!(self, Environment::Local)
    }

    /// Parse a tag, falling back to [`Environment::Local`] with a warning
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|e| {
            tracing::warn!("{}; using local settings", e);
            Environment::Local
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Environment {
    fn from(tag: String) -> Self {
        Environment::from_tag(&tag)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => anyhow::bail!(
                "Unknown environment '{}'. Expected local, development, test or production",
                other
            ),
        }
    }
}

/// Top-level configuration manifest
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Deployment environment tag
    #[serde(default)]
    pub env: Environment,

    /// Aggregation gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Work (storage) service settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Report (analysis) service settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Gateway settings. Immutable once the gateway is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listen address (e.g., "localhost:8052")
    pub address: String,

    /// Base URL of the work service
    pub storage_base_url: String,

    /// Base URL of the report service
    pub analysis_base_url: String,

    /// Upper bound on every downstream call
    #[serde(with = "humantime_serde")]
    pub downstream_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub address: String,

    /// PostgreSQL DSN; works are kept in memory when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub address: String,

    /// PostgreSQL DSN; reports are kept in memory when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            address: "localhost:8052".to_string(),
            storage_base_url: "http://localhost:8080".to_string(),
            analysis_base_url: "http://localhost:8081".to_string(),
            downstream_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8080".to_string(),
            database_url: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8081".to_string(),
            database_url: None,
        }
    }
}

impl ClusterConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Candidate file locations, in precedence order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        for key in [CONFIG_PATH_ENV, LEGACY_CONFIG_PATH_ENV] {
            if let Ok(path) = std::env::var(key) {
                paths.push(PathBuf::from(path));
            }
        }

        paths.push(PathBuf::from("./config/local.yaml"));
        paths.push(PathBuf::from("./antiplag-config.yaml"));

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".antiplag").join("config.yaml"));
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/antiplag/config.yaml"));

        paths
    }

    /// First existing file among [`ClusterConfig::search_paths`]
    pub fn discover_config() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|p| p.exists())
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", config_path, e)
            })?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply process environment overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`, so container deployments can
    /// tweak a baked-in file.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ENV") {
            self.env = Environment::from_tag(&val);
        }

        let strings: [(&str, &mut String); 5] = [
            ("GATEWAY_ADDRESS", &mut self.gateway.address),
            ("STORAGE_BASE_URL", &mut self.gateway.storage_base_url),
            ("ANALYSIS_BASE_URL", &mut self.gateway.analysis_base_url),
            ("HTTP_SERVER_ADDRESS", &mut self.storage.address),
            ("ANALYSIS_SERVER_ADDRESS", &mut self.analysis.address),
        ];
        for (key, field) in strings {
            if let Some(val) = lookup(key) {
                tracing::debug!("Environment override: {}", key);
                *field = val;
            }
        }

        if let Some(val) = lookup("GATEWAY_DOWNSTREAM_TIMEOUT") {
            match humantime_serde::re::humantime::parse_duration(&val) {
                Ok(timeout) => self.gateway.downstream_timeout = timeout,
                Err(e) => tracing::warn!(
                    "Invalid value for GATEWAY_DOWNSTREAM_TIMEOUT: '{}' ({}). Ignoring.",
                    val,
                    e
                ),
            }
        }

        if let Some(dsn) = lookup("STORAGE_DB_DSN") {
            self.storage.database_url = Some(dsn);
        }
        if let Some(dsn) = lookup("ANALYSIS_DB_DSN") {
            self.analysis.database_url = Some(dsn);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let addresses = [
            ("gateway.address", &self.gateway.address),
            ("storage.address", &self.storage.address),
            ("analysis.address", &self.analysis.address),
        ];
        for (name, address) in addresses {
            if address.trim().is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
        }

        let urls = [
            ("gateway.storage_base_url", &self.gateway.storage_base_url),
            ("gateway.analysis_base_url", &self.gateway.analysis_base_url),
        ];
        for (name, url) in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }

        if self.gateway.downstream_timeout.is_zero() {
            anyhow::bail!("gateway.downstream_timeout must be greater than zero");
        }

        Ok(())
    }
}
