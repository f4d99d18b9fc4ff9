// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Log subscriber setup
//!
//! The environment tag picks the output format and default level:
//! `local` writes compact text at `debug`, `development` and `test` write JSON
//! lines at `debug`, `production` writes JSON lines at `info`.
//! `RUST_LOG` beats everything, `--log-level` beats the tag default.
//!
//! Config loading runs before the global subscriber exists, under a
//! thread-scoped subscriber chosen from the `ENV` variable.

use anyhow::{Context, Result};
use antiplag_core::domain::config::Environment;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Noisy dependencies stay quiet unless asked for explicitly
const DEPENDENCY_DIRECTIVES: &str = "hyper_util=info,reqwest=info,sqlx=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub directives: String,
}

impl LogSettings {
    pub fn for_environment(env: Environment, level_override: Option<&str>) -> Self {
        let format = if env.json_logs() {
            LogFormat::Json
        } else {
            LogFormat::Text
        };

        let directives = match level_override {
            Some(level) => level.to_string(),
            None => format!("{},{}", env.default_log_level(), DEPENDENCY_DIRECTIVES),
        };

        Self { format, directives }
    }
}

/// Environment tag from the `ENV` variable, before any config file is read
pub fn process_environment() -> Environment {
    std::env::var("ENV")
        .ok()
        .and_then(|tag| tag.parse().ok())
        .unwrap_or_default()
}

/// Run `f` with a temporary subscriber on the current thread
pub fn with_bootstrap_logging<T>(level_override: Option<&str>, f: impl FnOnce() -> T) -> T {
    let settings = LogSettings::for_environment(process_environment(), level_override);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.directives))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    with_scoped_subscriber(settings.format, filter, std::io::stdout, f)
}

fn with_scoped_subscriber<W, T>(
    format: LogFormat,
    filter: EnvFilter,
    writer: W,
    f: impl FnOnce() -> T,
) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_target(false)
                .compact()
                .finish();
            tracing::subscriber::with_default(subscriber, f)
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .json()
                .finish();
            tracing::subscriber::with_default(subscriber, f)
        }
    }
}

/// Install the global subscriber. Call once per process.
pub fn init_logging(env: Environment, level_override: Option<&str>) -> Result<()> {
    let settings = LogSettings::for_environment(env, level_override);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.directives))
        .context("Failed to create log filter")?;

    let installed = match settings.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use antiplag_core::domain::config::ClusterConfig;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture<T>(format: LogFormat, f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let result = with_scoped_subscriber(
            format,
            EnvFilter::new("debug"),
            move || writer.clone(),
            f,
        );
        (result, captured.contents())
    }

    #[test]
    fn test_ignored_overrides_are_reported_before_global_logging() {
        let vars = HashMap::from([("ENV", "staging"), ("GATEWAY_DOWNSTREAM_TIMEOUT", "soon")]);

        let (config, output) = capture(LogFormat::Text, || {
            let mut config = ClusterConfig::default();
            config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));
            config
        });

        assert_eq!(config.env, Environment::Local);
        assert!(output.contains("GATEWAY_DOWNSTREAM_TIMEOUT"), "{output}");
        assert!(output.contains("'soon'"), "{output}");
        assert!(output.contains("staging"), "{output}");
    }

    #[test]
    fn test_config_file_diagnostics_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("antiplag-config.yaml");
        std::fs::write(&path, "env: staging\n").unwrap();

        let (config, output) = capture(LogFormat::Json, || {
            ClusterConfig::load_or_default(Some(path.clone()))
        });

        assert!(config.is_ok());
        assert!(output.contains("Loading configuration from explicit path"), "{output}");
        assert!(output.contains("Unknown environment 'staging'"), "{output}");
    }

    #[test]
    fn test_local_logs_text_at_debug() {
        let settings = LogSettings::for_environment(Environment::Local, None);
        assert_eq!(settings.format, LogFormat::Text);
        assert!(settings.directives.starts_with("debug,"));
    }

    #[test]
    fn test_dev_and_test_log_json_at_debug() {
        for env in [Environment::Development, Environment::Test] {
            let settings = LogSettings::for_environment(env, None);
            assert_eq!(settings.format, LogFormat::Json);
            assert!(settings.directives.starts_with("debug,"));
        }
    }

    #[test]
    fn test_production_logs_json_at_info() {
        let settings = LogSettings::for_environment(Environment::Production, None);
        assert_eq!(settings.format, LogFormat::Json);
        assert!(settings.directives.starts_with("info,"));
    }

    #[test]
    fn test_level_override_replaces_defaults() {
        let settings = LogSettings::for_environment(Environment::Production, Some("warn"));
        assert_eq!(settings.format, LogFormat::Json);
        assert_eq!(settings.directives, "warn");
    }
}
