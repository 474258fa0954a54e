//! Application configuration management.
//!
//! Configuration merges from defaults, an optional TOML file, and
//! environment variables, in increasing order of precedence.

use crate::cli::Cli;
use serde::{Deserialize, Serialize};

/// The main application configuration composing all component configs.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address)
    #[serde(default)]
    pub server: emi_axum::config::ApiConfig,

    /// Database configuration (path, creation behavior)
    #[serde(default)]
    pub database: emi_sqlite::config::SqliteConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables map `EMI_<SECTION>__<KEY>` to
    /// `<section>.<key>`, e.g. `EMI_SERVER__BIND_ADDRESS=0.0.0.0:3000`
    /// or `EMI_DATABASE__DATABASE_PATH=/data/insights.db`.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        config = config.add_source(
            config::Environment::with_prefix("EMI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
