//! Application configuration management.
//!
//! Configuration is layered from default values, an optional TOML file, and
//! environment variables, in increasing order of precedence.

use crate::distance::DistanceConfig;
use serde::{Deserialize, Serialize};
use sourcing_engine::EngineConfig;
use std::path::Path;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Transport rate and collaborator deadline
    #[serde(default)]
    pub engine: EngineConfig,

    /// How distances are sampled when the catalog does not fix them
    #[serde(default)]
    pub distance: DistanceConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given on the command line
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `SOURCING_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Charge 0.05 per unit per unit of distance
    /// export SOURCING_ENGINE__TRANSPORT_RATE=0.05
    ///
    /// # Make sampled distances reproducible
    /// export SOURCING_DISTANCE__SEED=42
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) if path.exists() => Some(config::File::from(path)),
            Some(path) => {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
            None => None,
        };
        Self::layered(file)
    }

    fn layered(file: Option<impl config::Source + Send + Sync + 'static>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(file) = file {
            config = config.add_source(file);
        }

        // This maps SOURCING_ENGINE__TRANSPORT_RATE to engine.transport_rate
        config = config.add_source(
            config::Environment::with_prefix("SOURCING")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
