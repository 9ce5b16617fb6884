//! Engine configuration.
//!
//! Loading priority:
//! 1. Default values (hardcoded)
//! 2. Optional TOML config file
//! 3. Environment variables (highest priority)


use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::errors::Result;

const ENV_PREFIX: &str = "MOCK_TRANSPORT";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search the caller/ancestor chains when the running context has no
    /// resolver of its own
    pub search_ancestry: bool,
    /// Fall back to the process-wide global registry as a last resort
    pub global_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_ancestry: true,
            global_fallback: true,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from an optional TOML file with
    /// `MOCK_TRANSPORT_*` environment variables layered on top.
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("search_ancestry", true)?
            .set_default("global_fallback", true)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize::<EngineConfig>()?)
    }
}
