//! Configuration loading from citygraph.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{CityGraphError, IoResultExt};
use crate::matrix::{MatrixLimits, DEFAULT_MAX_CITIES};

/// File name looked up in the configuration directory.
pub const CONFIG_FILE: &str = "citygraph.toml";

/// Main configuration structure for citygraph.toml.
#[derive(Debug, Deserialize, Default)]
pub struct CityGraphConfig {
    /// Validator limits.
    pub limits: Option<LimitsConfig>,
    /// Analysis options.
    pub analysis: Option<AnalysisConfig>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Validator limits configuration.
#[derive(Debug, Deserialize, Default)]
pub struct LimitsConfig {
    /// Largest accepted city count.
    pub max_cities: Option<usize>,
}

/// Analysis configuration.
#[derive(Debug, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Run both traversals concurrently.
    pub parallel: Option<bool>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl CityGraphConfig {
    /// Validator limits, falling back to the default bound.
    pub fn matrix_limits(&self) -> Result<MatrixLimits> {
        let max = self
            .limits
            .as_ref()
            .and_then(|l| l.max_cities)
            .unwrap_or(DEFAULT_MAX_CITIES);
        MatrixLimits::new(max).context("Invalid [limits] section")
    }

    /// Whether parallel traversal is requested.
    pub fn parallel(&self) -> bool {
        self.analysis
            .as_ref()
            .and_then(|a| a.parallel)
            .unwrap_or(false)
    }

    /// True when the configured output format is JSON.
    pub fn json_output(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Loads configuration from citygraph.toml if it exists.
///
/// Failures carry a [`CityGraphError`] (`Io` or `Config`) under the
/// `anyhow` context, so callers can downcast to it.
pub fn load_config(root: &Path) -> Result<Option<CityGraphConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg: CityGraphConfig = toml::from_str(&content)
        .map_err(|e| CityGraphError::config(&path, e.to_string()))
        .context("Invalid citygraph.toml")?;
    if let Some(0) = cfg.limits.as_ref().and_then(|l| l.max_cities) {
        return Err(CityGraphError::config(&path, "[limits] max_cities must be at least 1"))
            .context("Invalid citygraph.toml");
    }
    Ok(Some(cfg))
}
