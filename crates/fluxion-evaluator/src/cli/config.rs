// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! TOML configuration file parsing for evaluation runs.

use crate::cli::params::parse_params;
use anyhow::{Context, Result, bail};
use fluxion_types::{BatteryConfig, PolicyConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Policy to evaluate when none is given on the command line
    pub policy: Option<PolicyConfig>,

    /// Battery parameters
    #[serde(default)]
    pub battery: BatteryConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory under which timestamped result directories are created
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_results_dir() -> String {
    "results".to_owned()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

impl EvalConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: EvalConfig = toml::from_str(content)?;
        config.battery.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Pick the policy: command line first, then the config file
    pub fn resolve_policy(
        &self,
        class_name: Option<&str>,
        params: &[String],
        config_path: &Path,
    ) -> Result<PolicyConfig> {
        if let Some(class_name) = class_name {
            return Ok(PolicyConfig {
                class_name: class_name.to_owned(),
                parameters: parse_params(params)?,
            });
        }

        let Some(policy) = &self.policy else {
            bail!(
                "No policy selected: pass --class-name or add a [policy] table to {}",
                config_path.display()
            );
        };
        let mut policy = policy.clone();
        // --param still overrides individual config values
        for (key, value) in parse_params(params)?.iter() {
            policy.parameters.insert(key.clone(), value.clone());
        }
        Ok(policy)
    }

    /// Generate example config as TOML string
    pub fn example_toml() -> &'static str {
        r#"# FluxION Policy Evaluator - Configuration Example

[policy]
class_name = "RollingAveragePolicy"

[policy.parameters]
window_size = 50

[battery]
capacity_kwh = 100.0
charge_rate_kw = 50.0
discharge_rate_kw = 50.0
initial_charge_kwh = 50.0
efficiency = 0.9

[output]
results_dir = "results"
"#
    }
}
