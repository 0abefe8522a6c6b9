// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Policy registry.
//!
//! Maps policy names to constructors. The composition root decides what is
//! registered; nothing is discovered at runtime.

use crate::{idle, random, rolling_average, threshold};
use fluxion_types::{Policy, PolicyConfig, PolicyConstructor, PolicyError};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Information about a registered policy
#[derive(Debug, Clone, Serialize)]
pub struct PolicyInfo {
    /// Name used in configs and on the command line
    pub name: String,

    /// One-line description
    pub description: String,

    /// Accepted parameters with their defaults, for display
    pub parameters: String,
}

/// Registry of all available policies
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    constructors: HashMap<String, PolicyConstructor>,
    info: Vec<PolicyInfo>,
}

impl PolicyRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with all built-in policies
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            random::NAME,
            "Random charge, discharge or hold, scaled by a uniform factor",
            "-",
            random::RandomActionPolicy::build,
        );
        registry.register(
            rolling_average::NAME,
            "Sell above the rolling mean price, buy otherwise",
            "window_size = 50",
            rolling_average::RollingAveragePolicy::build,
        );
        registry.register(
            threshold::NAME,
            "Sell above a fixed price, buy below another, hold in between",
            "sell_above = 35, buy_below = 28",
            threshold::ThresholdPolicy::build,
        );
        registry.register(
            idle::NAME,
            "Never trades (baseline)",
            "-",
            idle::IdlePolicy::build,
        );

        registry
    }

    /// Add or replace a policy
    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        parameters: &str,
        constructor: PolicyConstructor,
    ) {
        if self
            .constructors
            .insert(name.to_owned(), constructor)
            .is_some()
        {
            self.info.retain(|i| i.name != name);
        }
        self.info.push(PolicyInfo {
            name: name.to_owned(),
            description: description.to_owned(),
            parameters: parameters.to_owned(),
        });
    }

    /// Get a constructor by name
    pub fn get(&self, name: &str) -> Result<PolicyConstructor, PolicyError> {
        self.constructors
            .get(name)
            .copied()
            .ok_or_else(|| PolicyError::UnknownPolicy {
                name: name.to_owned(),
                available: self.names().join(", "),
            })
    }

    /// Check if a policy exists
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// List all registered policies in registration order
    pub fn list_policies(&self) -> &[PolicyInfo] {
        &self.info
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.info.iter().map(|i| i.name.as_str()).collect()
    }

    /// Build a policy instance for `config`
    pub fn build(&self, config: &PolicyConfig, seed: u64) -> Result<Box<dyn Policy>, PolicyError> {
        let constructor = self.get(&config.class_name)?;
        debug!(policy = %config.class_name, seed, "Building policy");
        constructor(&config.parameters, seed)
    }
}
