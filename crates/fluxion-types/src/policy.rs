// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Policy capability and its configuration surface.

use crate::market::MarketTick;
use crate::step::StepInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown policy '{name}' (available: {available})")]
    UnknownPolicy { name: String, available: String },

    #[error("invalid value for {policy}.{parameter}: {reason}")]
    InvalidParameter {
        policy: String,
        parameter: String,
        reason: String,
    },

    #[error("{policy} does not accept parameter '{parameter}'")]
    UnexpectedParameter { policy: String, parameter: String },
}

/// Decision policy driven by the trial runner.
///
/// `act` is called exactly once per step with the current tick and the info
/// produced by the previous step (the reset info on the first call). The
/// returned action is a power request in kW: positive charges, negative
/// discharges, zero holds. Implementations may keep state between calls; the
/// harness builds a fresh instance for every trial.
pub trait Policy: Send {
    /// Get the name of this policy
    fn name(&self) -> &str;

    /// Choose the action for the current tick
    fn act(&mut self, observation: &MarketTick, info: &StepInfo) -> f64;
}

/// Builds a policy from its parameters and a per-trial seed
pub type PolicyConstructor = fn(&PolicyParameters, u64) -> Result<Box<dyn Policy>, PolicyError>;

/// Named policy parameters, as read from a config file or `key=value` overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyParameters(BTreeMap<String, Value>);

impl PolicyParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Fail on any parameter name outside `accepted`
    pub fn ensure_only(&self, policy: &str, accepted: &[&str]) -> Result<(), PolicyError> {
        match self.0.keys().find(|name| !accepted.contains(&name.as_str())) {
            Some(name) => Err(PolicyError::UnexpectedParameter {
                policy: policy.to_owned(),
                parameter: name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Numeric parameter, `default` when absent
    pub fn get_f64(&self, policy: &str, name: &str, default: f64) -> Result<f64, PolicyError> {
        let Some(value) = self.0.get(name) else {
            return Ok(default);
        };
        value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PolicyError::InvalidParameter {
                policy: policy.to_owned(),
                parameter: name.to_owned(),
                reason: format!("expected a number, got {value}"),
            })
    }

    /// Positive integer parameter, `default` when absent
    pub fn get_positive_usize(
        &self,
        policy: &str,
        name: &str,
        default: usize,
    ) -> Result<usize, PolicyError> {
        let Some(value) = self.0.get(name) else {
            return Ok(default);
        };
        value
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .filter(|v| *v > 0)
            .ok_or_else(|| PolicyError::InvalidParameter {
                policy: policy.to_owned(),
                parameter: name.to_owned(),
                reason: format!("expected a positive integer, got {value}"),
            })
    }
}

impl FromIterator<(String, Value)> for PolicyParameters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which policy to evaluate and with what parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Registered policy name
    pub class_name: String,

    /// Constructor parameters
    #[serde(default)]
    pub parameters: PolicyParameters,
}

impl PolicyConfig {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            parameters: PolicyParameters::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name, value);
        self
    }
}
