// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid battery {field}: {value} (expected {expected})")]
    InvalidBattery {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Physical parameters of the simulated battery
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    /// Maximum stored energy (kWh)
    pub capacity_kwh: f64,

    /// Maximum charge power (kW)
    pub charge_rate_kw: f64,

    /// Maximum discharge power (kW)
    pub discharge_rate_kw: f64,

    /// Energy stored after a reset (kWh), clamped to capacity
    pub initial_charge_kwh: f64,

    /// Charge/discharge efficiency (0 < e <= 1)
    pub efficiency: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 100.0,
            charge_rate_kw: 50.0,
            discharge_rate_kw: 50.0,
            initial_charge_kwh: 50.0,
            efficiency: 0.9,
        }
    }
}

impl BatteryConfig {
    /// Check the ranges the battery model relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.capacity_kwh.is_finite() && self.capacity_kwh > 0.0) {
            return Err(ConfigError::InvalidBattery {
                field: "capacity_kwh",
                value: self.capacity_kwh,
                expected: "> 0",
            });
        }
        if !(self.charge_rate_kw.is_finite() && self.charge_rate_kw >= 0.0) {
            return Err(ConfigError::InvalidBattery {
                field: "charge_rate_kw",
                value: self.charge_rate_kw,
                expected: ">= 0",
            });
        }
        if !(self.discharge_rate_kw.is_finite() && self.discharge_rate_kw >= 0.0) {
            return Err(ConfigError::InvalidBattery {
                field: "discharge_rate_kw",
                value: self.discharge_rate_kw,
                expected: ">= 0",
            });
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(ConfigError::InvalidBattery {
                field: "efficiency",
                value: self.efficiency,
                expected: "0 < efficiency <= 1",
            });
        }
        if !self.initial_charge_kwh.is_finite() {
            return Err(ConfigError::InvalidBattery {
                field: "initial_charge_kwh",
                value: self.initial_charge_kwh,
                expected: "a finite number",
            });
        }
        Ok(())
    }
}
