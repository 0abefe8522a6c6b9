// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Single-battery energy model.
//!
//! Power requests above the rate limits and energy flows that would push the
//! state of charge outside `[0, capacity]` are clamped, never rejected.

use crate::error::Result;
use fluxion_types::BatteryConfig;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Rate-limited energy (kWh) before efficiency. Non-finite power and
/// non-finite or non-positive durations move nothing.
fn requested_energy(power: f64, rate_kw: f64, duration_minutes: f64) -> f64 {
    if !power.is_finite() || !duration_minutes.is_finite() || duration_minutes <= 0.0 {
        return 0.0;
    }
    power.clamp(0.0, rate_kw) * (duration_minutes / MINUTES_PER_HOUR)
}

#[derive(Debug, Clone)]
pub struct Battery {
    config: BatteryConfig,
    state_of_charge: f64,
}

impl Battery {
    /// Create a battery at its configured initial charge
    pub fn new(config: BatteryConfig) -> Result<Self> {
        config.validate()?;
        let mut battery = Self {
            config,
            state_of_charge: 0.0,
        };
        battery.reset();
        Ok(battery)
    }

    /// Restore the configured initial charge, clamped to capacity
    pub fn reset(&mut self) {
        self.set_state_of_charge(self.config.initial_charge_kwh);
    }

    /// Charge with `power` kW for `duration_minutes`.
    ///
    /// Returns the energy actually stored (kWh), after efficiency losses and
    /// the capacity limit.
    pub fn charge(&mut self, power: f64, duration_minutes: f64) -> f64 {
        let energy = requested_energy(power, self.config.charge_rate_kw, duration_minutes)
            * self.config.efficiency;
        let headroom = self.config.capacity_kwh - self.state_of_charge;
        let stored = energy.min(headroom);
        self.state_of_charge = (self.state_of_charge + energy).min(self.config.capacity_kwh);
        stored
    }

    /// Discharge with `power` kW for `duration_minutes`.
    ///
    /// Returns the energy actually removed from storage (kWh). Efficiency
    /// losses increase the drain for the same requested power.
    pub fn discharge(&mut self, power: f64, duration_minutes: f64) -> f64 {
        let energy = requested_energy(power, self.config.discharge_rate_kw, duration_minutes)
            / self.config.efficiency;
        let delivered = energy.min(self.state_of_charge);
        self.state_of_charge = (self.state_of_charge - energy).max(0.0);
        delivered
    }

    pub fn state_of_charge(&self) -> f64 {
        self.state_of_charge
    }

    pub(crate) fn set_state_of_charge(&mut self, kwh: f64) {
        self.state_of_charge = kwh.clamp(0.0, self.config.capacity_kwh);
    }

    pub fn capacity(&self) -> f64 {
        self.config.capacity_kwh
    }

    pub fn charge_rate(&self) -> f64 {
        self.config.charge_rate_kw
    }

    pub fn discharge_rate(&self) -> f64 {
        self.config.discharge_rate_kw
    }

    pub fn config(&self) -> &BatteryConfig {
        &self.config
    }
}
