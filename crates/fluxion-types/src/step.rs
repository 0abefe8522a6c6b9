// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use crate::market::MarketTick;
use serde::{Deserialize, Serialize};

/// Snapshot handed to the policy together with each observation.
///
/// Recomputed on every step; nothing here is owned state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Cumulative profit of the current episode
    pub total_profit: f64,
    /// Profit earned by the last action (0 right after reset)
    pub profit_delta: f64,
    /// Battery state of charge (kWh)
    pub battery_soc: f64,
    /// Ticks left in the whole series after the current one
    pub remaining_steps: usize,
    /// Maximum charge power (kW)
    pub max_charge_rate: f64,
    /// Maximum discharge power (kW)
    pub max_discharge_rate: f64,
}

/// Outcome of advancing the environment by one tick
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// The episode continues with a new observation
    Next {
        observation: MarketTick,
        info: StepInfo,
    },
    /// The episode reached its last usable tick
    Terminal,
}

impl StepResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    pub fn into_parts(self) -> Option<(MarketTick, StepInfo)> {
        match self {
            Self::Next { observation, info } => Some((observation, info)),
            Self::Terminal => None,
        }
    }
}
