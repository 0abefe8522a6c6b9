// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use crate::market::MarketTick;
use crate::policy::PolicyParameters;
use crate::step::StepInfo;
use serde::{Deserialize, Serialize};

/// Per-step record of one trial.
///
/// All columns have the same length: one entry per non-terminal step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialTrace {
    /// Action returned by the policy (kW)
    pub actions: Vec<f64>,
    /// Cumulative profit after the step
    pub profits: Vec<f64>,
    /// State of charge after the step (kWh)
    pub socs: Vec<f64>,
    /// Price of the observation returned by the step
    pub market_prices: Vec<f64>,
    /// Profit earned by the step itself
    pub profit_deltas: Vec<f64>,
}

impl TrialTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(steps: usize) -> Self {
        Self {
            actions: Vec::with_capacity(steps),
            profits: Vec::with_capacity(steps),
            socs: Vec::with_capacity(steps),
            market_prices: Vec::with_capacity(steps),
            profit_deltas: Vec::with_capacity(steps),
        }
    }

    /// Append one step: the action taken and what the environment returned for it
    pub fn record(&mut self, action: f64, observation: &MarketTick, info: &StepInfo) {
        self.actions.push(action);
        self.profits.push(info.total_profit);
        self.socs.push(info.battery_soc);
        self.market_prices.push(observation.price);
        self.profit_deltas.push(info.profit_delta);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Cumulative profit at the end of the trial, 0 for an empty trace
    pub fn final_profit(&self) -> f64 {
        self.profits.last().copied().unwrap_or(0.0)
    }
}

/// Summary of an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Policy that was evaluated
    pub class_name: String,
    /// Parameters the policy was built with
    pub parameters: PolicyParameters,
    /// Mean of all per-step profit deltas pooled across trials
    pub mean_profit: f64,
    /// Population standard deviation of the pooled deltas
    pub std_profit: f64,
    /// Number of trials
    pub num_runs: usize,
    /// Base seed of the run
    pub seed: u64,
    /// Number of deltas that went into the statistics
    pub pooled_steps: usize,
}
