// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use fluxion_types::{MarketTick, Policy, PolicyError, PolicyParameters, StepInfo};
use std::collections::VecDeque;

pub const NAME: &str = "RollingAveragePolicy";

pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Mean-reversion policy
///
/// Tracks the last `window_size` prices, the current one included. Sells at
/// full rate when the current price is above their mean, buys at full rate
/// otherwise.
#[derive(Debug, Clone)]
pub struct RollingAveragePolicy {
    window_size: usize,
    prices: VecDeque<f64>,
}

impl RollingAveragePolicy {
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            window_size,
            prices: VecDeque::with_capacity(window_size),
        }
    }

    pub fn build(parameters: &PolicyParameters, _seed: u64) -> Result<Box<dyn Policy>, PolicyError> {
        parameters.ensure_only(NAME, &["window_size"])?;
        let window_size = parameters.get_positive_usize(NAME, "window_size", DEFAULT_WINDOW_SIZE)?;
        Ok(Box::new(Self::new(window_size)))
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    fn rolling_mean(&self) -> f64 {
        self.prices.iter().sum::<f64>() / self.prices.len() as f64
    }
}

impl Policy for RollingAveragePolicy {
    fn name(&self) -> &str {
        NAME
    }

    fn act(&mut self, observation: &MarketTick, info: &StepInfo) -> f64 {
        if self.prices.len() == self.window_size {
            self.prices.pop_front();
        }
        self.prices.push_back(observation.price);

        if observation.price > self.rolling_mean() {
            -info.max_discharge_rate
        } else {
            info.max_charge_rate
        }
    }
}
