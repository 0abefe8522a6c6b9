// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Stepping environment: one battery trading against a market series.

use crate::battery::Battery;
use crate::error::{BacktestError, Result};
use crate::market::MarketSeries;
use fluxion_types::{BatteryConfig, MarketTick, StepInfo, StepResult};
use std::sync::Arc;
use tracing::warn;

/// Length of one market tick
pub const STEP_DURATION_MINUTES: f64 = 5.0;

const HOURS_PER_STEP: f64 = STEP_DURATION_MINUTES / 60.0;

/// Episode state over a shared market series.
///
/// An episode runs from `start_step` until `episode_end` (exclusive), which
/// never exceeds the last tick of the series, so every episode terminates.
#[derive(Debug)]
pub struct BatteryEnv {
    series: Arc<MarketSeries>,
    battery: Battery,
    current_step: usize,
    episode_end: usize,
    total_profit: f64,
}

impl BatteryEnv {
    pub fn new(series: Arc<MarketSeries>, config: BatteryConfig) -> Result<Self> {
        let battery = Battery::new(config)?;
        let episode_end = series.len().saturating_sub(1);
        Ok(Self {
            series,
            battery,
            current_step: 0,
            episode_end,
            total_profit: 0.0,
        })
    }

    /// Start a new episode.
    ///
    /// `episode_length` of `None` (or `Some(0)`) runs to the end of the
    /// series. `initial_soc` overrides the configured initial charge and is
    /// clamped to capacity.
    pub fn reset(
        &mut self,
        start_step: usize,
        episode_length: Option<usize>,
        initial_soc: Option<f64>,
    ) -> Result<(MarketTick, StepInfo)> {
        let series_len = self.series.len();
        let observation = self
            .series
            .tick(start_step)
            .cloned()
            .ok_or(BacktestError::StartOutOfRange {
                start_step,
                series_len,
            })?;

        let length = episode_length
            .filter(|l| *l > 0)
            .unwrap_or(series_len - start_step);
        self.current_step = start_step;
        self.episode_end = start_step.saturating_add(length).min(series_len - 1);
        self.total_profit = 0.0;

        match initial_soc {
            Some(soc) if soc.is_finite() => self.battery.set_state_of_charge(soc),
            Some(soc) => {
                warn!(soc, "Ignoring non-finite initial state of charge");
                self.battery.reset();
            }
            None => self.battery.reset(),
        }

        Ok((observation, self.get_info(0.0)))
    }

    /// Apply `action` (kW) for one tick at the current price.
    ///
    /// Positive actions charge, negative actions discharge, zero holds.
    /// Non-finite actions are treated as hold.
    ///
    /// Charging pays `energy * price`, so its `profit_delta` is non-positive
    /// only at non-negative prices; charging at a negative price earns.
    pub fn step(&mut self, action: f64) -> StepResult {
        if self.current_step >= self.episode_end {
            return StepResult::Terminal;
        }

        let price = self.series.ticks()[self.current_step].price;
        let profit_delta = if !action.is_finite() {
            warn!(action, step = self.current_step, "Non-finite action treated as hold");
            0.0
        } else if action > 0.0 {
            let absorbed = self.battery.charge(action, STEP_DURATION_MINUTES);
            -absorbed * HOURS_PER_STEP * price
        } else if action < 0.0 {
            let delivered = self.battery.discharge(-action, STEP_DURATION_MINUTES);
            delivered * HOURS_PER_STEP * price
        } else {
            0.0
        };

        self.current_step += 1;
        let observation = self.series.ticks()[self.current_step].clone();
        let info = self.get_info(profit_delta);
        StepResult::Next { observation, info }
    }

    /// Fold `profit_delta` into the running total and snapshot the state
    pub fn get_info(&mut self, profit_delta: f64) -> StepInfo {
        self.total_profit += profit_delta;
        StepInfo {
            total_profit: self.total_profit,
            profit_delta,
            battery_soc: self.battery.state_of_charge(),
            remaining_steps: self
                .series
                .len()
                .saturating_sub(self.current_step)
                .saturating_sub(1),
            max_charge_rate: self.battery.charge_rate(),
            max_discharge_rate: self.battery.discharge_rate(),
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn episode_end(&self) -> usize {
        self.episode_end
    }

    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    pub fn series(&self) -> &Arc<MarketSeries> {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_prices(prices: &[f64]) -> BatteryEnv {
        let series = Arc::new(MarketSeries::from_prices(prices).unwrap());
        BatteryEnv::new(series, BatteryConfig::default()).unwrap()
    }

    #[test]
    fn test_reset_returns_start_tick_and_initial_info() {
        let mut env = env_with_prices(&[30.0, 31.0, 32.0, 33.0]);

        let (observation, info) = env.reset(1, None, None).unwrap();

        assert_eq!(observation.index, 1);
        assert!((observation.price - 31.0).abs() < f64::EPSILON);
        assert!(info.total_profit.abs() < f64::EPSILON);
        assert!(info.profit_delta.abs() < f64::EPSILON);
        assert!((info.battery_soc - 50.0).abs() < f64::EPSILON);
        assert_eq!(info.remaining_steps, 2);
        assert!((info.max_charge_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(env.episode_end(), 3);
    }

    #[test]
    fn test_charge_scenario() {
        let mut env = env_with_prices(&[30.0, 30.0]);
        env.reset(0, None, None).unwrap();

        let (observation, info) = env.step(50.0).into_parts().unwrap();

        assert_eq!(observation.index, 1);
        assert!((info.battery_soc - 53.75).abs() < 1e-9);
        assert!((info.profit_delta + 9.375).abs() < 1e-9, "delta {}", info.profit_delta);
        assert!((info.total_profit + 9.375).abs() < 1e-9);
        assert!(env.step(50.0).is_terminal());
    }

    #[test]
    fn test_hold_changes_nothing() {
        let mut env = env_with_prices(&[30.0, 40.0, 50.0]);
        env.reset(0, None, None).unwrap();

        let (_, info) = env.step(0.0).into_parts().unwrap();

        assert!((info.battery_soc - 50.0).abs() < f64::EPSILON);
        assert!(info.profit_delta.abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_action_is_hold() {
        let mut env = env_with_prices(&[30.0, 40.0, 50.0]);
        env.reset(0, None, None).unwrap();

        let (_, info) = env.step(f64::NAN).into_parts().unwrap();
        assert!(info.profit_delta.abs() < f64::EPSILON);
        let (_, info) = env.step(f64::INFINITY).into_parts().unwrap();
        assert!(info.profit_delta.abs() < f64::EPSILON);
        assert!((info.battery_soc - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profit_sign_convention() {
        let mut env = env_with_prices(&[20.0, 40.0, 40.0, 40.0]);
        env.reset(0, None, None).unwrap();

        let (_, charged) = env.step(10.0).into_parts().unwrap();
        assert!(charged.profit_delta < 0.0, "buying at a positive price costs money");

        let (_, discharged) = env.step(-10.0).into_parts().unwrap();
        assert!(discharged.profit_delta > 0.0, "selling at a positive price earns money");

        env.reset(0, None, Some(0.0)).unwrap();
        let (_, empty) = env.step(-10.0).into_parts().unwrap();
        assert!(empty.profit_delta.abs() < f64::EPSILON, "nothing to sell");
    }

    #[test]
    fn test_negative_price_charging_earns() {
        let mut env = env_with_prices(&[-10.0, 5.0]);
        env.reset(0, None, None).unwrap();

        let (_, info) = env.step(50.0).into_parts().unwrap();
        assert!(info.profit_delta > 0.0);
    }

    #[test]
    fn test_episode_length_bounds_steps() {
        let mut env = env_with_prices(&[1.0; 20]);

        for (start, length, expected) in [(0, 5, 5), (3, 1, 1), (15, 10, 4), (19, 1, 0), (0, 0, 19)] {
            env.reset(start, Some(length), None).unwrap();
            let mut steps = 0;
            while !env.step(1.0).is_terminal() {
                steps += 1;
            }
            assert_eq!(steps, expected, "start {start} length {length}");
            // Terminal is sticky
            assert!(env.step(1.0).is_terminal());
        }
    }

    #[test]
    fn test_remaining_steps_counts_down() {
        let mut env = env_with_prices(&[1.0, 2.0, 3.0]);
        let (_, info) = env.reset(0, None, None).unwrap();
        assert_eq!(info.remaining_steps, 2);

        let (_, info) = env.step(0.0).into_parts().unwrap();
        assert_eq!(info.remaining_steps, 1);

        let (_, info) = env.step(0.0).into_parts().unwrap();
        assert_eq!(info.remaining_steps, 0);
    }

    #[test]
    fn test_reset_clears_profit_and_sets_soc() {
        let mut env = env_with_prices(&[30.0, 30.0, 30.0]);
        env.reset(0, None, None).unwrap();
        env.step(50.0);
        assert!(env.total_profit() < 0.0);

        let (_, info) = env.reset(0, None, Some(500.0)).unwrap();
        assert!(env.total_profit().abs() < f64::EPSILON);
        assert!((info.battery_soc - 100.0).abs() < f64::EPSILON);
        assert_eq!(env.current_step(), 0);
    }

    #[test]
    fn test_start_out_of_range() {
        let mut env = env_with_prices(&[1.0, 2.0]);
        let err = env.reset(2, None, None).unwrap_err();
        assert!(matches!(
            err,
            BacktestError::StartOutOfRange {
                start_step: 2,
                series_len: 2
            }
        ));
    }

    #[test]
    fn test_single_tick_series_is_immediately_terminal() {
        let mut env = env_with_prices(&[42.0]);
        let (observation, info) = env.reset(0, None, None).unwrap();

        assert!((observation.price - 42.0).abs() < f64::EPSILON);
        assert_eq!(info.remaining_steps, 0);
        assert!(env.step(10.0).is_terminal());
    }
}
