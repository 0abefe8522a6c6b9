// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Monte-Carlo evaluation over randomized episode windows.
//!
//! Every trial derives its own RNG from `base_seed + trial_index`, samples a
//! window from it and builds a fresh policy and environment. Trials share
//! nothing except the read-only market series, so they can run on a rayon
//! pool; results are always collected in trial order.

use crate::environment::BatteryEnv;
use crate::error::{BacktestError, Result};
use crate::market::MarketSeries;
use crate::output::ResultsWriter;
use crate::stats::PooledStats;
use crate::trial::run_trial;
use fluxion_types::{AggregateStats, BatteryConfig, PolicyConfig, PolicyConstructor, TrialTrace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// How many trials to run and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSettings {
    /// Number of independent trials
    pub trials: usize,
    /// Base seed; trial `i` uses `seed + i`
    pub seed: u64,
    /// Worker threads (0 or 1 runs sequentially)
    pub threads: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            trials: 100,
            seed: 42,
            threads: 1,
        }
    }
}

/// Episode window and policy seed drawn for one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialWindow {
    pub start_step: usize,
    pub episode_length: usize,
    pub policy_seed: u64,
}

/// Draw the window of trial `trial` over a series of `series_len` ticks.
///
/// Start is uniform in `[0, n-1]`, then length is uniform in `[1, n-start]`,
/// then the policy seed is the next `u64` of the same stream.
pub fn sample_window(base_seed: u64, trial: usize, series_len: usize) -> TrialWindow {
    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
    let n = series_len.max(1);
    let start_step = rng.gen_range(0..n);
    let episode_length = rng.gen_range(1..=n - start_step);
    let policy_seed = rng.next_u64();
    TrialWindow {
        start_step,
        episode_length,
        policy_seed,
    }
}

/// One finished trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub index: usize,
    pub window: TrialWindow,
    pub trace: TrialTrace,
}

/// Result of a full evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub stats: AggregateStats,
    /// Trials in index order
    pub trials: Vec<TrialOutcome>,
}

#[derive(Debug, Clone)]
pub struct EvaluationHarness {
    series: Arc<MarketSeries>,
    battery: BatteryConfig,
    settings: EvaluationSettings,
}

impl EvaluationHarness {
    pub fn new(
        series: Arc<MarketSeries>,
        battery: BatteryConfig,
        settings: EvaluationSettings,
    ) -> Result<Self> {
        battery.validate()?;
        Ok(Self {
            series,
            battery,
            settings,
        })
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    /// Run every trial and aggregate the pooled per-step profit deltas
    pub fn evaluate(
        &self,
        config: &PolicyConfig,
        constructor: PolicyConstructor,
    ) -> Result<Evaluation> {
        if self.settings.trials == 0 {
            return Err(BacktestError::EmptyAggregation("zero trials requested"));
        }
        // Surface parameter errors before any trial starts
        constructor(&config.parameters, self.settings.seed)?;

        info!(
            policy = %config.class_name,
            trials = self.settings.trials,
            seed = self.settings.seed,
            threads = self.settings.threads,
            ticks = self.series.len(),
            "Starting evaluation"
        );

        let trials = if self.settings.threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.settings.threads)
                .build()?;
            pool.install(|| {
                (0..self.settings.trials)
                    .into_par_iter()
                    .map(|index| self.run_one(index, config, constructor))
                    .collect::<Result<Vec<_>>>()
            })?
        } else {
            (0..self.settings.trials)
                .map(|index| self.run_one(index, config, constructor))
                .collect::<Result<Vec<_>>>()?
        };

        let mut pool = PooledStats::new();
        for outcome in &trials {
            pool.extend(&outcome.trace.profit_deltas);
        }
        let summary = pool.finish()?;

        let stats = AggregateStats {
            class_name: config.class_name.clone(),
            parameters: config.parameters.clone(),
            mean_profit: summary.mean,
            std_profit: summary.std_dev,
            num_runs: trials.len(),
            seed: self.settings.seed,
            pooled_steps: summary.count,
        };
        info!(
            mean_profit = stats.mean_profit,
            std_profit = stats.std_profit,
            pooled_steps = stats.pooled_steps,
            "Evaluation finished"
        );

        Ok(Evaluation { stats, trials })
    }

    /// Evaluate, then write every trial trace and the summary
    pub fn evaluate_and_persist(
        &self,
        config: &PolicyConfig,
        constructor: PolicyConstructor,
        writer: &ResultsWriter,
    ) -> Result<Evaluation> {
        let evaluation = self.evaluate(config, constructor)?;
        for outcome in &evaluation.trials {
            writer.write_trial(outcome.index, &outcome.trace)?;
        }
        let summary_path = writer.write_summary(&evaluation.stats)?;
        info!(path = %summary_path.display(), "Results saved");
        Ok(evaluation)
    }

    fn run_one(
        &self,
        index: usize,
        config: &PolicyConfig,
        constructor: PolicyConstructor,
    ) -> Result<TrialOutcome> {
        let window = sample_window(self.settings.seed, index, self.series.len());
        let mut policy = constructor(&config.parameters, window.policy_seed)?;
        let mut env = BatteryEnv::new(Arc::clone(&self.series), self.battery)?;

        let trace = run_trial(
            &mut env,
            policy.as_mut(),
            window.start_step,
            Some(window.episode_length),
        )?;
        debug!(
            trial = index,
            start = window.start_step,
            length = window.episode_length,
            steps = trace.len(),
            profit = trace.final_profit(),
            "Trial finished"
        );

        Ok(TrialOutcome {
            index,
            window,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxion_types::{MarketTick, Policy, PolicyError, PolicyParameters, StepInfo};

    struct AlwaysCharge;

    impl Policy for AlwaysCharge {
        fn name(&self) -> &str {
            "AlwaysCharge"
        }

        fn act(&mut self, _observation: &MarketTick, info: &StepInfo) -> f64 {
            info.max_charge_rate
        }
    }

    fn always_charge(
        parameters: &PolicyParameters,
        _seed: u64,
    ) -> std::result::Result<Box<dyn Policy>, PolicyError> {
        parameters.ensure_only("AlwaysCharge", &[])?;
        Ok(Box::new(AlwaysCharge))
    }

    fn harness(trials: usize) -> EvaluationHarness {
        let series = MarketSeries::from_prices(&[30.0, 25.0, 40.0, 35.0, 20.0, 45.0]).unwrap();
        EvaluationHarness::new(
            Arc::new(series),
            BatteryConfig::default(),
            EvaluationSettings {
                trials,
                seed: 7,
                threads: 1,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_sample_window_is_deterministic_and_in_range() {
        for trial in 0..500 {
            let window = sample_window(42, trial, 10);
            assert_eq!(window, sample_window(42, trial, 10));
            assert!(window.start_step <= 9);
            assert!(window.episode_length >= 1);
            assert!(window.start_step + window.episode_length <= 10);
        }
        assert_ne!(sample_window(42, 0, 1000), sample_window(43, 0, 1000));
    }

    #[test]
    fn test_trial_seed_is_base_plus_index() {
        assert_eq!(sample_window(10, 5, 100), sample_window(15, 0, 100));
        assert_eq!(sample_window(u64::MAX, 1, 100), sample_window(0, 0, 100));
    }

    #[test]
    fn test_single_tick_series_window() {
        let window = sample_window(3, 0, 1);
        assert_eq!(window.start_step, 0);
        assert_eq!(window.episode_length, 1);
    }

    #[test]
    fn test_zero_trials_is_an_error() {
        let err = harness(0)
            .evaluate(&PolicyConfig::new("AlwaysCharge"), always_charge)
            .unwrap_err();
        assert!(matches!(err, BacktestError::EmptyAggregation(_)));
    }

    #[test]
    fn test_bad_parameters_fail_before_running() {
        let config = PolicyConfig::new("AlwaysCharge").with_parameter("speed", serde_json::json!(1));
        let err = harness(3).evaluate(&config, always_charge).unwrap_err();
        assert!(matches!(err, BacktestError::Policy(PolicyError::UnexpectedParameter { .. })));
    }

    #[test]
    fn test_stats_pool_all_deltas() {
        let evaluation = harness(20)
            .evaluate(&PolicyConfig::new("AlwaysCharge"), always_charge)
            .unwrap();

        let deltas: Vec<f64> = evaluation
            .trials
            .iter()
            .flat_map(|t| t.trace.profit_deltas.iter().copied())
            .collect();
        let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
        let var = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / deltas.len() as f64;

        assert_eq!(evaluation.stats.num_runs, 20);
        assert_eq!(evaluation.stats.pooled_steps, deltas.len());
        assert_eq!(evaluation.stats.seed, 7);
        assert!((evaluation.stats.mean_profit - mean).abs() < 1e-9);
        assert!((evaluation.stats.std_profit - var.sqrt()).abs() < 1e-9);
        // Charging at positive prices never earns
        assert!(evaluation.stats.mean_profit < 0.0);

        for (i, outcome) in evaluation.trials.iter().enumerate() {
            assert_eq!(outcome.index, i);
            assert_eq!(outcome.window, sample_window(7, i, 6));
        }
    }
}
