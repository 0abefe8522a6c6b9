// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use fluxion_types::{MarketTick, Policy, PolicyError, PolicyParameters, StepInfo};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const NAME: &str = "RandomActionPolicy";

/// Random baseline
///
/// Picks full charge, full discharge or hold with equal probability and
/// scales the choice by a uniform factor in `[0, 1)`.
#[derive(Debug)]
pub struct RandomActionPolicy {
    rng: StdRng,
}

impl RandomActionPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn build(parameters: &PolicyParameters, seed: u64) -> Result<Box<dyn Policy>, PolicyError> {
        parameters.ensure_only(NAME, &[])?;
        Ok(Box::new(Self::new(seed)))
    }
}

impl Policy for RandomActionPolicy {
    fn name(&self) -> &str {
        NAME
    }

    fn act(&mut self, _observation: &MarketTick, info: &StepInfo) -> f64 {
        let direction = match self.rng.gen_range(0..3) {
            0 => info.max_charge_rate,
            1 => -info.max_discharge_rate,
            _ => 0.0,
        };
        direction * self.rng.gen_range(0.0..1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> StepInfo {
        StepInfo {
            total_profit: 0.0,
            profit_delta: 0.0,
            battery_soc: 50.0,
            remaining_steps: 10,
            max_charge_rate: 40.0,
            max_discharge_rate: 60.0,
        }
    }

    #[test]
    fn test_actions_stay_within_rates() {
        let mut policy = RandomActionPolicy::new(1);
        let tick = MarketTick::new(0, 30.0);
        let (mut charges, mut discharges, mut holds) = (0, 0, 0);

        for _ in 0..3000 {
            let action = policy.act(&tick, &info());
            assert!((-60.0..40.0).contains(&action), "action {action}");
            if action > 0.0 {
                charges += 1;
            } else if action < 0.0 {
                discharges += 1;
            } else {
                holds += 1;
            }
        }

        // Each branch comes up roughly a third of the time
        for count in [charges, discharges, holds] {
            assert!(count > 800, "skewed split {charges}/{discharges}/{holds}");
        }
    }

    #[test]
    fn test_same_seed_same_actions() {
        let tick = MarketTick::new(0, 30.0);
        let mut a = RandomActionPolicy::new(99);
        let mut b = RandomActionPolicy::new(99);

        let run_a: Vec<f64> = (0..50).map(|_| a.act(&tick, &info())).collect();
        let run_b: Vec<f64> = (0..50).map(|_| b.act(&tick, &info())).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_takes_no_parameters() {
        let mut params = PolicyParameters::new();
        assert!(RandomActionPolicy::build(&params, 0).is_ok());

        params.insert("window_size", serde_json::json!(3));
        assert!(RandomActionPolicy::build(&params, 0).is_err());
    }
}
