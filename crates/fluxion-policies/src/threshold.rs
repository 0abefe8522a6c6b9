// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use fluxion_types::{MarketTick, Policy, PolicyError, PolicyParameters, StepInfo};

pub const NAME: &str = "ThresholdPolicy";

pub const DEFAULT_SELL_ABOVE: f64 = 35.0;
pub const DEFAULT_BUY_BELOW: f64 = 28.0;

/// Fixed price bands: sell above `sell_above`, buy below `buy_below`, hold in between
#[derive(Debug, Clone, Copy)]
pub struct ThresholdPolicy {
    sell_above: f64,
    buy_below: f64,
}

impl ThresholdPolicy {
    pub fn new(sell_above: f64, buy_below: f64) -> Self {
        Self {
            sell_above,
            buy_below,
        }
    }

    pub fn build(parameters: &PolicyParameters, _seed: u64) -> Result<Box<dyn Policy>, PolicyError> {
        parameters.ensure_only(NAME, &["sell_above", "buy_below"])?;
        let sell_above = parameters.get_f64(NAME, "sell_above", DEFAULT_SELL_ABOVE)?;
        let buy_below = parameters.get_f64(NAME, "buy_below", DEFAULT_BUY_BELOW)?;
        if buy_below > sell_above {
            return Err(PolicyError::InvalidParameter {
                policy: NAME.to_owned(),
                parameter: "buy_below".to_owned(),
                reason: format!("{buy_below} is above sell_above ({sell_above})"),
            });
        }
        Ok(Box::new(Self::new(sell_above, buy_below)))
    }
}

impl Policy for ThresholdPolicy {
    fn name(&self) -> &str {
        NAME
    }

    fn act(&mut self, observation: &MarketTick, info: &StepInfo) -> f64 {
        if observation.price > self.sell_above {
            -info.max_discharge_rate
        } else if observation.price < self.buy_below {
            info.max_charge_rate
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn act(policy: &mut dyn Policy, price: f64) -> f64 {
        let info = StepInfo {
            total_profit: 0.0,
            profit_delta: 0.0,
            battery_soc: 50.0,
            remaining_steps: 1,
            max_charge_rate: 50.0,
            max_discharge_rate: 45.0,
        };
        policy.act(&MarketTick::new(0, price), &info)
    }

    #[test]
    fn test_default_bands() {
        let mut policy = ThresholdPolicy::build(&PolicyParameters::new(), 0).unwrap();

        assert!((act(policy.as_mut(), 40.0) + 45.0).abs() < f64::EPSILON);
        assert!((act(policy.as_mut(), 20.0) - 50.0).abs() < f64::EPSILON);
        assert!(act(policy.as_mut(), 30.0).abs() < f64::EPSILON);
        // Band edges hold
        assert!(act(policy.as_mut(), 35.0).abs() < f64::EPSILON);
        assert!(act(policy.as_mut(), 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_bands() {
        let mut params = PolicyParameters::new();
        params.insert("sell_above", json!(10));
        params.insert("buy_below", json!(-5.5));

        let mut policy = ThresholdPolicy::build(&params, 0).unwrap();
        assert!(act(policy.as_mut(), 11.0) < 0.0);
        assert!(act(policy.as_mut(), -6.0) > 0.0);
    }

    #[test]
    fn test_inverted_bands_rejected() {
        let mut params = PolicyParameters::new();
        params.insert("sell_above", json!(20));
        params.insert("buy_below", json!(30));

        assert!(matches!(
            ThresholdPolicy::build(&params, 0),
            Err(PolicyError::InvalidParameter { .. })
        ));
    }
}
