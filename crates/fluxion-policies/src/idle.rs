// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use fluxion_types::{MarketTick, Policy, PolicyError, PolicyParameters, StepInfo};

pub const NAME: &str = "IdlePolicy";

/// Never trades. Baseline and starting point for new policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePolicy;

impl IdlePolicy {
    pub fn build(parameters: &PolicyParameters, _seed: u64) -> Result<Box<dyn Policy>, PolicyError> {
        parameters.ensure_only(NAME, &[])?;
        Ok(Box::new(Self))
    }
}

impl Policy for IdlePolicy {
    fn name(&self) -> &str {
        NAME
    }

    fn act(&mut self, _observation: &MarketTick, _info: &StepInfo) -> f64 {
        0.0
    }
}
