// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use crate::environment::BatteryEnv;
use crate::error::Result;
use fluxion_types::{Policy, StepResult, TrialTrace};
use tracing::trace;

/// Run one episode of `policy` against `env` and record every step.
///
/// The policy sees the reset observation first; afterwards each call gets the
/// observation and info returned by the previous step.
pub fn run_trial(
    env: &mut BatteryEnv,
    policy: &mut dyn Policy,
    start_step: usize,
    episode_length: Option<usize>,
) -> Result<TrialTrace> {
    let (mut observation, mut info) = env.reset(start_step, episode_length, None)?;
    let mut trace = TrialTrace::with_capacity(env.episode_end() - env.current_step());

    loop {
        let action = policy.act(&observation, &info);
        match env.step(action) {
            StepResult::Terminal => break,
            StepResult::Next {
                observation: next,
                info: next_info,
            } => {
                trace.record(action, &next, &next_info);
                trace!(
                    step = next.index,
                    action,
                    profit = next_info.total_profit,
                    soc = next_info.battery_soc,
                    "Step"
                );
                observation = next;
                info = next_info;
            }
        }
    }

    Ok(trace)
}
