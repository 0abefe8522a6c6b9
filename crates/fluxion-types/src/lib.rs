// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Shared data model for battery arbitrage backtesting.
//!
//! Everything that crosses a crate boundary lives here: market ticks,
//! per-step info snapshots, battery configuration, the policy capability
//! and the trace/statistics records produced by an evaluation.

pub mod battery;
pub mod market;
pub mod policy;
pub mod results;
pub mod step;

// Re-export common types for convenience
pub use battery::{BatteryConfig, ConfigError};
pub use market::{MarketTick, PRICE_COLUMN, TIMESTAMP_COLUMN};
pub use policy::{Policy, PolicyConfig, PolicyConstructor, PolicyError, PolicyParameters};
pub use results::{AggregateStats, TrialTrace};
pub use step::{StepInfo, StepResult};
