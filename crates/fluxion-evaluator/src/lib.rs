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

//! Policy Evaluator for FluxION
//!
//! Command-line front end over the backtesting engine.
//!
//! # Features
//!
//! - **Evaluate**: Seeded Monte-Carlo trials of one policy, results saved to disk
//! - **Run**: A single full-series episode with an optional trace export
//! - **Policies**: Lists the policy registry
//! - **Generate**: Synthetic 5-minute market data
//!
//! # Example
//!
//! ```ignore
//! use fluxion_backtest::{EvaluationHarness, EvaluationSettings, MarketSeries};
//! use fluxion_policies::PolicyRegistry;
//! use fluxion_types::{BatteryConfig, PolicyConfig};
//! use std::sync::Arc;
//!
//! let registry = PolicyRegistry::new_with_defaults();
//! let series = Arc::new(MarketSeries::from_csv_path("train.csv")?);
//! let harness = EvaluationHarness::new(series, BatteryConfig::default(), EvaluationSettings::default())?;
//!
//! let config = PolicyConfig::new("RollingAveragePolicy");
//! let evaluation = harness.evaluate(&config, registry.get(&config.class_name)?)?;
//! println!("{:.2} ± {:.2}", evaluation.stats.mean_profit, evaluation.stats.std_profit);
//! ```

pub mod cli;
pub mod synthetic_data;

// Re-exports for convenience
pub use synthetic_data::{SyntheticMarketConfig, SyntheticRow, parse_datetime};
