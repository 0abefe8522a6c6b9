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

//! FluxION Backtesting Engine
//!
//! Replays a historical market price series against a pluggable battery
//! trading policy and measures the resulting profit.
//!
//! ## Features
//!
//! - **Battery Model**: Rate limits, round-trip efficiency, clamped state of charge
//! - **Environment**: Steps one 5-minute tick at a time and prices every action
//! - **Trial Runner**: Drives a policy through one episode and records a trace
//! - **Evaluation Harness**: Seeded Monte-Carlo trials over random episode windows
//! - **Results**: Per-trial CSV traces and a JSON summary

pub mod battery;
pub mod environment;
pub mod error;
pub mod harness;
pub mod market;
pub mod output;
pub mod stats;
pub mod trial;

pub use battery::Battery;
pub use environment::{BatteryEnv, STEP_DURATION_MINUTES};
pub use error::{BacktestError, Result};
pub use harness::{
    Evaluation, EvaluationHarness, EvaluationSettings, TrialOutcome, TrialWindow, sample_window,
};
pub use market::MarketSeries;
pub use output::{ResultsWriter, write_trace, write_trace_file};
pub use stats::{PoolSummary, PooledStats};
pub use trial::run_trial;
