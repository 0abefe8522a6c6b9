// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! CLI module for the policy evaluator command-line interface.

pub mod args;
pub mod config;
pub mod formatters;
pub mod params;

pub use args::{Cli, Commands, EvaluateArgs, GenerateArgs, PolicyArgs, RunArgs};
pub use config::{EvalConfig, OutputConfig};
pub use formatters::TableFormatter;
pub use params::{parse_param, parse_params};
