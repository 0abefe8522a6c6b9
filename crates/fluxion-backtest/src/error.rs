// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Error types for the backtest crate

use fluxion_types::{ConfigError, PolicyError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacktestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("summary serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("market data has no '{column}' column")]
    MissingColumn { column: &'static str },

    #[error("invalid market price '{value}' on data row {row}")]
    InvalidPrice { row: usize, value: String },

    #[error("market data contains no rows")]
    EmptySeries,

    #[error("start step {start_step} is outside the series (length {series_len})")]
    StartOutOfRange { start_step: usize, series_len: usize },

    #[error("nothing to aggregate: {0}")]
    EmptyAggregation(&'static str),

    #[error("aggregated {statistic} is not finite")]
    NonFiniteStatistic { statistic: &'static str },

    #[error("failed to start trial thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl BacktestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BacktestError>;
