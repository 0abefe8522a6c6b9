// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Persistence of trial traces and evaluation summaries.

use crate::error::{BacktestError, Result};
use chrono::NaiveDateTime;
use fluxion_types::{AggregateStats, TrialTrace};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the evaluation summary
pub const SUMMARY_FILE: &str = "config_stats.json";

/// Sub-directory holding one CSV per trial
pub const RUNS_DIR: &str = "runs";

#[derive(Serialize)]
struct TraceRow {
    #[serde(rename = "Actions")]
    action: f64,
    #[serde(rename = "Profits")]
    profit: f64,
    #[serde(rename = "SoC")]
    soc: f64,
    #[serde(rename = "Market Prices")]
    market_price: f64,
}

/// Write `trace` as CSV with the `Actions,Profits,SoC,Market Prices` header
pub fn write_trace<W: Write>(writer: W, trace: &TrialTrace) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if trace.is_empty() {
        csv.write_record(["Actions", "Profits", "SoC", "Market Prices"])?;
    }
    for i in 0..trace.len() {
        csv.serialize(TraceRow {
            action: trace.actions[i],
            profit: trace.profits[i],
            soc: trace.socs[i],
            market_price: trace.market_prices[i],
        })?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `trace` to a CSV file at `path`
pub fn write_trace_file(path: impl AsRef<Path>, trace: &TrialTrace) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BacktestError::io(parent, e))?;
    }
    let file = fs::File::create(path).map_err(|e| BacktestError::io(path, e))?;
    write_trace(file, trace)
}

/// Lays out one evaluation run on disk:
///
/// ```text
/// <root>/runs/trial_0.csv
/// <root>/runs/trial_1.csv
/// <root>/config_stats.json
/// ```
#[derive(Debug, Clone)]
pub struct ResultsWriter {
    root: PathBuf,
}

impl ResultsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<base>/<YYYYmmdd_HHMMSS>_<class_name>`
    pub fn timestamped_dir(base: &Path, started: NaiveDateTime, class_name: &str) -> PathBuf {
        base.join(format!("{}_{class_name}", started.format("%Y%m%d_%H%M%S")))
    }

    /// Writer rooted at a fresh timestamped directory under `base`
    pub fn in_timestamped_dir(base: &Path, class_name: &str) -> Self {
        let started = chrono::Local::now().naive_local();
        Self::new(Self::timestamped_dir(base, started, class_name))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn trial_path(&self, index: usize) -> PathBuf {
        self.root.join(RUNS_DIR).join(format!("trial_{index}.csv"))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }

    pub fn write_trial(&self, index: usize, trace: &TrialTrace) -> Result<PathBuf> {
        let path = self.trial_path(index);
        write_trace_file(&path, trace)?;
        Ok(path)
    }

    pub fn write_summary(&self, stats: &AggregateStats) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(|e| BacktestError::io(&self.root, e))?;
        let path = self.summary_path();
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&path, json).map_err(|e| BacktestError::io(&path, e))?;
        Ok(path)
    }
}
