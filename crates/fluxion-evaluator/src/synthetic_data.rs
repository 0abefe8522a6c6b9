// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Synthetic market data generation.
//!
//! Produces 5-minute ticks with a uniformly random price and weather
//! features plus an energy demand that follows a daily sine wave. Output
//! files load directly as market data.

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::PI;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for a generated series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticMarketConfig {
    /// First tick
    pub start: NaiveDateTime,

    /// Last tick (inclusive when on the 5-minute grid)
    pub end: NaiveDateTime,

    /// RNG seed
    pub seed: u64,
}

/// One generated row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Market_Price")]
    pub market_price: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Cloud_Cover")]
    pub cloud_cover: f64,
    #[serde(rename = "Energy_Demand")]
    pub energy_demand: f64,
}

/// Parse `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM:SS`
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .with_context(|| {
            format!(
                "Invalid date: '{value}'\n\n\
                Expected format: YYYY-MM-DD or \"YYYY-MM-DD HH:MM:SS\""
            )
        })
}

/// Daily demand swing: peaks at 06:00, bottoms out at 18:00
fn demand_variation(time: NaiveDateTime) -> f64 {
    let hour = f64::from(time.hour()) + f64::from(time.minute()) / 60.0;
    300.0 * (2.0 * PI * hour / 24.0).sin()
}

impl SyntheticMarketConfig {
    /// Rows every 5 minutes from `start` to `end`
    pub fn generate(&self) -> Result<Vec<SyntheticRow>> {
        if self.end < self.start {
            bail!(
                "End {} is before start {}",
                self.end.format(TIMESTAMP_FORMAT),
                self.start.format(TIMESTAMP_FORMAT)
            );
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let step = Duration::minutes(5);
        let mut rows = Vec::new();
        let mut time = self.start;

        while time <= self.end {
            rows.push(SyntheticRow {
                timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
                market_price: rng.gen_range(20.0..50.0),
                temperature: rng.gen_range(10.0..35.0),
                cloud_cover: rng.gen_range(0.0..100.0),
                energy_demand: rng.gen_range(500.0..1000.0) + demand_variation(time),
            });
            time += step;
        }

        Ok(rows)
    }

    /// Generate and write CSV to `writer`, returning the row count
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let rows = self.generate()?;
        let mut csv = csv::Writer::from_writer(writer);
        for row in &rows {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(rows.len())
    }

    /// Generate and write CSV to `path`, returning the row count
    pub fn write_file(&self, path: &Path) -> Result<usize> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_csv(file)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
