// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Read-only market price series.

use crate::error::{BacktestError, Result};
use fluxion_types::{MarketTick, PRICE_COLUMN, TIMESTAMP_COLUMN};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Ordered market ticks, loaded once and shared between environments
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSeries {
    ticks: Vec<MarketTick>,
}

impl MarketSeries {
    /// Build a series from ticks already in time order
    pub fn from_ticks(ticks: Vec<MarketTick>) -> Result<Self> {
        if ticks.is_empty() {
            return Err(BacktestError::EmptySeries);
        }
        if let Some(tick) = ticks.iter().find(|t| !t.price.is_finite()) {
            return Err(BacktestError::InvalidPrice {
                row: tick.index + 1,
                value: tick.price.to_string(),
            });
        }
        Ok(Self { ticks })
    }

    /// Series with only prices, indexed from 0
    pub fn from_prices(prices: &[f64]) -> Result<Self> {
        Self::from_ticks(
            prices
                .iter()
                .enumerate()
                .map(|(index, price)| MarketTick::new(index, *price))
                .collect(),
        )
    }

    /// Load a series from a CSV file with a header row
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BacktestError::io(path, e))?;
        let series = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            ticks = series.len(),
            "Loaded market data"
        );
        Ok(series)
    }

    /// Parse CSV market data.
    ///
    /// `Market_Price` is required, `Timestamp` is optional and every other
    /// column is kept verbatim as a feature.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();

        let price_idx = headers
            .iter()
            .position(|h| h == PRICE_COLUMN)
            .ok_or(BacktestError::MissingColumn {
                column: PRICE_COLUMN,
            })?;
        let timestamp_idx = headers.iter().position(|h| h == TIMESTAMP_COLUMN);

        let mut ticks = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let raw_price = record.get(price_idx).unwrap_or_default();
            let price = raw_price
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| BacktestError::InvalidPrice {
                    row: index + 1,
                    value: raw_price.to_owned(),
                })?;

            let mut features = BTreeMap::new();
            for (col, (name, value)) in headers.iter().zip(record.iter()).enumerate() {
                if col != price_idx && Some(col) != timestamp_idx {
                    features.insert(name.to_owned(), value.to_owned());
                }
            }

            ticks.push(MarketTick {
                index,
                timestamp: timestamp_idx
                    .and_then(|i| record.get(i))
                    .map(str::to_owned),
                price,
                features,
            });
        }

        debug!(rows = ticks.len(), "Parsed market CSV");
        Self::from_ticks(ticks)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn tick(&self, index: usize) -> Option<&MarketTick> {
        self.ticks.get(index)
    }

    pub fn price(&self, index: usize) -> Option<f64> {
        self.ticks.get(index).map(|t| t.price)
    }

    pub fn ticks(&self) -> &[MarketTick] {
        &self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Timestamp,Market_Price,Temperature,Cloud_Cover
2024-01-01 00:00:00,31.5,12.0,40
2024-01-01 00:05:00,29.25,12.1,41
2024-01-01 00:10:00,-3.0,12.2,39
";

    #[test]
    fn test_parses_prices_timestamps_and_features() {
        let series = MarketSeries::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.price(1), Some(29.25));
        assert_eq!(series.price(2), Some(-3.0));
        assert_eq!(series.price(3), None);

        let tick = series.tick(0).unwrap();
        assert_eq!(tick.index, 0);
        assert_eq!(tick.timestamp.as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(tick.feature_f64("Temperature"), Some(12.0));
        assert_eq!(tick.feature("Cloud_Cover"), Some("40"));
        assert!(tick.feature("Market_Price").is_none());
        assert!(tick.feature("Timestamp").is_none());
    }

    #[test]
    fn test_price_only_file() {
        let series = MarketSeries::from_reader("Market_Price\n10\n20\n".as_bytes()).unwrap();

        assert_eq!(series.len(), 2);
        assert!(series.tick(0).unwrap().timestamp.is_none());
        assert!(series.tick(0).unwrap().features.is_empty());
    }

    #[test]
    fn test_missing_price_column() {
        let err = MarketSeries::from_reader("Timestamp,Price\nx,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BacktestError::MissingColumn { column: "Market_Price" }));
    }

    #[test]
    fn test_unparsable_price_reports_row() {
        let err = MarketSeries::from_reader("Market_Price\n10\nabc\n".as_bytes()).unwrap_err();
        match err {
            BacktestError::InvalidPrice { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(MarketSeries::from_reader("Market_Price\nNaN\n".as_bytes()).is_err());
    }

    #[test]
    fn test_empty_series_rejected() {
        let err = MarketSeries::from_reader("Market_Price\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BacktestError::EmptySeries));
        assert!(matches!(
            MarketSeries::from_prices(&[]),
            Err(BacktestError::EmptySeries)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = MarketSeries::from_csv_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, BacktestError::Io { .. }));
    }

    #[test]
    fn test_from_csv_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let series = MarketSeries::from_csv_path(&path).unwrap();
        assert_eq!(series.len(), 3);
    }
}
