// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column holding the spot price (currency per kWh)
pub const PRICE_COLUMN: &str = "Market_Price";

/// Optional column holding the tick timestamp
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// One row of the market series (one 5-minute step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTick {
    /// Position of this tick in the series
    pub index: usize,
    /// Raw timestamp text, if the source had a timestamp column
    pub timestamp: Option<String>,
    /// Market price (currency per kWh)
    pub price: f64,
    /// Auxiliary columns, passed through verbatim
    pub features: BTreeMap<String, String>,
}

impl MarketTick {
    pub fn new(index: usize, price: f64) -> Self {
        Self {
            index,
            timestamp: None,
            price,
            features: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(name.into(), value.into());
        self
    }

    /// Raw value of an auxiliary column
    pub fn feature(&self, name: &str) -> Option<&str> {
        self.features.get(name).map(String::as_str)
    }

    /// Auxiliary column parsed as a number, `None` if absent or not numeric
    pub fn feature_f64(&self, name: &str) -> Option<f64> {
        self.feature(name)?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_accessors() {
        let tick = MarketTick::new(3, 31.5)
            .with_timestamp("2024-01-01 00:15:00")
            .with_feature("Temperature", "21.25")
            .with_feature("Region", "NSW1");

        assert_eq!(tick.index, 3);
        assert_eq!(tick.timestamp.as_deref(), Some("2024-01-01 00:15:00"));
        assert_eq!(tick.feature_f64("Temperature"), Some(21.25));
        assert_eq!(tick.feature("Region"), Some("NSW1"));
        assert_eq!(tick.feature_f64("Region"), None);
        assert_eq!(tick.feature("Cloud_Cover"), None);
    }
}
