// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Pooled profit statistics.

use crate::error::{BacktestError, Result};

/// Running mean/variance over pooled per-step profit deltas (Welford)
#[derive(Debug, Clone, Copy, Default)]
pub struct PooledStats {
    count: usize,
    mean: f64,
    m2: f64,
}

/// Final statistics of a pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl PooledStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn extend(&mut self, values: &[f64]) {
        for value in values {
            self.push(*value);
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean and population standard deviation of everything pushed so far.
    ///
    /// Fails on an empty pool and when either statistic is not finite.
    pub fn finish(&self) -> Result<PoolSummary> {
        if self.count == 0 {
            return Err(BacktestError::EmptyAggregation(
                "no profit deltas were recorded",
            ));
        }
        let std_dev = (self.m2 / self.count as f64).max(0.0).sqrt();
        if !self.mean.is_finite() {
            return Err(BacktestError::NonFiniteStatistic { statistic: "mean" });
        }
        if !std_dev.is_finite() {
            return Err(BacktestError::NonFiniteStatistic {
                statistic: "standard deviation",
            });
        }
        Ok(PoolSummary {
            count: self.count,
            mean: self.mean,
            std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_two_pass_population_stats() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut stats = PooledStats::new();
        stats.extend(&values);

        let summary = stats.finish().unwrap();

        assert_eq!(summary.count, 8);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let mut stats = PooledStats::new();
        stats.push(-9.375);

        let summary = stats.finish().unwrap();
        assert!((summary.mean + 9.375).abs() < f64::EPSILON);
        assert!(summary.std_dev.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        assert!(matches!(
            PooledStats::new().finish(),
            Err(BacktestError::EmptyAggregation(_))
        ));
    }

    #[test]
    fn test_non_finite_values_are_an_error() {
        let mut stats = PooledStats::new();
        stats.extend(&[1.0, f64::NAN, 3.0]);

        assert!(matches!(
            stats.finish(),
            Err(BacktestError::NonFiniteStatistic { .. })
        ));
    }
}
