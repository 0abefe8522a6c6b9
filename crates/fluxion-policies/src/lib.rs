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

//! Built-in battery trading policies.
//!
//! - **RandomActionPolicy**: random direction and magnitude (seeded per trial)
//! - **RollingAveragePolicy**: sells above the rolling mean price, buys below
//! - **ThresholdPolicy**: fixed buy/sell price bands
//! - **IdlePolicy**: never trades
//!
//! Every policy is constructed through [`PolicyRegistry`] from a name, its
//! parameters and a seed.

pub mod idle;
pub mod random;
pub mod registry;
pub mod rolling_average;
pub mod threshold;

pub use idle::IdlePolicy;
pub use random::RandomActionPolicy;
pub use registry::{PolicyInfo, PolicyRegistry};
pub use rolling_average::RollingAveragePolicy;
pub use threshold::ThresholdPolicy;
