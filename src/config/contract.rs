//! Futures contract specifications and the default contract universe.

use serde::{Deserialize, Serialize};

/// How the exchange quotes the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingConvention {
    /// Price = 100 - annualised rate (SOFR, Eurodollar, ...)
    HundredMinusRate,
    /// Plain outright price
    Outright,
}

/// Tick economics of a single contract
pub struct ContractSpecs {
    pub tick_size: f64,
    pub tick_value: f64,
    pub pricing: PricingConvention,
}

/// Parameters for the deterministic sample series generator
pub struct SampleSeriesSettings {
    // Price the random walk starts from (~4.5% implied rate)
    pub base_price: f64,
    pub daily_sigma: f64,
    pub range_sigma: f64,
    // Total drift added linearly over the whole series
    pub trend: f64,
    pub min_volume: u64,
    pub max_volume: u64,
    // Longest series the generator will produce (ten years of daily bars)
    pub max_days: usize,
}

/// The Master Contract Configuration
pub struct ContractConfig {
    pub default_contracts: &'static [&'static str],
    pub specs: ContractSpecs,
    pub sample: SampleSeriesSettings,
}

pub const CONTRACTS: ContractConfig = ContractConfig {
    default_contracts: &["MAR26", "JUN26", "SEP26", "DEC26"],

    specs: ContractSpecs {
        tick_size: 0.0025,
        tick_value: 6.25,
        pricing: PricingConvention::HundredMinusRate,
    },

    sample: SampleSeriesSettings {
        base_price: 95.5,
        daily_sigma: 0.02,
        range_sigma: 0.015,
        trend: 0.3,
        min_volume: 50_000,
        max_volume: 200_000,
        max_days: 3_650,
    },
};

impl ContractSpecs {
    /// Implied rate in percent, if the contract is quoted as 100 - rate.
    pub fn implied_rate(&self, price: f64) -> Option<f64> {
        match self.pricing {
            PricingConvention::HundredMinusRate => Some(100.0 - price),
            PricingConvention::Outright => None,
        }
    }

    /// Dollar value of a price move
    pub fn move_value(&self, price_change: f64) -> f64 {
        (price_change / self.tick_size) * self.tick_value
    }
}
