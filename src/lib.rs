#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use analysis::{MultiContractAnalyzer, analyze_contract, detect_levels};
pub use config::{AppConfig, DetectionParams};
pub use data::{CsvSeriesSource, SampleSeriesSource, SeriesSource, load_with_fallback};
pub use domain::{ContractCode, PricePoint};
pub use error::{ConfigurationError, InputError, LevelError, LevelResult};
pub use models::{ContractAnalysis, LevelAnalysis, LevelSide, PriceSeries, ScoredLevel};

use std::path::PathBuf;

// CLI argument parsing
use clap::Parser;
use itertools::Itertools;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Support and resistance levels for futures contracts", long_about = None)]
pub struct Cli {
    /// Contracts to analyse (e.g. MAR26 JUN26). Defaults to the configured list
    #[arg(short, long = "contract", num_args = 1..)]
    pub contracts: Vec<String>,

    /// Lookback period in calendar days
    #[arg(long)]
    pub lookback: Option<u32>,

    /// Minimum touches for a level to be reported
    #[arg(long)]
    pub min_touches: Option<usize>,

    /// Clustering tolerance as a fraction of price (0.0005 = 0.05%)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Pivot window in bars (odd, >= 3)
    #[arg(long)]
    pub window: Option<usize>,

    /// Maximum levels reported per side
    #[arg(long)]
    pub max_levels: Option<usize>,

    /// JSON configuration file
    #[arg(long, default_value = config::CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory holding <CONTRACT>.csv files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Write CSV and JSON exports for every analysed contract
    #[arg(long, default_value_t = false)]
    pub export: bool,

    /// Directory receiving exports
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Print a comparison table across contracts
    #[arg(long, default_value_t = false)]
    pub compare: bool,

    /// Skip CSV files and use generated sample data
    #[arg(long, default_value_t = false)]
    pub sample: bool,

    /// Debug-level logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line values win over the config file.
    pub fn apply_to(&self, mut config: AppConfig) -> AppConfig {
        if !self.contracts.is_empty() {
            config.contracts = self.contracts.clone();
        }
        let detection = &mut config.detection;
        if let Some(v) = self.lookback {
            detection.lookback_days = v;
        }
        if let Some(v) = self.min_touches {
            detection.min_touches = v;
        }
        if let Some(v) = self.tolerance {
            detection.price_tolerance = v;
        }
        if let Some(v) = self.window {
            detection.window = v;
        }
        if let Some(v) = self.max_levels {
            detection.max_levels = v;
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config
    }

    /// Contract codes, normalised and de-duplicated in order of appearance.
    pub fn contract_codes(config: &AppConfig) -> Vec<ContractCode> {
        config
            .contracts
            .iter()
            .map(|raw| ContractCode::new(raw))
            .filter(|code| !code.name().is_empty())
            .unique()
            .collect()
    }
}
