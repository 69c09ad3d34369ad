//! Configuration module for the level scanner.

pub mod app_config;
pub mod contract;
pub mod detection;
pub mod persistence;
pub mod report;

mod debug; // Private: callers use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use app_config::AppConfig;
pub use contract::{CONTRACTS, ContractSpecs, PricingConvention};
pub use detection::{DETECTION, DetectionParams};
pub use persistence::{
    CONFIG_PATH, DATA_PATH, EXPORT_TIMESTAMP_FORMAT, OUTPUT_PATH, analysis_json_filename,
    contract_csv_filename, levels_csv_filename,
};
pub use report::REPORT;
