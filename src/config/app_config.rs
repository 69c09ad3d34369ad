//! Runtime application configuration loaded from an optional JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::contract::CONTRACTS;
use super::detection::DetectionParams;
use super::persistence::{DATA_PATH, OUTPUT_PATH};

/// Everything the CLI needs besides the contract list from the command line.
/// Missing keys fall back to the compile-time defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub contracts: Vec<String>,
    pub detection: DetectionParams,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contracts: CONTRACTS
                .default_contracts
                .iter()
                .map(|c| c.to_string())
                .collect(),
            detection: DetectionParams::default(),
            data_dir: PathBuf::from(DATA_PATH),
            output_dir: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl AppConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// A missing file is not an error: the defaults are used and a warning is logged.
    /// A file that exists but cannot be parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }
}
