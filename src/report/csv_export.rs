use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{ContractAnalysis, ScoredLevel};
use crate::utils::TimeUtils;

/// One exported level. Column names are part of the file format.
#[derive(Debug, Serialize, PartialEq)]
pub struct LevelRow<'a> {
    #[serde(rename = "Contract")]
    pub contract: &'a str,
    #[serde(rename = "Type")]
    pub side: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Touches")]
    pub touches: usize,
    #[serde(rename = "Strength")]
    pub strength: f64,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Distance_Pct")]
    pub distance_pct: f64,
    #[serde(rename = "First_Touch")]
    pub first_touch: String,
    #[serde(rename = "Last_Touch")]
    pub last_touch: String,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl<'a> LevelRow<'a> {
    pub fn new(contract: &'a str, current_price: f64, level: &ScoredLevel) -> Self {
        let distance = level.distance_abs(current_price);
        Self {
            contract,
            side: level.side.to_string(),
            price: level.price,
            touches: level.touch_count,
            strength: round_to(level.strength, 3),
            distance: round_to(distance, 4),
            distance_pct: round_to(distance / current_price * 100.0, 4),
            first_touch: TimeUtils::format_date(level.first_touch),
            last_touch: TimeUtils::format_date(level.last_touch),
        }
    }
}

/// Support rows first, then resistance, each nearest-first.
pub fn level_rows(analysis: &ContractAnalysis) -> Vec<LevelRow<'_>> {
    let levels = &analysis.levels;
    levels
        .support
        .iter()
        .chain(levels.resistance.iter())
        .map(|level| LevelRow::new(&levels.contract, levels.current_price, level))
        .collect()
}

pub fn write_levels_csv<W: Write>(writer: W, analysis: &ContractAnalysis) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in level_rows(analysis) {
        wtr.serialize(row).context("Failed to serialize level row")?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

pub fn export_levels_csv(path: &Path, analysis: &ContractAnalysis) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    let file =
        std::fs::File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    write_levels_csv(file, analysis)
        .context(format!("Failed to write levels to: {}", path.display()))
}
