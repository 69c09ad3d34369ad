use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::level::{LevelSide, ScoredLevel};

/// Output of one engine run: the two nearest-first level lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelAnalysis {
    pub contract: String,
    pub current_price: f64,
    pub current_date: NaiveDate,
    /// Bars inside the lookback window
    pub bars_analysed: usize,
    /// Descending by price (nearest first)
    pub support: Vec<ScoredLevel>,
    /// Ascending by price (nearest first)
    pub resistance: Vec<ScoredLevel>,
}

impl LevelAnalysis {
    pub fn levels(&self, side: LevelSide) -> &[ScoredLevel] {
        match side {
            LevelSide::Support => &self.support,
            LevelSide::Resistance => &self.resistance,
        }
    }

    pub fn nearest_support(&self) -> Option<&ScoredLevel> {
        self.support.first()
    }

    pub fn nearest_resistance(&self) -> Option<&ScoredLevel> {
        self.resistance.first()
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }
}

/// Summary figures printed under the level tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStatistics {
    pub nearest_support: Option<f64>,
    pub nearest_resistance: Option<f64>,
    pub support_distance: Option<f64>,
    pub resistance_distance: Option<f64>,
    pub support_distance_pct: Option<f64>,
    pub resistance_distance_pct: Option<f64>,
    /// Dollar value per contract of a move to the nearest support
    pub support_move_value: Option<f64>,
    pub resistance_move_value: Option<f64>,
    pub trading_range: Option<f64>,
    /// 0.0 at nearest support, 1.0 at nearest resistance
    pub position_in_range: Option<f64>,
    pub total_support_levels: usize,
    pub total_resistance_levels: usize,
    pub atr: Option<f64>,
    pub implied_rate: Option<f64>,
}

/// Everything the report and export layers need for one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAnalysis {
    pub levels: LevelAnalysis,
    pub statistics: LevelStatistics,
}

impl ContractAnalysis {
    pub fn contract(&self) -> &str {
        &self.levels.contract
    }
}
