use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::maths_utils::running_mean;

/// Which extreme a pivot marks
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PivotKind {
    High,
    Low,
}

/// A confirmed swing point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    /// Index into the analysed bar slice
    pub index: usize,
    pub price: f64,
    pub kind: PivotKind,
}

/// A cluster of nearby pivots. Touch data is filled in by the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLevel {
    /// Running mean of member prices
    pub price: f64,
    /// Members in merge order (ascending price, ties by index)
    pub members: Vec<Pivot>,
    /// Chronologically earliest member; the level "forms" here
    pub founding: Pivot,
    pub touch_count: usize,
    pub last_touch: Option<NaiveDate>,
}

impl CandidateLevel {
    pub fn from_pivot(pivot: Pivot) -> Self {
        Self {
            price: pivot.price,
            members: vec![pivot],
            founding: pivot,
            touch_count: 1,
            last_touch: None,
        }
    }

    /// Merge a pivot and move the centroid to the new running mean.
    pub fn absorb(&mut self, pivot: Pivot) {
        self.members.push(pivot);
        self.price = running_mean(self.price, pivot.price, self.members.len());
        if pivot.index < self.founding.index {
            self.founding = pivot;
        }
    }

    /// Closed tolerance band [price * (1 - t), price * (1 + t)]
    pub fn band(&self, tolerance: f64) -> (f64, f64) {
        (self.price * (1.0 - tolerance), self.price * (1.0 + tolerance))
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum LevelSide {
    Support,
    Resistance,
}

impl fmt::Display for LevelSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelSide::Support => write!(f, "Support"),
            LevelSide::Resistance => write!(f, "Resistance"),
        }
    }
}

/// A scored, classified level ready for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLevel {
    pub price: f64,
    pub touch_count: usize,
    /// In [0, 1]
    pub strength: f64,
    pub first_touch: NaiveDate,
    pub last_touch: NaiveDate,
    pub side: LevelSide,
    /// (price - current) / current * 100
    pub distance_pct: f64,
}

impl ScoredLevel {
    /// Absolute distance to the current price, always >= 0
    pub fn distance_abs(&self, current_price: f64) -> f64 {
        (self.price - current_price).abs()
    }
}
