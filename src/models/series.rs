use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::PricePoint;
use crate::error::InputError;
use crate::utils::maths_utils::{get_max, get_min};

// ============================================================================
// PriceSeries: chronologically ordered bars for one contract
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub contract: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(contract: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            contract: contract.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Checks the invariants every analysis relies on: non-empty, at least `min_len` bars,
    /// strictly increasing dates and well-formed bars.
    pub fn validate(&self, min_len: usize) -> Result<(), InputError> {
        if self.points.is_empty() {
            return Err(InputError::EmptySeries {
                contract: self.contract.clone(),
            });
        }
        if self.points.len() < min_len {
            return Err(InputError::InsufficientData {
                contract: self.contract.clone(),
                required: min_len,
                actual: self.points.len(),
            });
        }
        validate_points(&self.points)
    }

    /// The trailing slice covering the last `days` calendar days (inclusive of the last bar's date).
    /// A lookback reaching past the earliest representable date returns the whole series.
    pub fn lookback_window(&self, days: u32) -> &[PricePoint] {
        let Some(last) = self.points.last() else {
            return &self.points;
        };
        let Some(cutoff) = last.date.checked_sub_days(Days::new(u64::from(days))) else {
            return &self.points;
        };
        // Dates are strictly increasing, so the first bar after the cutoff starts the window.
        let start = self.points.partition_point(|p| p.date <= cutoff);
        &self.points[start..]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Strictly increasing dates and valid bars.
pub fn validate_points(points: &[PricePoint]) -> Result<(), InputError> {
    for (index, point) in points.iter().enumerate() {
        point.validate()?;
        if index > 0 && points[index - 1].date >= point.date {
            return Err(InputError::NonMonotonicDates {
                index,
                previous: points[index - 1].date,
                current: point.date,
            });
        }
    }
    Ok(())
}

/// (min low, max high) of a non-empty bar slice
pub fn price_bounds(points: &[PricePoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let lows: Vec<f64> = points.iter().map(|p| p.low).collect();
    let highs: Vec<f64> = points.iter().map(|p| p.high).collect();
    Some((get_min(&lows), get_max(&highs)))
}
