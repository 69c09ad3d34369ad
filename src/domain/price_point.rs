use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// One daily OHLCV bar. Field names match the `Date,Open,High,Low,Close,Volume` CSV schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: u64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        PricePoint {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// True if the bar's [low, high] range overlaps the closed band [band_low, band_high]
    pub fn intersects(&self, band_low: f64, band_high: f64) -> bool {
        self.low <= band_high && self.high >= band_low
    }

    /// Wilder's true range against the previous close
    pub fn true_range(&self, previous_close: f64) -> f64 {
        let high_low = self.high - self.low;
        let high_close = (self.high - previous_close).abs();
        let low_close = (self.low - previous_close).abs();
        high_low.max(high_close).max(low_close)
    }

    /// Prices must be finite and positive, and the range must contain open and close.
    pub fn validate(&self) -> Result<(), InputError> {
        let invalid = |reason: String| InputError::InvalidBar {
            date: self.date,
            reason,
        };

        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.high < self.low {
            return Err(invalid(format!(
                "high {} is below low {}",
                self.high, self.low
            )));
        }
        let contains = |price: f64| price >= self.low && price <= self.high;
        if !contains(self.open) || !contains(self.close) {
            return Err(invalid("open/close outside the high-low range".to_string()));
        }
        Ok(())
    }
}
