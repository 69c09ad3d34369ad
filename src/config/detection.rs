//! Level detection configuration: compile-time defaults plus the runtime parameter struct.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Settings for swing-point extraction
pub struct PivotSettings {
    // Bars inspected around each candidate pivot (odd, centre bar included).
    // 11 = 5 bars either side
    pub window: usize,
}

/// Settings for touch-based strength scoring
pub struct ScoringSettings {
    // Post-founding touches at which the touch component saturates at 1.0
    pub touch_ceiling: f64,
    // Days after which the recency component has halved
    pub half_life_days: f64,
    // The two weights must sum to 1.0
    pub touch_weight: f64,
    pub recency_weight: f64,
}

/// Settings applied by the classifier
pub struct FilterSettings {
    pub min_touches: usize,
    pub strength_threshold: f64,
    pub max_levels: usize,
}

/// The Master Detection Configuration
pub struct DetectionConfig {
    // Calendar days of history (counted back from the last bar) to analyse
    pub lookback_days: u32,
    // Fractional band around a level, e.g. 0.0005 = 0.05% of price
    pub price_tolerance: f64,

    // Sub-groups
    pub pivot: PivotSettings,
    pub scoring: ScoringSettings,
    pub filter: FilterSettings,
}

pub const DETECTION: DetectionConfig = DetectionConfig {
    lookback_days: 90,
    price_tolerance: 0.0005,

    pivot: PivotSettings { window: 11 },

    scoring: ScoringSettings {
        touch_ceiling: 5.0,
        half_life_days: 30.0,
        touch_weight: 0.6,
        recency_weight: 0.4,
    },

    filter: FilterSettings {
        min_touches: 2,
        strength_threshold: 0.3,
        max_levels: 5,
    },
};

const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Runtime detection parameters.
///
/// Built once (defaults, then config file, then CLI overrides), validated at the engine
/// boundary and passed by reference into every stage. Nothing in the engine reads `DETECTION`
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    pub lookback_days: u32,
    pub min_touches: usize,
    pub price_tolerance: f64,
    pub strength_threshold: f64,
    pub max_levels: usize,
    pub window: usize,
    pub touch_ceiling: f64,
    pub half_life_days: f64,
    pub touch_weight: f64,
    pub recency_weight: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            lookback_days: DETECTION.lookback_days,
            min_touches: DETECTION.filter.min_touches,
            price_tolerance: DETECTION.price_tolerance,
            strength_threshold: DETECTION.filter.strength_threshold,
            max_levels: DETECTION.filter.max_levels,
            window: DETECTION.pivot.window,
            touch_ceiling: DETECTION.scoring.touch_ceiling,
            half_life_days: DETECTION.scoring.half_life_days,
            touch_weight: DETECTION.scoring.touch_weight,
            recency_weight: DETECTION.scoring.recency_weight,
        }
    }
}

impl DetectionParams {
    /// Fail-fast check of every parameter. Never substitutes a default.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.lookback_days == 0 {
            return Err(ConfigurationError::new("lookback_days", "must be > 0"));
        }
        if self.min_touches == 0 {
            return Err(ConfigurationError::new("min_touches", "must be >= 1"));
        }
        if !(self.price_tolerance.is_finite()
            && self.price_tolerance > 0.0
            && self.price_tolerance < 1.0)
        {
            return Err(ConfigurationError::new(
                "price_tolerance",
                format!("must be in (0, 1), got {}", self.price_tolerance),
            ));
        }
        if !(0.0..=1.0).contains(&self.strength_threshold) {
            return Err(ConfigurationError::new(
                "strength_threshold",
                format!("must be in [0, 1], got {}", self.strength_threshold),
            ));
        }
        if self.max_levels == 0 {
            return Err(ConfigurationError::new("max_levels", "must be > 0"));
        }
        if self.window < 3 || self.window % 2 == 0 {
            return Err(ConfigurationError::new(
                "window",
                format!("must be an odd integer >= 3, got {}", self.window),
            ));
        }
        if !(self.touch_ceiling.is_finite() && self.touch_ceiling > 0.0) {
            return Err(ConfigurationError::new(
                "touch_ceiling",
                format!("must be > 0, got {}", self.touch_ceiling),
            ));
        }
        if !(self.half_life_days.is_finite() && self.half_life_days > 0.0) {
            return Err(ConfigurationError::new(
                "half_life_days",
                format!("must be > 0, got {}", self.half_life_days),
            ));
        }
        for (name, weight) in [
            ("touch_weight", self.touch_weight),
            ("recency_weight", self.recency_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigurationError::new(
                    name,
                    format!("must be in [0, 1], got {}", weight),
                ));
            }
        }
        if ((self.touch_weight + self.recency_weight) - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigurationError::new(
                "touch_weight",
                format!(
                    "touch_weight + recency_weight must equal 1.0, got {}",
                    self.touch_weight + self.recency_weight
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DetectionParams::default().validate().is_ok());
    }

    #[test]
    fn even_window_is_rejected() {
        let params = DetectionParams {
            window: 4,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.name, "window");
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let params = DetectionParams {
            price_tolerance: -0.01,
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap_err().name, "price_tolerance");
    }

    #[test]
    fn weights_must_sum_to_one() {
        let params = DetectionParams {
            touch_weight: 0.7,
            recency_weight: 0.7,
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap_err().name, "touch_weight");
    }

    #[test]
    fn zero_thresholds_are_rejected() {
        let zero_touches = DetectionParams {
            min_touches: 0,
            ..Default::default()
        };
        assert_eq!(zero_touches.validate().unwrap_err().name, "min_touches");

        let zero_levels = DetectionParams {
            max_levels: 0,
            ..Default::default()
        };
        assert_eq!(zero_levels.validate().unwrap_err().name, "max_levels");

        let high_threshold = DetectionParams {
            strength_threshold: 1.5,
            ..Default::default()
        };
        assert_eq!(
            high_threshold.validate().unwrap_err().name,
            "strength_threshold"
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: DetectionParams =
            serde_json::from_str(r#"{ "min_touches": 3, "window": 7 }"#).unwrap();
        assert_eq!(params.min_touches, 3);
        assert_eq!(params.window, 7);
        assert_eq!(params.lookback_days, DETECTION.lookback_days);
    }
}
