use std::cmp::Ordering;

use crate::config::DetectionParams;
use crate::models::{LevelSide, ScoredLevel};

use super::touch_scoring::ScoredCandidate;

/// Which side of `current_price` a level sits on.
/// A level exactly at the current price is support.
pub fn classify_side(level_price: f64, current_price: f64) -> LevelSide {
    if level_price > current_price {
        LevelSide::Resistance
    } else {
        LevelSide::Support
    }
}

/// Signed distance in percent of the current price
pub fn distance_pct(level_price: f64, current_price: f64) -> f64 {
    (level_price - current_price) / current_price * 100.0
}

/// Labels, filters, sorts and caps scored candidates.
///
/// - drops levels with fewer than `min_touches` touches or strength below `strength_threshold`
/// - support sorted descending by price, resistance ascending (nearest first on both sides)
/// - at most `max_levels` per side
///
/// Returns `(support, resistance)`. Pure function of its inputs.
pub fn classify_levels(
    candidates: &[ScoredCandidate],
    current_price: f64,
    params: &DetectionParams,
) -> (Vec<ScoredLevel>, Vec<ScoredLevel>) {
    let (mut support, mut resistance): (Vec<ScoredLevel>, Vec<ScoredLevel>) = candidates
        .iter()
        .filter(|c| c.level.touch_count >= params.min_touches)
        .filter(|c| c.strength >= params.strength_threshold)
        .map(|c| ScoredLevel {
            price: c.level.price,
            touch_count: c.level.touch_count,
            strength: c.strength,
            first_touch: c.first_touch,
            last_touch: c.last_touch,
            side: classify_side(c.level.price, current_price),
            distance_pct: distance_pct(c.level.price, current_price),
        })
        .partition(|level| level.side == LevelSide::Support);

    support.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
    resistance.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));

    support.truncate(params.max_levels);
    resistance.truncate(params.max_levels);

    (support, resistance)
}
