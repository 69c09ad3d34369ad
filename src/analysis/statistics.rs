use crate::config::{ContractSpecs, REPORT};
use crate::domain::PricePoint;
use crate::models::{LevelAnalysis, LevelStatistics};
use crate::utils::maths_utils::average_true_range;

/// Summary figures for one analysis.
///
/// `points` should be the same lookback window the levels were detected on; ATR is taken from
/// its tail and is `None` when the window is too short.
pub fn compute_statistics(
    analysis: &LevelAnalysis,
    points: &[PricePoint],
    specs: &ContractSpecs,
) -> LevelStatistics {
    let current = analysis.current_price;
    let nearest_support = analysis.nearest_support().map(|l| l.price);
    let nearest_resistance = analysis.nearest_resistance().map(|l| l.price);

    let support_distance = nearest_support.map(|s| current - s);
    let resistance_distance = nearest_resistance.map(|r| r - current);

    let trading_range = match (nearest_support, nearest_resistance) {
        (Some(s), Some(r)) => Some(r - s),
        _ => None,
    };
    let position_in_range = match (nearest_support, trading_range) {
        (Some(s), Some(range)) if range > 0.0 => Some(((current - s) / range).clamp(0.0, 1.0)),
        _ => None,
    };

    LevelStatistics {
        nearest_support,
        nearest_resistance,
        support_distance,
        resistance_distance,
        support_distance_pct: support_distance.map(|d| d / current * 100.0),
        resistance_distance_pct: resistance_distance.map(|d| d / current * 100.0),
        support_move_value: support_distance.map(|d| specs.move_value(d)),
        resistance_move_value: resistance_distance.map(|d| specs.move_value(d)),
        trading_range,
        position_in_range,
        total_support_levels: analysis.support.len(),
        total_resistance_levels: analysis.resistance.len(),
        atr: average_true_range(points, REPORT.atr_period),
        implied_rate: specs.implied_rate(current),
    }
}
