use crate::domain::PricePoint;
use crate::models::{Pivot, PivotKind};

/// Is bar `i` the strict maximum high of `[i - half, i + half]`?
/// Bars closer than `half` to either end cannot be evaluated and return false.
pub fn is_swing_high(points: &[PricePoint], i: usize, half: usize) -> bool {
    if i < half || i + half >= points.len() {
        return false;
    }
    let hi = points[i].high;
    points[i - half..i].iter().all(|p| p.high < hi)
        && points[i + 1..=i + half].iter().all(|p| p.high < hi)
}

/// Is bar `i` the strict minimum low of `[i - half, i + half]`?
pub fn is_swing_low(points: &[PricePoint], i: usize, half: usize) -> bool {
    if i < half || i + half >= points.len() {
        return false;
    }
    let lo = points[i].low;
    points[i - half..i].iter().all(|p| p.low > lo)
        && points[i + 1..=i + half].iter().all(|p| p.low > lo)
}

/// Extracts swing highs and lows over a centred window of `window` bars (odd, >= 3).
///
/// Output is chronological; a bar that is both a swing high and a swing low (an outside bar)
/// yields the high first. Flat or too-short input yields no pivots.
pub fn extract_pivots(points: &[PricePoint], window: usize) -> Vec<Pivot> {
    let half = window / 2;
    if half == 0 || points.len() < window {
        return Vec::new();
    }

    let mut pivots = Vec::new();
    for i in half..points.len() - half {
        if is_swing_high(points, i, half) {
            pivots.push(Pivot {
                index: i,
                price: points[i].high,
                kind: PivotKind::High,
            });
        }
        if is_swing_low(points, i, half) {
            pivots.push(Pivot {
                index: i,
                price: points[i].low,
                kind: PivotKind::Low,
            });
        }
    }
    pivots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    /// Bars with the given (high, low) pairs; open/close at the midpoint.
    fn bars(ranges: &[(f64, f64)]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        ranges
            .iter()
            .enumerate()
            .map(|(i, &(high, low))| {
                let mid = (high + low) / 2.0;
                PricePoint::new(start + Duration::days(i as i64), mid, high, low, mid, 100)
            })
            .collect()
    }

    #[test]
    fn finds_single_peak_and_trough() {
        let points = bars(&[
            (10.0, 9.0),
            (11.0, 10.0),
            (12.0, 11.0),
            (11.0, 10.0),
            (10.0, 9.0),
            (9.0, 8.0),
            (10.0, 9.0),
            (11.0, 10.0),
        ]);
        let pivots = extract_pivots(&points, 5);
        assert_eq!(
            pivots,
            vec![
                Pivot {
                    index: 2,
                    price: 12.0,
                    kind: PivotKind::High
                },
                Pivot {
                    index: 5,
                    price: 8.0,
                    kind: PivotKind::Low
                },
            ]
        );
    }

    #[test]
    fn equal_neighbours_are_not_strict_extrema() {
        let points = bars(&[(10.0, 9.0), (12.0, 11.0), (12.0, 11.0), (10.0, 9.0), (9.0, 8.0)]);
        assert!(!is_swing_high(&points, 1, 1));
        assert!(!is_swing_high(&points, 2, 1));
    }

    #[test]
    fn boundary_bars_are_skipped() {
        // The global high sits on the first bar: it cannot be evaluated.
        let points = bars(&[(20.0, 19.0), (11.0, 10.0), (12.0, 11.0), (11.0, 10.0), (10.0, 9.0)]);
        let pivots = extract_pivots(&points, 3);
        assert!(pivots.iter().all(|p| p.index >= 1 && p.index <= 3));
        assert!(!pivots.iter().any(|p| p.price == 20.0));
    }

    #[test]
    fn flat_series_yields_no_pivots() {
        let points = bars(&[(10.0, 9.0); 30]);
        assert!(extract_pivots(&points, 5).is_empty());
    }

    #[test]
    fn monotonic_uptrend_has_no_interior_pivots() {
        let ranges: Vec<(f64, f64)> = (0..40)
            .map(|i| (100.0 + i as f64 * 0.1, 99.5 + i as f64 * 0.1))
            .collect();
        let pivots = extract_pivots(&bars(&ranges), 5);
        assert!(pivots.is_empty());
    }

    #[test]
    fn outside_bar_emits_high_then_low() {
        let points = bars(&[(10.0, 9.0), (10.5, 9.5), (12.0, 7.0), (10.5, 9.5), (10.0, 9.0)]);
        let pivots = extract_pivots(&points, 3);
        let at_two: Vec<PivotKind> = pivots
            .iter()
            .filter(|p| p.index == 2)
            .map(|p| p.kind)
            .collect();
        assert_eq!(at_two, vec![PivotKind::High, PivotKind::Low]);
    }

    #[test]
    fn series_shorter_than_window_yields_nothing() {
        let points = bars(&[(10.0, 9.0), (12.0, 11.0), (10.0, 9.0)]);
        assert!(extract_pivots(&points, 5).is_empty());
    }
}
