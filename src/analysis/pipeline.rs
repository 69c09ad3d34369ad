use crate::config::{CONTRACTS, DetectionParams};
use crate::error::{InputError, LevelResult};
use crate::models::{ContractAnalysis, LevelAnalysis, PriceSeries};

#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;

use super::classifier::classify_levels;
use super::clustering::cluster_pivots;
use super::pivots::extract_pivots;
use super::statistics::compute_statistics;
use super::touch_scoring::score_levels;

/// Runs the full detection pipeline on one series.
///
/// Validation happens here and only here: parameters first, then the series, then the
/// lookback window. After that every stage is infallible and an empty result is returned as
/// two empty lists. No state survives the call, so identical inputs give identical output.
pub fn detect_levels(series: &PriceSeries, params: &DetectionParams) -> LevelResult<LevelAnalysis> {
    params.validate()?;
    series.validate(params.window)?;

    let window = series.lookback_window(params.lookback_days);
    if window.len() < params.window {
        return Err(InputError::InsufficientData {
            contract: series.contract.clone(),
            required: params.window,
            actual: window.len(),
        }
        .into());
    }
    // Non-empty: checked against params.window (>= 3) above
    let last_bar = window[window.len() - 1];

    let pivots = extract_pivots(window, params.window);
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_pivots {
        for p in &pivots {
            log::debug!(
                "{}: pivot {:?} at {} ({}) price {:.4}",
                series.contract,
                p.kind,
                p.index,
                window[p.index].date,
                p.price
            );
        }
    }

    let candidates = cluster_pivots(&pivots, params.price_tolerance);
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_clusters {
        for c in &candidates {
            log::debug!(
                "{}: cluster {:.4} with {} member(s)",
                series.contract,
                c.price,
                c.members.len()
            );
        }
    }

    let scored = score_levels(window, candidates, last_bar.date, params);
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_scoring_for_contract == series.contract {
        for s in &scored {
            log::debug!(
                "{}: level {:.4} touches {} strength {:.3} last touch {}",
                series.contract,
                s.level.price,
                s.level.touch_count,
                s.strength,
                s.last_touch
            );
        }
    }

    let (support, resistance) = classify_levels(&scored, last_bar.close, params);

    log::debug!(
        "{}: {} bars, {} pivots -> {} support / {} resistance",
        series.contract,
        window.len(),
        pivots.len(),
        support.len(),
        resistance.len()
    );

    Ok(LevelAnalysis {
        contract: series.contract.clone(),
        current_price: last_bar.close,
        current_date: last_bar.date,
        bars_analysed: window.len(),
        support,
        resistance,
    })
}

/// Level detection plus the summary statistics shown in reports.
pub fn analyze_contract(
    series: &PriceSeries,
    params: &DetectionParams,
) -> LevelResult<ContractAnalysis> {
    let levels = detect_levels(series, params)?;
    let window = series.lookback_window(params.lookback_days);
    let statistics = compute_statistics(&levels, window, &CONTRACTS.specs);
    Ok(ContractAnalysis { levels, statistics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use crate::error::LevelError;
    use crate::models::price_bounds;
    use chrono::{Duration, NaiveDate};

    fn series_from_closes(closes: &[f64], spread: f64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                PricePoint::new(
                    start + Duration::days(i as i64),
                    c,
                    c + spread,
                    c - spread,
                    c,
                    1_000 + i as u64,
                )
            })
            .collect();
        PriceSeries::new("TEST", points)
    }

    /// 110 -> 100 -> 110 -> 100 -> 108: a double bottom at 100
    fn double_bottom() -> PriceSeries {
        let mut closes = Vec::new();
        for leg in [(110.0, 100.0), (100.0, 110.0), (110.0, 100.0), (100.0, 108.0)] {
            let (from, to): (f64, f64) = leg;
            let steps = 10;
            for s in 0..steps {
                closes.push(from + (to - from) * s as f64 / steps as f64);
            }
        }
        closes.push(108.0);
        series_from_closes(&closes, 0.2)
    }

    fn params() -> DetectionParams {
        DetectionParams {
            lookback_days: 365,
            min_touches: 2,
            price_tolerance: 0.01,
            strength_threshold: 0.0,
            max_levels: 5,
            window: 5,
            ..Default::default()
        }
    }

    #[test]
    fn empty_series_is_an_input_error() {
        let series = PriceSeries::new("EMPTY", Vec::new());
        let result = detect_levels(&series, &params());
        assert!(matches!(
            result,
            Err(LevelError::Input(InputError::EmptySeries { .. }))
        ));
    }

    #[test]
    fn invalid_parameters_fail_before_input_is_inspected() {
        let series = PriceSeries::new("EMPTY", Vec::new());
        let bad = DetectionParams {
            window: 6,
            ..params()
        };
        assert!(matches!(
            detect_levels(&series, &bad),
            Err(LevelError::Configuration(_))
        ));
    }

    #[test]
    fn lookback_shorter_than_window_is_an_input_error() {
        let series = series_from_closes(&[100.0; 30], 0.5);
        let short = DetectionParams {
            lookback_days: 2,
            ..params()
        };
        assert!(matches!(
            detect_levels(&series, &short),
            Err(LevelError::Input(InputError::InsufficientData { actual: 2, .. }))
        ));
    }

    #[test]
    fn huge_lookback_analyses_the_whole_series() {
        let series = double_bottom();
        let long = DetectionParams {
            lookback_days: 200_000_000,
            ..params()
        };
        assert!(long.validate().is_ok());
        let analysis = detect_levels(&series, &long).unwrap();
        assert_eq!(analysis.bars_analysed, series.len());
        assert_eq!(analysis, detect_levels(&series, &params()).unwrap());
    }

    #[test]
    fn double_bottom_is_reported_as_support() {
        let analysis = detect_levels(&double_bottom(), &params()).unwrap();
        assert_eq!(analysis.current_price, 108.0);
        let level = analysis
            .support
            .iter()
            .find(|l| (l.price - 99.8).abs() < 0.5)
            .expect("double-bottom level missing");
        assert!(level.touch_count >= 2);
        assert!(level.distance_pct < 0.0);
    }

    #[test]
    fn flat_noise_collapses_into_one_level_near_100() {
        // Closes alternate 99.9 / 100.1 with small wiggles; every bar stays inside 100 +/- 1.
        let closes: Vec<f64> = (0..30)
            .map(|i| {
                let base = if i % 2 == 0 { 99.9 } else { 100.1 };
                base + (i % 5) as f64 * 0.01
            })
            .collect();
        let series = series_from_closes(&closes, 0.2);
        let p = DetectionParams {
            min_touches: 1,
            ..params()
        };

        let window = series.lookback_window(p.lookback_days);
        let pivots = extract_pivots(window, p.window);
        assert!(!pivots.is_empty());

        let analysis = detect_levels(&series, &p).unwrap();
        let all: Vec<_> = analysis
            .support
            .iter()
            .chain(analysis.resistance.iter())
            .collect();
        assert_eq!(all.len(), 1);
        assert!((all[0].price - 100.0).abs() < 1.0);
        assert!(all[0].touch_count >= pivots.len());
    }

    #[test]
    fn levels_stay_within_observed_price_range() {
        let series = double_bottom();
        let analysis = detect_levels(&series, &params()).unwrap();
        let (lo, hi) = price_bounds(&series.points).unwrap();
        for level in analysis.support.iter().chain(analysis.resistance.iter()) {
            assert!(level.price >= lo && level.price <= hi);
            assert!(level.touch_count >= params().min_touches);
        }
    }

    #[test]
    fn identical_runs_serialize_identically() {
        let series = double_bottom();
        let first = detect_levels(&series, &params()).unwrap();
        let second = detect_levels(&series, &params()).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn uptrend_has_no_levels_but_is_not_an_error() {
        let closes: Vec<f64> = (0..40).map(|i| 95.0 + i as f64 * 0.05).collect();
        let analysis = detect_levels(&series_from_closes(&closes, 0.01), &params()).unwrap();
        assert!(analysis.is_empty());
    }

    #[test]
    fn analyze_contract_attaches_statistics() {
        let analysis = analyze_contract(&double_bottom(), &params()).unwrap();
        assert_eq!(
            analysis.statistics.total_support_levels,
            analysis.levels.support.len()
        );
        assert!(analysis.statistics.atr.is_some());
        assert_eq!(analysis.contract(), "TEST");
    }
}
