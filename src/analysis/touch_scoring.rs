use std::collections::HashSet;

use chrono::NaiveDate;

use crate::config::DetectionParams;
use crate::domain::PricePoint;
use crate::models::CandidateLevel;
use crate::utils::TimeUtils;
use crate::utils::maths_utils::half_life_decay;

/// Per-level scoring details, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchBreakdown {
    /// Member pivots beyond the founding one
    pub pivot_touches: usize,
    /// Later bars that re-entered the band from outside it
    pub bar_reentries: usize,
    pub first_touch_idx: usize,
    pub last_touch_idx: usize,
}

impl TouchBreakdown {
    /// Touches after the level formed
    pub fn post_founding(&self) -> usize {
        self.pivot_touches + self.bar_reentries
    }

    /// Founding touch included
    pub fn total(&self) -> usize {
        1 + self.post_founding()
    }
}

/// Counts how often price came back to `level` after it formed.
///
/// The founding touch is the level's earliest member pivot. Every other member pivot is one
/// touch. A bar after the founding bar that is not itself a member pivot counts once when its
/// [low, high] range enters the tolerance band while the previous bar's range did not.
pub fn count_touches(
    points: &[PricePoint],
    level: &CandidateLevel,
    tolerance: f64,
) -> TouchBreakdown {
    let founding_idx = level.founding.index;
    let (band_low, band_high) = level.band(tolerance);
    let member_bars: HashSet<usize> = level.members.iter().map(|p| p.index).collect();

    let pivot_touches = level.members.len() - 1;
    let mut last_touch_idx = level
        .members
        .iter()
        .map(|p| p.index)
        .max()
        .unwrap_or(founding_idx);

    let mut bar_reentries = 0;
    for idx in (founding_idx + 1)..points.len() {
        if member_bars.contains(&idx) {
            continue;
        }
        let inside = points[idx].intersects(band_low, band_high);
        let was_inside = points[idx - 1].intersects(band_low, band_high);
        if inside && !was_inside {
            bar_reentries += 1;
            last_touch_idx = last_touch_idx.max(idx);
        }
    }

    TouchBreakdown {
        pivot_touches,
        bar_reentries,
        first_touch_idx: founding_idx,
        last_touch_idx,
    }
}

/// `touch_weight * clip(touches / ceiling, 0, 1) + recency_weight * 0.5^(staleness / half_life)`,
/// clipped to [0, 1].
///
/// Non-decreasing in `post_founding_touches`, non-increasing in `staleness_days`. A level that
/// was never revisited still scores through its recency term.
pub fn strength_score(
    post_founding_touches: usize,
    staleness_days: i64,
    params: &DetectionParams,
) -> f64 {
    let touch_component =
        (post_founding_touches as f64 / params.touch_ceiling).clamp(0.0, 1.0);
    let recency_component = half_life_decay(staleness_days as f64, params.half_life_days);
    (params.touch_weight * touch_component + params.recency_weight * recency_component)
        .clamp(0.0, 1.0)
}

/// A candidate after touch counting, with its strength computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub level: CandidateLevel,
    pub strength: f64,
    pub first_touch: NaiveDate,
    pub last_touch: NaiveDate,
}

/// Fills in touch counts and dates and computes strength for every candidate.
/// `window_end` is the date of the last analysed bar.
pub fn score_levels(
    points: &[PricePoint],
    candidates: Vec<CandidateLevel>,
    window_end: NaiveDate,
    params: &DetectionParams,
) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|mut level| {
            let touches = count_touches(points, &level, params.price_tolerance);
            let first_touch = points[touches.first_touch_idx].date;
            let last_touch = points[touches.last_touch_idx].date;
            let staleness = TimeUtils::days_between(last_touch, window_end);
            let strength = strength_score(touches.post_founding(), staleness, params);

            level.touch_count = touches.total();
            level.last_touch = Some(last_touch);

            ScoredCandidate {
                level,
                strength,
                first_touch,
                last_touch,
            }
        })
        .collect()
}
