use std::cmp::Ordering;

use crate::models::{CandidateLevel, Pivot};

/// Groups pivots into candidate levels with a single greedy sweep over price.
///
/// 1. Sorts pivots by price, ties broken by chronological index.
/// 2. Opens a new cluster whenever the next price sits more than `tolerance` (fractional)
///    above the current cluster's running centroid.
/// 3. Otherwise merges the pivot and recomputes the centroid as the running mean.
///
/// Clusters come out in ascending centroid order and are never split afterwards.
pub fn cluster_pivots(pivots: &[Pivot], tolerance: f64) -> Vec<CandidateLevel> {
    if pivots.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<Pivot> = pivots.to_vec();
    sorted.sort_by(|a, b| {
        a.price
            .partial_cmp(&b.price)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });

    let mut clusters: Vec<CandidateLevel> = Vec::new();
    let mut current = CandidateLevel::from_pivot(sorted[0]);

    for &pivot in sorted.iter().skip(1) {
        if exceeds_tolerance(pivot.price, current.price, tolerance) {
            // Gap found - finalize current cluster and start a new one
            clusters.push(current);
            current = CandidateLevel::from_pivot(pivot);
        } else {
            current.absorb(pivot);
        }
    }

    // Finalize the last cluster
    clusters.push(current);

    clusters
}

/// `(price - centroid) / centroid > tolerance`
#[inline]
fn exceeds_tolerance(price: f64, centroid: f64, tolerance: f64) -> bool {
    (price - centroid) / centroid > tolerance
}
