//! Proximity similarity from per-member distances.

use super::SimilarityScorer;
use crate::store::SignalStore;
use crate::types::{ScoreMatrix, SignalKind};

/// Linear decay over the global maximum distance, floored at 0.
pub struct DistanceScorer;

impl SimilarityScorer for DistanceScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Distance
    }

    fn score_matrix(&self, store: &SignalStore) -> ScoreMatrix {
        let max_distance = store.max_distance();
        ScoreMatrix::pairwise(store.len(), |u, v| {
            proximity(store.distance(u), store.distance(v), max_distance)
        })
    }
}

/// `max(1 - |a - b| / max_distance, 0)`.
///
/// With `max_distance == 0` every distance is 0, so every pair is co-located
/// and scores 1.0.
pub fn proximity(a: f64, b: f64, max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        return 1.0;
    }
    (1.0 - (a - b).abs() / max_distance).max(0.0)
}
