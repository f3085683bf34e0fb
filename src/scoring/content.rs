//! Content similarity: overlap of declared interests.

use std::collections::BTreeSet;

use super::SimilarityScorer;
use crate::store::SignalStore;
use crate::types::{ScoreMatrix, SignalKind};

/// Jaccard similarity of interest sets.
pub struct ContentScorer;

impl SimilarityScorer for ContentScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Content
    }

    fn score_matrix(&self, store: &SignalStore) -> ScoreMatrix {
        ScoreMatrix::pairwise(store.len(), |u, v| {
            jaccard(store.interests(u), store.interests(v))
        })
    }
}

/// |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
