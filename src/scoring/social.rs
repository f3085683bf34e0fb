//! Social similarity: mutual connections in the adjacency graph.
//!
//! Counts are normalized by the largest mutual count anywhere in the matrix,
//! not per row, so a 0.5 means the same thing for every pair in the
//! population.

use tracing::debug;

use super::SimilarityScorer;
use crate::store::SignalStore;
use crate::types::{ScoreMatrix, SignalKind};

/// Mutual-connection count, globally max-normalized.
pub struct SocialScorer;

impl SimilarityScorer for SocialScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Social
    }

    fn score_matrix(&self, store: &SignalStore) -> ScoreMatrix {
        let mut counts = ScoreMatrix::pairwise(store.len(), |u, v| {
            mutual_connections(store.adjacency_row(u), store.adjacency_row(v)) as f64
        });

        // No shared neighbours anywhere: divide by 1 and keep the zeros
        let max_mutual = counts
            .max_off_diagonal()
            .filter(|&max| max > 0.0)
            .unwrap_or(1.0);
        debug!(max_mutual, "social normalization");

        counts.scale(1.0 / max_mutual);
        counts
    }
}

/// Size of the intersection of two adjacency rows (AND, summed).
pub fn mutual_connections(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|&(&x, &y)| x & y == 1).count()
}
