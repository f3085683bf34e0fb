//! Collaborative similarity: who interacted with the same members.

use super::SimilarityScorer;
use crate::store::SignalStore;
use crate::types::{ScoreMatrix, SignalKind};

/// Cosine similarity between interaction-record rows.
///
/// Rows are binary, so the score is never negative.
pub struct CollaborativeScorer;

impl SimilarityScorer for CollaborativeScorer {
    fn kind(&self) -> SignalKind {
        SignalKind::Collaborative
    }

    fn score_matrix(&self, store: &SignalStore) -> ScoreMatrix {
        let rows: Vec<Vec<f64>> = (0..store.len())
            .map(|u| store.interaction_row(u).iter().map(|&x| f64::from(x)).collect())
            .collect();
        ScoreMatrix::pairwise(store.len(), |u, v| cosine(&rows[u], &rows[v]))
    }
}

/// a·b / (|a| |b|), or 0.0 when either vector has zero magnitude.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    let denom = norm_a * norm_b;
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dataset;

    #[test]
    fn test_cosine_basics() {
        assert!((cosine(&[1.0, 0.0, 1.0], &[1.0, 0.0, 1.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert!((cosine(&[1.0, 1.0], &[1.0, 0.0]) - 1.0 / 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_row_scores_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_demo_matrix() {
        let store = SignalStore::build(&Dataset::demo()).unwrap();
        let m = CollaborativeScorer.score_matrix(&store);

        // U2 and U5 both interacted with exactly U1 and U4
        assert!((m.get(1, 4) - 1.0).abs() < 1e-12);
        for u in 0..store.len() {
            for v in 0..store.len() {
                assert!((m.get(u, v) - m.get(v, u)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_member_without_interactions() {
        let mut dataset = Dataset::demo();
        dataset.interactions[2] = vec![0; 5];
        let store = SignalStore::build(&dataset).unwrap();
        let m = CollaborativeScorer.score_matrix(&store);
        for v in 0..5 {
            assert_eq!(m.get(2, v), 0.0);
            assert_eq!(m.get(v, 2), 0.0);
        }
    }
}
