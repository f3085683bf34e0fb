//! Linear blend of per-signal matrices into one combined matrix.
//!
//! ```text
//! combined(u, v) = Σ weight[signal] × score[signal](u, v)     for u ≠ v
//! combined(u, u) = SELF_SCORE_SENTINEL
//! ```
//!
//! The diagonal is overwritten after summation, whatever the scorers put
//! there, so no member can be recommended to itself.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use super::Weights;
use crate::error::{AffinityError, Result};
use crate::scoring::SignalMatrices;
use crate::types::{EntityId, ScoreMatrix, SignalKind, SELF_SCORE_SENTINEL};

/// Blends signal matrices with validated weights.
#[derive(Debug, Clone)]
pub struct ScoreCombiner {
    weights: Weights,
}

impl ScoreCombiner {
    /// Fails with [`AffinityError::InvalidWeight`] before anything is combined.
    pub fn new(weights: Weights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Combine one matrix per signal over the given entity order.
    ///
    /// Every signal must be present with dimension `entities.len()`.
    pub fn combine(&self, entities: &[EntityId], signals: SignalMatrices) -> Result<CombinedScores> {
        let n = entities.len();

        for kind in SignalKind::ALL {
            match signals.get(kind) {
                None => {
                    return Err(AffinityError::Schema(format!(
                        "no {} matrix to combine",
                        kind
                    )))
                }
                Some(m) if m.dim() != n => {
                    return Err(AffinityError::Schema(format!(
                        "{} matrix is {}x{}, expected {}x{}",
                        kind,
                        m.dim(),
                        m.dim(),
                        n,
                        n
                    )))
                }
                Some(_) => {}
            }
        }

        let weighted: Vec<(f64, &ScoreMatrix)> = self
            .weights
            .pairs()
            .iter()
            .filter_map(|&(kind, weight)| signals.get(kind).map(|m| (weight, m)))
            .collect();

        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|u| {
                (0..n)
                    .map(|v| {
                        if u == v {
                            SELF_SCORE_SENTINEL
                        } else {
                            weighted.iter().map(|(w, m)| w * m.get(u, v)).sum()
                        }
                    })
                    .collect()
            })
            .collect();

        let matrix = ScoreMatrix::from_rows(rows)
            .ok_or_else(|| AffinityError::Schema("combined matrix is not square".into()))?;

        debug!(entities = n, "combined signal matrices");

        Ok(CombinedScores::new(
            entities.to_vec(),
            matrix,
            signals,
            self.weights,
        ))
    }
}

/// Per-signal view of one combined score.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    /// (signal, raw score, weighted contribution) in blending order
    pub components: Vec<(SignalKind, f64, f64)>,
    /// Combined score (sum of the contributions)
    pub total: f64,
}

/// Result of a combination: the blended matrix plus what went into it.
#[derive(Debug, Clone)]
pub struct CombinedScores {
    entities: Vec<EntityId>,
    index: HashMap<EntityId, usize>,
    matrix: ScoreMatrix,
    signals: SignalMatrices,
    weights: Weights,
}

impl CombinedScores {
    fn new(
        entities: Vec<EntityId>,
        matrix: ScoreMatrix,
        signals: SignalMatrices,
        weights: Weights,
    ) -> Self {
        let index = entities
            .iter()
            .enumerate()
            .map(|(i, id)| (Arc::clone(id), i))
            .collect();
        Self {
            entities,
            index,
            matrix,
            signals,
            weights,
        }
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn matrix(&self) -> &ScoreMatrix {
        &self.matrix
    }

    pub fn signals(&self) -> &SignalMatrices {
        &self.signals
    }

    /// Combined score for a pair of ids.
    pub fn score(&self, u: &str, v: &str) -> Result<f64> {
        Ok(self.matrix.get(self.require(u)?, self.require(v)?))
    }

    /// Explain a combined score as per-signal contributions.
    pub fn breakdown(&self, u: &str, v: &str) -> Result<ScoreBreakdown> {
        let (ui, vi) = (self.require(u)?, self.require(v)?);
        let components: Vec<(SignalKind, f64, f64)> = self
            .weights
            .pairs()
            .iter()
            .map(|&(kind, weight)| {
                let raw = self.signals.get(kind).map_or(0.0, |m| m.get(ui, vi));
                (kind, raw, weight * raw)
            })
            .collect();
        let total = self.matrix.get(ui, vi);
        Ok(ScoreBreakdown { components, total })
    }

    fn require(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| AffinityError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dataset;
    use crate::scoring::{default_scorers, score_all};
    use crate::store::SignalStore;

    fn demo_scores(weights: Weights) -> CombinedScores {
        let store = SignalStore::build(&Dataset::demo()).unwrap();
        let signals = score_all(&store, &default_scorers());
        ScoreCombiner::new(weights)
            .unwrap()
            .combine(store.entities(), signals)
            .unwrap()
    }

    #[test]
    fn test_diagonal_is_sentinel() {
        let scores = demo_scores(Weights::default());
        for u in 0..scores.entities().len() {
            assert_eq!(scores.matrix().get(u, u), SELF_SCORE_SENTINEL);
        }
    }

    #[test]
    fn test_combined_is_exact_weighted_sum() {
        let weights = Weights::default();
        let scores = demo_scores(weights);
        let n = scores.entities().len();
        for u in 0..n {
            for v in (0..n).filter(|&v| v != u) {
                let expected: f64 = weights
                    .pairs()
                    .iter()
                    .map(|&(k, w)| w * scores.signals().get(k).unwrap().get(u, v))
                    .sum();
                assert!((scores.matrix().get(u, v) - expected).abs() < 1e-12);
                assert!((0.0..=1.0).contains(&scores.matrix().get(u, v)));
            }
        }
    }

    #[test]
    fn test_single_signal_weights() {
        let scores = demo_scores(Weights::new(1.0, 0.0, 0.0, 0.0));
        let content = scores.signals().get(SignalKind::Content).unwrap();
        assert_eq!(scores.matrix().get(0, 1), content.get(0, 1));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let err = ScoreCombiner::new(Weights::new(0.9, 0.9, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, AffinityError::InvalidWeight(_)));
    }

    #[test]
    fn test_missing_signal_rejected() {
        let store = SignalStore::build(&Dataset::demo()).unwrap();
        let mut signals = SignalMatrices::default();
        signals.insert(SignalKind::Content, ScoreMatrix::zeros(5));
        let err = ScoreCombiner::new(Weights::default())
            .unwrap()
            .combine(store.entities(), signals)
            .unwrap_err();
        assert!(matches!(err, AffinityError::Schema(_)));
    }

    #[test]
    fn test_breakdown_reconstructs_total() {
        let scores = demo_scores(Weights::default());
        let b = scores.breakdown("U1", "U2").unwrap();
        let sum: f64 = b.components.iter().map(|(_, _, c)| c).sum();
        assert!((sum - b.total).abs() < 1e-12);
        assert_eq!(b.components[0].0, SignalKind::Content);
        assert!((b.components[0].1 - 2.0 / 6.0).abs() < 1e-12);

        assert!(matches!(
            scores.breakdown("U1", "nobody"),
            Err(AffinityError::NotFound(_))
        ));
    }
}
