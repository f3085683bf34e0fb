//! The scorer contract and the parallel scoring pass.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::store::SignalStore;
use crate::types::{ScoreMatrix, SignalKind};

/// Trait for pluggable similarity scorers.
///
/// A scorer turns one signal source into a full pairwise matrix over the
/// store's canonical order. Contract:
/// - off-diagonal cells lie in [0, 1]
/// - diagonal cells are 0.0 and carry no meaning
/// - degenerate inputs (empty sets, zero vectors, zero maxima) score 0.0,
///   they never fail
pub trait SimilarityScorer: Send + Sync {
    /// Which signal this scorer reads
    fn kind(&self) -> SignalKind;

    /// Score every pair in the store
    fn score_matrix(&self, store: &SignalStore) -> ScoreMatrix;
}

/// The four built-in scorers, one per signal.
pub fn default_scorers() -> Vec<Box<dyn SimilarityScorer>> {
    vec![
        Box::new(super::ContentScorer),
        Box::new(super::CollaborativeScorer),
        Box::new(super::SocialScorer),
        Box::new(super::DistanceScorer),
    ]
}

/// Raw per-signal matrices, keyed by signal.
#[derive(Debug, Clone, Default)]
pub struct SignalMatrices {
    matrices: BTreeMap<SignalKind, ScoreMatrix>,
}

impl SignalMatrices {
    pub fn get(&self, kind: SignalKind) -> Option<&ScoreMatrix> {
        self.matrices.get(&kind)
    }

    pub fn insert(&mut self, kind: SignalKind, matrix: ScoreMatrix) {
        self.matrices.insert(kind, matrix);
    }

    pub fn kinds(&self) -> impl Iterator<Item = SignalKind> + '_ {
        self.matrices.keys().copied()
    }
}

impl FromIterator<(SignalKind, ScoreMatrix)> for SignalMatrices {
    fn from_iter<I: IntoIterator<Item = (SignalKind, ScoreMatrix)>>(iter: I) -> Self {
        Self {
            matrices: iter.into_iter().collect(),
        }
    }
}

/// Run every scorer over the store.
///
/// Scorers are independent pure functions over immutable data, so they run
/// concurrently; the collect is the single join point before combination.
pub fn score_all(store: &SignalStore, scorers: &[Box<dyn SimilarityScorer>]) -> SignalMatrices {
    scorers
        .par_iter()
        .map(|scorer| {
            let matrix = scorer.score_matrix(store);
            debug!(signal = %scorer.kind(), dim = matrix.dim(), "scored");
            (scorer.kind(), matrix)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}
