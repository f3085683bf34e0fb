//! Top-N recommendations from the combined matrix.
//!
//! Each member's row is sorted by score descending. Equal scores are ordered
//! by ascending candidate id so the same input always produces the same list.
//! The member itself is dropped from its own row before sorting; the diagonal
//! sentinel keeps it last even if it were not.

use crate::combine::CombinedScores;
use crate::error::{AffinityError, Result};
use crate::types::{EntityId, Recommendation};

/// Recommendations per member when nothing else is configured.
pub const DEFAULT_TOP_N: usize = 3;

/// Ranks candidates for members of a combined score matrix.
pub struct RecommendationRanker<'a> {
    scores: &'a CombinedScores,
}

impl<'a> RecommendationRanker<'a> {
    pub fn new(scores: &'a CombinedScores) -> Self {
        Self { scores }
    }

    /// Best `top_n` candidates for `entity`, highest score first.
    ///
    /// Returns `min(top_n, |universe| - 1)` entries. Fails with
    /// [`AffinityError::NotFound`] for an id outside the universe.
    pub fn recommend(&self, entity: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        let u = self
            .scores
            .index_of(entity)
            .ok_or_else(|| AffinityError::NotFound(entity.to_string()))?;

        let mut candidates: Vec<Recommendation> = self
            .scores
            .entities()
            .iter()
            .zip(self.scores.matrix().row(u))
            .enumerate()
            .filter(|&(v, _)| v != u)
            .map(|(_, (id, &score))| Recommendation::new(EntityId::clone(id), score))
            .collect();

        candidates.sort();
        candidates.truncate(top_n);
        Ok(candidates)
    }

    /// Recommendation lists for every member, in universe order.
    pub fn recommend_all(&self, top_n: usize) -> Result<Vec<(EntityId, Vec<Recommendation>)>> {
        self.scores
            .entities()
            .iter()
            .map(|id| Ok((EntityId::clone(id), self.recommend(id, top_n)?)))
            .collect()
    }
}
