//! Score combination - weighted blend of the per-signal matrices.
//!
//! Default weights: content 0.45, collaborative 0.25, social 0.20,
//! distance 0.10.

mod combiner;
mod weights;

pub use combiner::{CombinedScores, ScoreBreakdown, ScoreCombiner};
pub use weights::{Weights, WEIGHT_SUM_TOLERANCE};
