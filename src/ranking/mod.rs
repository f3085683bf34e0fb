//! Ranking - from the combined matrix to per-member recommendation lists.

mod recommender;

pub use recommender::{RecommendationRanker, DEFAULT_TOP_N};
