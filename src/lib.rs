//! affinitymap - multi-signal affinity scoring and member recommendations
//!
//! Scores every pair of members from four independent signals, blends them
//! into one combined matrix, and ranks each member's best candidates.
//!
//! # Architecture
//!
//! ```text
//! Config → SignalStore → Scorers (parallel) → ScoreCombiner → Ranker / Exporter
//!    ↓          ↓                ↓                  ↓              ↓        ↓
//!   TOML    validated      content, collab,     weighted       top-N      CSV
//!  + demo   entity order   social, distance     blend + -1     lists    matrix
//! ```
//!
//! # Guarantees
//!
//! - One canonical entity order, validated once, shared by every matrix
//! - Social and distance scores are normalized globally, not per row
//! - Self pairs carry a sentinel below any achievable score
//! - Ranking ties break by ascending entity id (deterministic output)

pub mod combine;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ranking;
pub mod rendering;
pub mod scoring;
pub mod store;
pub mod types;

// Re-export core types
pub use combine::{CombinedScores, ScoreBreakdown, ScoreCombiner, Weights};
pub use config::{AffinityConfig, Dataset};
pub use error::{AffinityError, Result};
pub use pipeline::Pipeline;
pub use ranking::RecommendationRanker;
pub use scoring::{SignalMatrices, SimilarityScorer};
pub use store::SignalStore;
pub use types::{EntityId, Recommendation, ScoreMatrix, SignalKind, SELF_SCORE_SENTINEL};
