//! Similarity scoring - one pairwise matrix per signal.
//!
//! Four independent scorers, each behind the [`SimilarityScorer`] trait:
//! - **Content**: Jaccard overlap of declared interests
//! - **Collaborative**: cosine of interaction-record rows
//! - **Social**: mutual connections, normalized by the global maximum
//! - **Distance**: linear proximity decay over the global maximum distance
//!
//! New signal types plug in by implementing the trait; the combiner only sees
//! the resulting [`SignalMatrices`].

mod collaborative;
mod content;
mod distance;
mod scorer;
mod social;

pub use collaborative::{cosine, CollaborativeScorer};
pub use content::{jaccard, ContentScorer};
pub use distance::{proximity, DistanceScorer};
pub use scorer::{default_scorers, score_all, SignalMatrices, SimilarityScorer};
pub use social::{mutual_connections, SocialScorer};
