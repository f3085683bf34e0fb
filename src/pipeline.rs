//! The single linear pass: store → scorers → combine.
//!
//! ```text
//! Dataset → SignalStore → [Content | Collaborative | Social | Distance] → ScoreCombiner
//!             validate            parallel, independent                   weighted blend
//! ```
//!
//! Weights are validated before any scoring work starts, so a bad weight
//! vector aborts as early as a bad dataset. There are no retries anywhere:
//! the first error ends the run.

use std::time::Instant;

use tracing::{debug, info};

use crate::combine::{CombinedScores, ScoreCombiner};
use crate::config::AffinityConfig;
use crate::error::Result;
use crate::scoring::{default_scorers, score_all, SimilarityScorer};
use crate::store::SignalStore;

/// Runs the scoring pipeline for one configuration.
pub struct Pipeline {
    scorers: Vec<Box<dyn SimilarityScorer>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Pipeline with the four built-in scorers.
    pub fn new() -> Self {
        Self {
            scorers: default_scorers(),
        }
    }

    /// Replace the built-in scorer of the same kind.
    pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
        self.scorers.retain(|s| s.kind() != scorer.kind());
        self.scorers.push(scorer);
        self
    }

    /// Build the store, score every signal, and blend.
    pub fn run(&self, config: &AffinityConfig) -> Result<CombinedScores> {
        let start = Instant::now();

        let store = SignalStore::build(&config.dataset)?;
        info!(entities = store.len(), "signal store ready");

        let combiner = ScoreCombiner::new(config.weights)?;

        let signals = score_all(&store, &self.scorers);
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "signals scored");

        let scores = combiner.combine(store.entities(), signals)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "combined scores ready"
        );

        Ok(scores)
    }
}

/// Run the default pipeline.
pub fn run(config: &AffinityConfig) -> Result<CombinedScores> {
    Pipeline::new().run(config)
}
