//! Error taxonomy for the affinity pipeline.
//!
//! Every variant is fatal for the stage that raised it. Numeric degeneracies
//! (empty unions, zero-norm rows, zero maxima) are not errors: scorers absorb
//! them as a 0.0 score.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, combining, ranking or exporting scores.
#[derive(Debug, Error)]
pub enum AffinityError {
    /// Signal sources disagree on the entity universe, or carry malformed data.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Blend weights are negative, non-finite, or do not sum to 1.0.
    #[error("Invalid weights: {0}")]
    InvalidWeight(String),

    /// Ranking requested for an id outside the universe.
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Exported score file could not be parsed.
    #[error("Parse error in {path} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AffinityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_stage() {
        let err = AffinityError::Schema("interests missing U3".into());
        assert_eq!(err.to_string(), "Schema error: interests missing U3");

        let err = AffinityError::NotFound("U42".into());
        assert_eq!(err.to_string(), "Entity not found: U42");

        let err = AffinityError::Parse {
            path: PathBuf::from("combined_score.csv"),
            line: 3,
            message: "expected 6 cells".into(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error in combined_score.csv line 3: expected 6 cells"
        );
    }
}
