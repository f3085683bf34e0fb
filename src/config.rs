//! Configuration loading from affinity.toml.
//!
//! The whole run is described by one [`AffinityConfig`]: the dataset (entity
//! universe plus four signal sources) and the run options. It is built once
//! and passed into the pipeline; nothing is read from process-wide state.
//!
//! ## Example
//!
//! ```toml
//! entities = ["U1", "U2", "U3"]
//! top-n = 2
//! output = "combined_score.csv"
//!
//! interactions = [[0, 1, 0], [1, 0, 0], [0, 0, 0]]
//! social-adjacency = [[0, 1, 1], [1, 0, 0], [1, 0, 0]]
//!
//! [interests]
//! U1 = ["music", "coding"]
//! U2 = ["music"]
//! U3 = []
//!
//! [distances]
//! U1 = 5
//! U2 = 3
//! U3 = 12
//!
//! [weights]
//! content = 0.45
//! collaborative = 0.25
//! social = 0.20
//! distance = 0.10
//! ```
//!
//! Any key left out falls back to the built-in demo value.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::combine::Weights;
use crate::error::{AffinityError, Result};
use crate::ranking::DEFAULT_TOP_N;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "affinity.toml";

/// Where the combined matrix is exported by default.
pub const DEFAULT_OUTPUT: &str = "combined_score.csv";

/// Raw signal data for one population, before validation.
///
/// Matrices are indexed by the position of each id in `entities`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub entities: Vec<String>,
    pub interests: BTreeMap<String, BTreeSet<String>>,
    pub distances: BTreeMap<String, f64>,
    pub interactions: Vec<Vec<u8>>,
    pub social_adjacency: Vec<Vec<u8>>,
}

impl Dataset {
    /// Five-member demo population.
    pub fn demo() -> Self {
        let entities: Vec<String> = ["U1", "U2", "U3", "U4", "U5"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let interests = [
            ("U1", &["music", "movies", "hiking", "coding"][..]),
            ("U2", &["music", "cooking", "travel", "coding"][..]),
            ("U3", &["anime", "gaming", "coding"][..]),
            ("U4", &["movies", "travel", "coffee", "hiking"][..]),
            ("U5", &["music", "hiking", "travel", "photography"][..]),
        ]
        .into_iter()
        .map(|(id, tags)| {
            (
                id.to_string(),
                tags.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect();

        let distances = [("U1", 5.0), ("U2", 3.0), ("U3", 12.0), ("U4", 7.0), ("U5", 4.0)]
            .into_iter()
            .map(|(id, km)| (id.to_string(), km))
            .collect();

        Self {
            entities,
            interests,
            distances,
            interactions: vec![
                vec![0, 1, 0, 1, 1],
                vec![1, 0, 0, 1, 0],
                vec![0, 0, 0, 1, 0],
                vec![0, 1, 1, 0, 1],
                vec![1, 0, 0, 1, 0],
            ],
            social_adjacency: vec![
                vec![0, 1, 0, 1, 1],
                vec![1, 0, 1, 1, 0],
                vec![0, 1, 0, 0, 0],
                vec![1, 1, 0, 0, 1],
                vec![1, 0, 0, 1, 0],
            ],
        }
    }
}

/// Affinity run configuration.
#[derive(Debug, Clone)]
pub struct AffinityConfig {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,

    /// Population and its signals.
    pub dataset: Dataset,

    /// Blend weights (content, collaborative, social, distance).
    pub weights: Weights,

    /// Recommendations returned per member.
    pub top_n: usize,

    /// CSV export path.
    pub output: PathBuf,
}

impl Default for AffinityConfig {
    fn default() -> Self {
        Self {
            source: None,
            dataset: Dataset::demo(),
            weights: Weights::default(),
            top_n: DEFAULT_TOP_N,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    entities: Option<Vec<String>>,
    interests: Option<BTreeMap<String, Vec<String>>>,
    distances: Option<BTreeMap<String, f64>>,
    interactions: Option<Vec<Vec<u8>>>,
    social_adjacency: Option<Vec<Vec<u8>>>,
    weights: Option<Weights>,
    top_n: Option<usize>,
    output: Option<String>,
}

impl AffinityConfig {
    /// Load configuration from the given directory.
    ///
    /// Uses `affinity.toml` when present, the built-in defaults otherwise.
    /// A present but malformed file is an error, never silently skipped.
    pub fn load(directory: &Path) -> Result<Self> {
        let path = directory.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AffinityError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content, Some(path.to_path_buf()))
    }

    /// Parse configuration text. `source` is only kept for display.
    pub fn from_toml_str(content: &str, source: Option<PathBuf>) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| {
            let origin = source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<inline>".to_string());
            AffinityError::Config(format!("invalid TOML in {}: {}", origin, e))
        })?;
        let config = Self::from_raw(raw, source);
        config.validate()?;
        Ok(config)
    }

    fn from_raw(raw: RawConfig, source: Option<PathBuf>) -> Self {
        let demo = Dataset::demo();
        let dataset = Dataset {
            entities: raw.entities.unwrap_or(demo.entities),
            interests: raw
                .interests
                .map(|m| {
                    m.into_iter()
                        .map(|(id, tags)| (id, tags.into_iter().collect()))
                        .collect()
                })
                .unwrap_or(demo.interests),
            distances: raw.distances.unwrap_or(demo.distances),
            interactions: raw.interactions.unwrap_or(demo.interactions),
            social_adjacency: raw.social_adjacency.unwrap_or(demo.social_adjacency),
        };

        Self {
            source,
            dataset,
            weights: raw.weights.unwrap_or_default(),
            top_n: raw.top_n.unwrap_or(DEFAULT_TOP_N),
            output: raw
                .output
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        }
    }

    /// Check run options. Dataset checks belong to the signal store.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(AffinityError::Config(
                "top-n must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Format config for verbose display.
    pub fn display_summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref source) = self.source {
            lines.push(format!("   Config: {}", source.display()));
        } else {
            lines.push("   Config: (built-in demo)".to_string());
        }

        let entities = &self.dataset.entities;
        if entities.len() <= 6 {
            lines.push(format!("   Members: {}", entities.join(", ")));
        } else {
            lines.push(format!(
                "   Members: {}, ... (+{} more)",
                entities[..3].join(", "),
                entities.len() - 3
            ));
        }

        let w = &self.weights;
        lines.push(format!(
            "   Weights: content={} collaborative={} social={} distance={}",
            w.content, w.collaborative, w.social, w.distance
        ));
        lines.push(format!("   Top-N: {}", self.top_n));
        lines.push(format!("   Output: {}", self.output.display()));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_demo_dataset() {
        let config = AffinityConfig::default();
        assert_eq!(config.dataset.entities.len(), 5);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.output, PathBuf::from("combined_score.csv"));
        assert_eq!(config.weights, Weights::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let text = r#"
            entities = ["a", "b"]
            top-n = 1
            output = "out.csv"
            interactions = [[0, 1], [1, 0]]
            social-adjacency = [[0, 0], [0, 0]]

            [interests]
            a = ["x", "y"]
            b = ["y"]

            [distances]
            a = 1
            b = 2.5

            [weights]
            content = 0.5
            collaborative = 0.5
            social = 0.0
            distance = 0.0
        "#;
        let config = AffinityConfig::from_toml_str(text, None).unwrap();
        assert_eq!(config.dataset.entities, vec!["a", "b"]);
        assert_eq!(config.dataset.distances["a"], 1.0);
        assert_eq!(config.dataset.distances["b"], 2.5);
        assert!(config.dataset.interests["a"].contains("x"));
        assert_eq!(config.top_n, 1);
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.weights, Weights::new(0.5, 0.5, 0.0, 0.0));
    }

    #[test]
    fn test_partial_toml_keeps_demo_data() {
        let config = AffinityConfig::from_toml_str("top-n = 2", None).unwrap();
        assert_eq!(config.top_n, 2);
        assert_eq!(config.dataset, Dataset::demo());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let err = AffinityConfig::from_toml_str("top-n = 0", None).unwrap_err();
        assert!(matches!(err, AffinityError::Config(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AffinityConfig::from_toml_str("top_k = 2", None).unwrap_err();
        assert!(matches!(err, AffinityError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AffinityConfig::load(dir.path()).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.dataset, Dataset::demo());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "top-n = 4\n").unwrap();
        let config = AffinityConfig::load(dir.path()).unwrap();
        assert_eq!(config.top_n, 4);
        assert!(config.source.is_some());
    }
}
