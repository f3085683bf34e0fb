//! Blend weights for the four signals.
//!
//! Weights are validated once, before any combination happens: each must be
//! finite and non-negative, and together they must sum to 1.0 within
//! [`WEIGHT_SUM_TOLERANCE`]. A blend of [0, 1] scores with such weights stays
//! in [0, 1], which is what makes the negative self-pair sentinel safe.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{AffinityError, Result};
use crate::types::SignalKind;

/// Allowed drift of the weight sum away from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-signal blend weights.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub content: f64,
    pub collaborative: f64,
    pub social: f64,
    pub distance: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            content: 0.45,
            collaborative: 0.25,
            social: 0.20,
            distance: 0.10,
        }
    }
}

impl Weights {
    pub fn new(content: f64, collaborative: f64, social: f64, distance: f64) -> Self {
        Self {
            content,
            collaborative,
            social,
            distance,
        }
    }

    /// Weight assigned to a signal.
    pub fn get(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Content => self.content,
            SignalKind::Collaborative => self.collaborative,
            SignalKind::Social => self.social,
            SignalKind::Distance => self.distance,
        }
    }

    /// (signal, weight) pairs in blending order.
    pub fn pairs(&self) -> [(SignalKind, f64); 4] {
        SignalKind::ALL.map(|kind| (kind, self.get(kind)))
    }

    pub fn sum(&self) -> f64 {
        self.pairs().iter().map(|(_, w)| w).sum()
    }

    /// Reject negative, non-finite, or non-unit-sum weights.
    pub fn validate(&self) -> Result<()> {
        for (kind, weight) in self.pairs() {
            if !weight.is_finite() {
                return Err(AffinityError::InvalidWeight(format!(
                    "{} weight is not a finite number ({})",
                    kind, weight
                )));
            }
            if weight < 0.0 {
                return Err(AffinityError::InvalidWeight(format!(
                    "{} weight is negative ({})",
                    kind, weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AffinityError::InvalidWeight(format!(
                "weights sum to {}, expected 1.0",
                sum
            )));
        }

        Ok(())
    }
}

/// Parse `content,collaborative,social,distance`, e.g. `0.45,0.25,0.2,0.1`.
///
/// Only the shape is checked here; range and sum checks stay in [`Weights::validate`].
impl FromStr for Weights {
    type Err = AffinityError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    AffinityError::InvalidWeight(format!("'{}' is not a number", part.trim()))
                })
            })
            .collect::<Result<_>>()?;

        match parts.as_slice() {
            &[content, collaborative, social, distance] => {
                Ok(Self::new(content, collaborative, social, distance))
            }
            _ => Err(AffinityError::InvalidWeight(format!(
                "expected 4 comma-separated weights, got {}",
                parts.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        let weights = Weights::default();
        assert!(weights.validate().is_ok());
        assert_eq!(weights.get(SignalKind::Content), 0.45);
        assert_eq!(weights.get(SignalKind::Distance), 0.10);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let weights = Weights::new(0.6, 0.5, -0.1, 0.0);
        let err = weights.validate().unwrap_err();
        assert!(matches!(err, AffinityError::InvalidWeight(_)));
        assert!(err.to_string().contains("social"));
    }

    #[test]
    fn test_rejects_bad_sum() {
        let weights = Weights::new(0.5, 0.25, 0.2, 0.1);
        assert!(matches!(
            weights.validate(),
            Err(AffinityError::InvalidWeight(_))
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let weights = Weights::new(f64::NAN, 0.5, 0.25, 0.25);
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_sum_within_tolerance() {
        // 0.1 + 0.2 style rounding must not trip validation
        let weights = Weights::new(0.1, 0.2, 0.3, 0.4);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_parse_from_str() {
        let weights: Weights = "0.4, 0.3,0.2,0.1".parse().unwrap();
        assert_eq!(weights, Weights::new(0.4, 0.3, 0.2, 0.1));

        assert!("0.5,0.5".parse::<Weights>().is_err());
        assert!("a,b,c,d".parse::<Weights>().is_err());
    }
}
