//! Core types for affinitymap.
//!
//! Key design decisions:
//! - `Arc<str>` entity ids, cheap to clone into every recommendation
//! - One dense row-major `ScoreMatrix` shape for every signal and the blend
//! - Frozen/immutable once computed (matrices are only read after a run)

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

/// Member identifier. Shared, immutable, ordered by its string value.
pub type EntityId = Arc<str>;

/// Value written to every diagonal cell of the combined matrix.
///
/// Combined scores live in [0, 1], so anything negative can never outrank a
/// real candidate.
pub const SELF_SCORE_SENTINEL: f64 = -1.0;

/// The four signal sources blended into a combined score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
    /// Declared interests (Jaccard)
    Content,
    /// Historical interaction record (cosine)
    Collaborative,
    /// Mutual connections in the social graph
    Social,
    /// Physical proximity
    Distance,
}

impl SignalKind {
    /// Every signal, in blending order.
    pub const ALL: [SignalKind; 4] = [
        SignalKind::Content,
        SignalKind::Collaborative,
        SignalKind::Social,
        SignalKind::Distance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Content => "content",
            SignalKind::Collaborative => "collaborative",
            SignalKind::Social => "social",
            SignalKind::Distance => "distance",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dense square matrix of scores, indexed by the canonical entity ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl ScoreMatrix {
    /// All-zero `dim × dim` matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![0.0; dim * dim],
        }
    }

    /// Build from explicit rows. Returns `None` unless the rows form a square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let dim = rows.len();
        if rows.iter().any(|row| row.len() != dim) {
            return None;
        }
        Some(Self {
            dim,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Fill every off-diagonal cell with `f(u, v)`, rows in parallel.
    ///
    /// Diagonal cells stay 0.0: a raw signal never scores a pair with itself.
    pub fn pairwise<F>(dim: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let mut matrix = Self::zeros(dim);
        if dim == 0 {
            return matrix;
        }
        matrix
            .values
            .par_chunks_mut(dim)
            .enumerate()
            .for_each(|(u, row)| {
                for (v, cell) in row.iter_mut().enumerate() {
                    if u != v {
                        *cell = f(u, v);
                    }
                }
            });
        matrix
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, u: usize, v: usize) -> f64 {
        self.values[u * self.dim + v]
    }

    /// Row `u` as a slice, in universe order.
    pub fn row(&self, u: usize) -> &[f64] {
        &self.values[u * self.dim..(u + 1) * self.dim]
    }

    /// Largest off-diagonal value, or `None` for matrices smaller than 2×2.
    pub fn max_off_diagonal(&self) -> Option<f64> {
        (0..self.dim)
            .flat_map(|u| (0..self.dim).filter(move |&v| v != u).map(move |v| (u, v)))
            .map(|(u, v)| self.get(u, v))
            .reduce(f64::max)
    }

    /// Multiply every cell by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.values.par_iter_mut().for_each(|x| *x *= factor);
    }
}

/// One candidate in a member's recommendation list.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// The recommended member
    pub candidate: EntityId,
    /// Combined affinity score
    pub score: f64,
}

impl Recommendation {
    pub fn new(candidate: EntityId, score: f64) -> Self {
        Self { candidate, score }
    }
}

/// Ordering: highest score first, ties broken by ascending candidate id.
impl PartialEq for Recommendation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Recommendation {}

impl PartialOrd for Recommendation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Recommendation {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse on score - higher comes first
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.candidate.cmp(&other.candidate))
    }
}
