//! Sparse weighted term vectors and cosine similarity.

use ahash::AHasher;
use std::hash::{Hash, Hasher};

/// Term hash for fast lookup
pub(crate) type TermHash = u64;

/// Hashes a term for vocabulary lookup.
pub(crate) fn hash_term(term: &str) -> TermHash {
    let mut hasher = AHasher::default();
    term.hash(&mut hasher);
    hasher.finish()
}

/// A sparse vector over the vocabulary term space.
///
/// Entries are `(term_hash, weight)` pairs sorted by term hash so dot
/// products run as a linear merge. Weights are non-negative TF-IDF scores,
/// which keeps cosine similarity inside `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermHash, f32)>,
    magnitude: f32,
}

impl SparseVector {
    /// Build a vector from unordered `(term, weight)` pairs.
    pub(crate) fn from_weights(mut entries: Vec<(TermHash, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(term, _)| term);
        let magnitude = entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f32>()
            .sqrt();
        Self { entries, magnitude }
    }

    /// A vector with no weight anywhere; similarity against it is always 0.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude == 0.0
    }

    fn dot(&self, other: &Self) -> f32 {
        let mut sum = 0.0;
        let mut left = self.entries.iter().peekable();
        let mut right = other.entries.iter().peekable();

        while let (Some(&&(a_term, a_weight)), Some(&&(b_term, b_weight))) =
            (left.peek(), right.peek())
        {
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    left.next();
                    right.next();
                }
            }
        }
        sum
    }
}

/// Cosine similarity between two vectors, in `[0, 1]`.
///
/// Defined as 0 (not an error) when either magnitude is zero, so empty
/// normalizations and out-of-vocabulary projections compare quietly.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    (a.dot(b) / (a.magnitude * b.magnitude)).clamp(0.0, 1.0)
}
