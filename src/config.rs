//! Tunable parameters for the recommendation engine.

use serde::Deserialize;

use crate::error::Result;
use crate::scoring::ScoreWeights;

/// Engine configuration with the production defaults baked in.
///
/// The three thresholds are deliberately separate knobs: the corpus lookup
/// threshold and the explanation threshold happen to share a default, and
/// the inner match threshold is stricter. Collapsing them would silently
/// change which recipes qualify versus which matches are merely reported.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Upper bound on recipes fetched from the repository, both for the
    /// corpus harvest and per-request candidate sets.
    pub fetch_limit: usize,
    /// Minimum similarity for a corpus entry to count as a fuzzy lookup hit.
    pub similarity_threshold: f32,
    /// Stricter similarity a user ingredient must reach for a recipe
    /// ingredient to count as matched.
    pub match_threshold: f32,
    /// Minimum similarity for a pairing to appear in the explanation map.
    pub explanation_threshold: f32,
    /// Result count when the caller does not specify one.
    pub default_limit: usize,
    pub weights: ScoreWeights,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            fetch_limit: 1000,
            similarity_threshold: 0.3,
            match_threshold: 0.5,
            explanation_threshold: 0.3,
            default_limit: 5,
            weights: ScoreWeights::default(),
        }
    }
}

impl RecommenderConfig {
    /// Parse a config from TOML text. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
