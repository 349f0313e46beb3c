//! Multi-factor recipe scoring.
//!
//! Combines ingredient-match quality, time fit, preference fit, and the
//! exclusion penalty into one weighted total. Every component has a neutral
//! value it falls back to when the corresponding preference is absent, so
//! missing inputs degrade scores instead of raising errors.

use serde::{Deserialize, Serialize};

use crate::recipe::{Recipe, UserPreferences};

/// Weights applied to the score components.
///
/// The exclusion weight multiplies an unbounded count, which is what lets a
/// single excluded ingredient drive the total negative. That hard-filtering
/// dominance is intentional and relied on by the recommendation filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub ingredient_match: f32,
    pub time: f32,
    pub preference: f32,
    pub exclusion: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ingredient_match: 0.4,
            time: 0.3,
            preference: 0.3,
            exclusion: 1.0,
        }
    }
}

/// The full score breakdown for one recipe.
///
/// All five components are always present, and the total is recomputable
/// from the other four with the weights in play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeScores {
    /// Fraction of recipe ingredients matched by the user's available
    /// ingredients, in `[0, 1]`. 0 when none were supplied.
    pub ingredient_match: f32,
    /// 1.0 when the recipe fits the time budget, linearly decaying past it;
    /// 0.0 (neutral) when either time is unknown.
    pub time_score: f32,
    /// Fraction of preferred ingredients found in the recipe. 0 when none
    /// were supplied.
    pub preference_score: f32,
    /// Count of excluded ingredients found in the recipe. Unbounded.
    pub exclusion_penalty: f32,
    pub total_score: f32,
}

/// Score a recipe against the user's preferences.
///
/// `ingredient_match` is computed upstream by the similarity matcher and
/// passed through unchanged.
pub fn score_recipe(
    recipe: &Recipe,
    preferences: &UserPreferences,
    ingredient_match: f32,
    weights: ScoreWeights,
) -> RecipeScores {
    let time_score = time_score(recipe.total_time, preferences.max_time);

    let ingredient_names: Vec<String> = recipe
        .ingredient_names()
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    let preference_score = preferences
        .preferred_ingredients
        .as_deref()
        .filter(|preferred| !preferred.is_empty())
        .map_or(0.0, |preferred| {
            let found = preferred
                .iter()
                .filter(|wanted| {
                    let wanted = wanted.to_lowercase();
                    ingredient_names.iter().any(|name| name.contains(&wanted))
                })
                .count();
            found as f32 / preferred.len() as f32
        });

    let exclusion_penalty = preferences
        .excluded_ingredients
        .as_deref()
        .map_or(0.0, |excluded| {
            excluded
                .iter()
                .filter(|unwanted| {
                    let unwanted = unwanted.to_lowercase();
                    ingredient_names.iter().any(|name| *name == unwanted)
                })
                .count() as f32
        });

    let total_score = ingredient_match * weights.ingredient_match
        + time_score * weights.time
        + preference_score * weights.preference
        - exclusion_penalty * weights.exclusion;

    RecipeScores {
        ingredient_match,
        time_score,
        preference_score,
        exclusion_penalty,
        total_score,
    }
}

/// Time fit in `[0, 1]`.
///
/// Neutral 0.0 when either side is unknown: missing time data is not
/// evidence against a recipe, and an unstated budget earns no credit.
fn time_score(total_time: Option<u32>, max_time: Option<u32>) -> f32 {
    match (total_time, max_time) {
        (Some(total), Some(max)) if total <= max => 1.0,
        (Some(total), Some(max)) => {
            let excess = (total - max) as f32;
            (1.0 - excess / max as f32).max(0.0)
        }
        _ => 0.0,
    }
}
