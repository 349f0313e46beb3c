//! Recipe recommendation: fetch candidates, score them, rank, and explain.

use ahash::AHashSet;
use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::recipe::{Recipe, UserPreferences};
use crate::repository::RecipeRepository;
use crate::scoring::{RecipeScores, score_recipe};
use crate::similarity::{IngredientIndex, ScoredMatch, cosine_similarity};

/// One ranked recommendation: the recipe, its score breakdown, and which
/// recipe ingredients each user ingredient matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecommendation {
    pub recipe: Recipe,
    pub scores: RecipeScores,
    /// User ingredient → recipe ingredient names it matched, best first.
    /// User ingredients with no match above threshold are omitted.
    pub matching_ingredients: BTreeMap<String, Vec<String>>,
}

/// The recommendation engine.
///
/// Owns the ingredient vector index for its lifetime. The index is built
/// once at construction from the repository's current contents and is
/// read-only afterwards; `rebuild_index` swaps in a freshly built index
/// whole. Recipes added after a build are scored with the stale index until
/// the next rebuild, which is accepted behavior.
pub struct Recommender<R> {
    repository: R,
    config: RecommenderConfig,
    index: IngredientIndex,
}

impl<R: RecipeRepository> Recommender<R> {
    /// Build a recommender with default configuration.
    ///
    /// Fails if the repository is unreachable; the corpus fetch is the one
    /// piece of I/O this engine depends on and there is no retry here.
    pub fn new(repository: R) -> Result<Self> {
        Self::with_config(repository, RecommenderConfig::default())
    }

    pub fn with_config(repository: R, config: RecommenderConfig) -> Result<Self> {
        let index = build_index(&repository, &config)?;
        Ok(Self {
            repository,
            config,
            index,
        })
    }

    /// Rebuild the ingredient index from current repository contents.
    ///
    /// The new index replaces the old one only after it is fully built, so
    /// no reader ever observes a partially built index.
    pub fn rebuild_index(&mut self) -> Result<()> {
        self.index = build_index(&self.repository, &self.config)?;
        Ok(())
    }

    pub fn index(&self) -> &IngredientIndex {
        &self.index
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend with the configured default result count.
    pub fn recommend_default(
        &self,
        preferences: &UserPreferences,
    ) -> Result<Vec<ScoredRecommendation>> {
        self.recommend(preferences, self.config.default_limit)
    }

    /// Rank repository recipes against the user's preferences.
    ///
    /// Returns at most `limit` recipes with a strictly positive total score,
    /// sorted by total score descending with ties broken by recipe id
    /// ascending. `limit == 0` yields an empty list. Deterministic for a
    /// fixed index and repository state.
    pub fn recommend(
        &self,
        preferences: &UserPreferences,
        limit: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let recipes = self
            .repository
            .fetch_recipes(self.config.fetch_limit)
            .context("fetching candidate recipes")?;
        let candidate_count = recipes.len();

        let available = preferences
            .available_ingredients
            .as_deref()
            .unwrap_or_default();

        // Corpus lookups for the user's ingredients are recipe-independent,
        // so run them once per request.
        let user_hits: Vec<Vec<ScoredMatch<'_>>> = available
            .iter()
            .map(|user| {
                self.index
                    .find_similar(user, self.config.similarity_threshold)
            })
            .collect();

        let mut kept: Vec<(usize, RecipeScores, BTreeMap<String, Vec<String>>)> = Vec::new();
        for (position, recipe) in recipes.iter().enumerate() {
            let ingredient_names = recipe.ingredient_names();
            let ingredient_match = self.ingredient_match(&user_hits, &ingredient_names);
            let scores = score_recipe(recipe, preferences, ingredient_match, self.config.weights);

            if scores.total_score > 0.0 {
                let matching = self.matching_ingredients(available, &ingredient_names);
                kept.push((position, scores, matching));
            }
        }

        kept.sort_by(|a, b| {
            b.1.total_score
                .total_cmp(&a.1.total_score)
                .then_with(|| recipes[a.0].id.cmp(&recipes[b.0].id))
        });
        kept.truncate(limit);

        tracing::debug!(
            candidates = candidate_count,
            kept = kept.len(),
            "scored recommendation request"
        );

        let mut slots: Vec<Option<Recipe>> = recipes.into_iter().map(Some).collect();
        Ok(kept
            .into_iter()
            .filter_map(|(position, scores, matching_ingredients)| {
                slots[position].take().map(|recipe| ScoredRecommendation {
                    recipe,
                    scores,
                    matching_ingredients,
                })
            })
            .collect())
    }

    /// Fraction of recipe ingredients matched by the user's ingredients.
    ///
    /// A recipe ingredient counts as matched when some user ingredient's
    /// corpus hits clear the stricter match threshold inside that recipe
    /// ingredient's own corpus neighborhood. Both sides go through the
    /// shared index rather than being compared directly; the indirection
    /// changes recall and is kept on purpose.
    fn ingredient_match(
        &self,
        user_hits: &[Vec<ScoredMatch<'_>>],
        recipe_ingredients: &[&str],
    ) -> f32 {
        if user_hits.is_empty() || recipe_ingredients.is_empty() {
            return 0.0;
        }

        let matched = recipe_ingredients
            .iter()
            .filter(|recipe_ingredient| {
                let neighborhood: AHashSet<usize> = self
                    .index
                    .find_similar(recipe_ingredient, self.config.similarity_threshold)
                    .iter()
                    .map(|hit| hit.index)
                    .collect();
                if neighborhood.is_empty() {
                    return false;
                }
                user_hits.iter().any(|hits| {
                    hits.iter().any(|hit| {
                        hit.score > self.config.match_threshold
                            && neighborhood.contains(&hit.index)
                    })
                })
            })
            .count();

        matched as f32 / recipe_ingredients.len() as f32
    }

    /// Per-user-ingredient explanation of what matched in this recipe.
    ///
    /// Lists every recipe ingredient whose similarity to the user ingredient
    /// clears the explanation threshold, best first (stable, so equal scores
    /// keep recipe order). This threshold is looser than the match threshold
    /// by design: a match can be reported without having qualified the
    /// recipe.
    fn matching_ingredients(
        &self,
        available: &[String],
        recipe_ingredients: &[&str],
    ) -> BTreeMap<String, Vec<String>> {
        let mut matches = BTreeMap::new();
        for user in available {
            let user_vector = self.index.project(user);
            if user_vector.is_zero() {
                continue;
            }

            let mut scored: Vec<(f32, &str)> = recipe_ingredients
                .iter()
                .filter_map(|name| {
                    let score = cosine_similarity(&user_vector, &self.index.project(name));
                    (score > self.config.explanation_threshold).then_some((score, *name))
                })
                .collect();
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));

            if !scored.is_empty() {
                matches.insert(
                    user.clone(),
                    scored.into_iter().map(|(_, name)| name.to_string()).collect(),
                );
            }
        }
        matches
    }
}

/// Harvest the ingredient corpus from the repository and build the index.
fn build_index<R: RecipeRepository>(
    repository: &R,
    config: &RecommenderConfig,
) -> Result<IngredientIndex> {
    let recipes = repository
        .fetch_recipes(config.fetch_limit)
        .context("fetching recipes to seed the ingredient index")?;

    let corpus: Vec<String> = recipes
        .iter()
        .flat_map(Recipe::ingredient_names)
        .map(str::to_string)
        .collect();

    Ok(IngredientIndex::build(corpus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Ingredient;
    use assert2::check;

    fn recipe(id: i64, names: &[&str]) -> Recipe {
        let mut ingredients = BTreeMap::new();
        ingredients.insert(
            "main".to_string(),
            names.iter().map(|name| Ingredient::named(*name)).collect(),
        );
        Recipe {
            id: Some(id),
            title: format!("Recipe {id}"),
            url: None,
            prep_time: None,
            cook_time: None,
            total_time: None,
            servings: "2".to_string(),
            ingredients,
        }
    }

    fn recommender(recipes: Vec<Recipe>) -> Recommender<crate::repository::InMemoryRepository> {
        Recommender::new(crate::repository::InMemoryRepository::new(recipes)).unwrap()
    }

    #[test]
    fn zero_ingredient_recipe_scores_zero_match_without_error() {
        let engine = recommender(vec![
            recipe(1, &[]),
            recipe(2, &["chicken breast", "garlic"]),
        ]);
        let preferences = UserPreferences {
            available_ingredients: Some(vec!["chicken".to_string()]),
            ..UserPreferences::default()
        };
        let results = engine.recommend(&preferences, 10).unwrap();
        // The empty recipe cannot score above zero and is filtered out.
        check!(results.iter().all(|r| r.recipe.id != Some(1)));
    }

    #[test]
    fn explanation_is_consistent_with_reported_scores() {
        let engine = recommender(vec![recipe(1, &["chicken breast", "garlic", "onion"])]);
        let preferences = UserPreferences {
            available_ingredients: Some(vec!["chicken".to_string()]),
            ..UserPreferences::default()
        };
        let results = engine.recommend(&preferences, 5).unwrap();
        check!(results.len() == 1);
        let top = &results[0];
        check!(top.scores.ingredient_match > 0.0);
        let matched = top.matching_ingredients.get("chicken").unwrap();
        check!(matched.contains(&"chicken breast".to_string()));
    }

    #[test]
    fn rebuild_index_picks_up_new_recipes() {
        let mut repository = crate::repository::InMemoryRepository::default();
        repository.insert_recipe(recipe(1, &["garlic"])).unwrap();

        let mut engine = Recommender::new(repository).unwrap();
        check!(engine.index().len() == 1);

        // The engine holds its own repository; rebuilding against unchanged
        // contents keeps the index identical in size.
        engine.rebuild_index().unwrap();
        check!(engine.index().len() == 1);
    }
}
