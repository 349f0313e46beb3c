//! Shared test fixtures for the recommendation integration tests.
//!
//! Tests build small fixed corpora through [`InMemoryRepository`], so every
//! engine under test has a deterministic index and repository state.

use pantry::error::RepositoryError;
use pantry::{Ingredient, InMemoryRepository, Recipe, RecipeRepository, Recommender};
use std::collections::BTreeMap;

/// Build a recipe with all ingredients in the "main" section.
pub fn recipe(id: i64, title: &str, names: &[&str], total_time: Option<u32>) -> Recipe {
    let mut ingredients = BTreeMap::new();
    ingredients.insert(
        "main".to_string(),
        names
            .iter()
            .map(|name| Ingredient::named(*name))
            .collect::<Vec<_>>(),
    );
    Recipe {
        id: Some(id),
        title: title.to_string(),
        url: Some(format!("https://recipes.example/{id}")),
        prep_time: None,
        cook_time: None,
        total_time,
        servings: "4".to_string(),
        ingredients,
    }
}

/// The single-recipe corpus used by the end-to-end scenarios.
pub fn chicken_dinner() -> Recipe {
    recipe(
        1,
        "Garlic Chicken",
        &["chicken breast", "garlic", "onion"],
        Some(30),
    )
}

/// An engine over the given recipes, with default configuration.
///
/// Installs the tracing subscriber first, so index-build and request
/// diagnostics are captured alongside any failing test output.
pub fn engine(recipes: Vec<Recipe>) -> Recommender<InMemoryRepository> {
    pantry::tracing::init();
    Recommender::new(InMemoryRepository::new(recipes)).expect("in-memory engine builds")
}

/// A repository whose storage is always unreachable.
#[derive(Debug, Clone, Copy)]
pub struct UnreachableRepository;

impl RecipeRepository for UnreachableRepository {
    fn fetch_recipes(&self, _limit: usize) -> Result<Vec<Recipe>, RepositoryError> {
        Err(RepositoryError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }
}
