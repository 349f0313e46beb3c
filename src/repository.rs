//! Repository collaborator boundary.
//!
//! The relational store, its queries, and the scraping pipeline that fills it
//! live outside this crate. The engine only consumes a bounded fetch, defined
//! here as a trait so callers can plug in whatever storage they run.

use crate::error::RepositoryError;
use crate::recipe::Recipe;

/// Source of candidate recipes.
///
/// `fetch_recipes` is called once at index-build time (to harvest the
/// ingredient corpus) and once per recommendation request (candidate set).
/// The repository owns pagination and bounding policy; the engine never
/// retries a failed fetch.
pub trait RecipeRepository {
    /// Fetch up to `limit` recipes with fully populated ingredient sections,
    /// ordered by recipe id.
    fn fetch_recipes(&self, limit: usize) -> Result<Vec<Recipe>, RepositoryError>;
}

/// A recipe repository backed by a plain vector.
///
/// Useful for tests, demos, and small fixed corpora; real deployments wrap
/// their database layer in [`RecipeRepository`] instead.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    recipes: Vec<Recipe>,
    next_id: i64,
}

impl InMemoryRepository {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let next_id = recipes
            .iter()
            .filter_map(|recipe| recipe.id)
            .max()
            .unwrap_or(0)
            + 1;
        Self { recipes, next_id }
    }

    /// Insert a recipe and return its assigned id.
    ///
    /// A recipe without a title does not round-trip through storage, so it is
    /// rejected as malformed rather than stored and lost.
    pub fn insert_recipe(&mut self, mut recipe: Recipe) -> Result<i64, RepositoryError> {
        if recipe.title.trim().is_empty() {
            return Err(RepositoryError::Malformed {
                detail: "recipe title is empty".to_string(),
            });
        }

        let id = recipe.id.unwrap_or_else(|| {
            let id = self.next_id;
            self.next_id += 1;
            id
        });
        recipe.id = Some(id);
        self.next_id = self.next_id.max(id + 1);
        self.recipes.push(recipe);
        Ok(id)
    }

    /// Look up a single recipe by id.
    pub fn recipe_by_id(&self, id: i64) -> Result<&Recipe, RepositoryError> {
        self.recipes
            .iter()
            .find(|recipe| recipe.id == Some(id))
            .ok_or(RepositoryError::NotFound { id })
    }
}

impl RecipeRepository for InMemoryRepository {
    fn fetch_recipes(&self, limit: usize) -> Result<Vec<Recipe>, RepositoryError> {
        // Order before truncating: `limit` keeps the lowest ids, not an
        // insertion-order prefix.
        let mut recipes = self.recipes.clone();
        recipes.sort_by_key(|recipe| recipe.id);
        recipes.truncate(limit);
        Ok(recipes)
    }
}
