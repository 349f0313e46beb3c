//! Ingredient-aware recipe recommendation engine.
//!
//! Given the ingredients a user has on hand, a time budget, and ingredient
//! likes/dislikes, this crate ranks recipes from a repository collaborator
//! and explains each match. Free-text ingredient names are normalized into
//! canonical tokens, vectorized with TF-IDF over the corpus of all recipe
//! ingredients, and matched fuzzily by cosine similarity; match quality is
//! combined with time fit, preference fit, and a dominant exclusion penalty
//! into one total score per recipe.
//!
//! The HTTP layer, storage, and scraping that surround this engine are
//! external: storage plugs in through [`RecipeRepository`], and the results
//! serialize for whatever transport sits on top.

pub mod config;
pub mod error;
pub mod recipe;
pub mod recommend;
pub mod repository;
pub mod scoring;
pub mod similarity;
pub mod tracing;

pub use config::RecommenderConfig;
pub use error::{RepositoryError, Result};
pub use recipe::{Ingredient, Recipe, UserPreferences};
pub use recommend::{Recommender, ScoredRecommendation};
pub use repository::{InMemoryRepository, RecipeRepository};
pub use scoring::{RecipeScores, ScoreWeights};
pub use similarity::{IngredientIndex, IngredientNormalizer};
