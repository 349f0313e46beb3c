//! Ingredient similarity: text normalization, TF-IDF vectorization, and
//! fuzzy matching against a fixed corpus.

pub(crate) mod index;
pub(crate) mod normalize;
pub(crate) mod vector;

pub use index::{IndexedIngredient, IngredientIndex, ScoredMatch};
pub use normalize::IngredientNormalizer;
pub use vector::{SparseVector, cosine_similarity};
