//! Ingredient text normalization: quantities, units, and prep noise out,
//! canonical lowercase tokens in.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::sync::LazyLock;

/// Common English stop words to filter out of normalized ingredients.
/// These high-frequency words add little value to similarity matching.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "into",
    "is", "it", "its", "of", "on", "or", "that", "the", "to", "was", "will", "with",
];

/// Quantity followed by a unit word, e.g. "1/2 cup" or "250 g".
/// The number is required; a bare unit word ("measuring cup") is kept.
static UNIT_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+/?\d*\s*(?:cup|tablespoon|teaspoon|pound|ounce|oz|lb|g|kg|ml|c|tbsp|tsp)s?\b")
        .expect("unit phrase pattern is valid")
});

/// Parenthetical asides, removed including the parentheses.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

/// Preparation and serving qualifiers that describe handling, not identity.
static PREP_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:chopped|diced|minced|sliced|grated|for serving|to serve|optional|to taste)\b")
        .expect("prep phrase pattern is valid")
});

/// Normalizes raw ingredient text into canonical lowercase tokens.
///
/// Holds a reusable stemmer instance; create one per index build or request
/// rather than per string.
pub struct IngredientNormalizer {
    stemmer: Stemmer,
}

impl Default for IngredientNormalizer {
    fn default() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl IngredientNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean an ingredient line into a space-joined token string.
    ///
    /// The pipeline: lowercase, strip quantity+unit phrases, strip
    /// parentheticals, strip prep qualifiers, tokenize on non-alphanumeric
    /// boundaries, lemmatize, drop stop words. An input consisting only of
    /// stripped material normalizes to the empty string, which downstream
    /// code treats as a zero vector.
    ///
    /// Normalization is idempotent: running it on its own output is a no-op.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// The token sequence behind [`normalize`](Self::normalize), in input order.
    ///
    /// The single-pass pipeline is iterated to a fixed point: stemming can
    /// turn a token into a unit word ("pounded" → "pound") that only becomes
    /// strippable once a quantity precedes it again, so one pass over such
    /// input is not stable. Every pass only removes or shrinks tokens, so
    /// iteration terminates.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let mut tokens = self.pass(text);
        loop {
            let rejoined = tokens.join(" ");
            let next = self.pass(&rejoined);
            if next == tokens {
                return tokens;
            }
            tokens = next;
        }
    }

    /// One strip → tokenize → lemmatize → filter pass.
    fn pass(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        let text = UNIT_PHRASE.replace_all(&text, "");
        let text = PARENTHETICAL.replace_all(&text, "");
        let text = PREP_PHRASE.replace_all(&text, "");

        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(|token| self.lemmatize(token))
            // Stop words are checked after lemmatization so a token cannot
            // stem into one and survive.
            .filter(|token| !STOP_WORDS.contains(&token.as_str()))
            .collect()
    }

    /// Reduce a token to its base lexical form.
    ///
    /// Snowball stemming is applied repeatedly until it stops changing the
    /// token; a single application is not idempotent ("parsing" → "pars" →
    /// "par"), and idempotence of the whole pipeline depends on tokens being
    /// at a fixed point. Tokens the stemmer does not recognize pass through
    /// unchanged.
    fn lemmatize(&self, token: &str) -> String {
        let mut current = token.to_string();
        loop {
            let stemmed = self.stemmer.stem(&current).into_owned();
            if stemmed == current {
                return current;
            }
            current = stemmed;
        }
    }
}
