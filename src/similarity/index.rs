//! TF-IDF vector index over an ingredient corpus.

use ahash::{AHashMap, AHashSet};
use std::time::Instant;

use super::normalize::IngredientNormalizer;
use super::vector::{SparseVector, TermHash, cosine_similarity, hash_term};

/// One corpus entry: the raw name as seen in recipes, its normalized form,
/// and its weighted term vector.
#[derive(Debug, Clone)]
pub struct IndexedIngredient {
    pub raw: String,
    pub normalized: String,
    pub(crate) vector: SparseVector,
}

/// A corpus ingredient scored against a query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredMatch<'a> {
    /// Position of the matched entry in original corpus order.
    pub index: usize,
    pub ingredient: &'a IndexedIngredient,
    pub score: f32,
}

/// A weighted term-vector index over a fixed ingredient corpus.
///
/// Vocabulary (unigrams and adjacent bigrams) and idf weights are fixed at
/// build time; there is no incremental update. Lookups compare the query
/// against every entry, which is fine for corpora in the low thousands.
/// The index is immutable after build and safe to share across readers.
pub struct IngredientIndex {
    normalizer: IngredientNormalizer,
    /// Term hash → inverse document frequency. A term present in every
    /// document gets idf 0 and stops discriminating; a term unique to one
    /// document gets the maximal ln(docs).
    vocabulary: AHashMap<TermHash, f32>,
    entries: Vec<IndexedIngredient>,
}

impl IngredientIndex {
    /// Build the index from raw ingredient names.
    ///
    /// Duplicate raw names are collapsed to their first occurrence; the
    /// surviving order is the corpus order used for tie-breaking in
    /// [`find_similar`](Self::find_similar). An empty corpus builds an empty
    /// vocabulary, and every later projection is a zero vector.
    pub fn build<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = Instant::now();
        let normalizer = IngredientNormalizer::new();

        let mut seen = AHashSet::new();
        let mut documents: Vec<(String, Vec<String>)> = Vec::new();
        for raw in corpus {
            let raw = raw.into();
            if seen.insert(raw.clone()) {
                let tokens = normalizer.tokens(&raw);
                documents.push((raw, tokens));
            }
        }

        // Document frequency per term, counting each document once.
        let mut document_frequency: AHashMap<TermHash, usize> = AHashMap::new();
        for (_, tokens) in &documents {
            let distinct: AHashSet<TermHash> = document_terms(tokens)
                .map(|term| hash_term(&term))
                .collect();
            for term in distinct {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let total_docs = documents.len() as f32;
        let vocabulary: AHashMap<TermHash, f32> = document_frequency
            .into_iter()
            .map(|(term, df)| (term, (total_docs / df as f32).ln()))
            .collect();

        let entries: Vec<IndexedIngredient> = documents
            .into_iter()
            .map(|(raw, tokens)| {
                let vector = vectorize(&tokens, &vocabulary);
                IndexedIngredient {
                    normalized: tokens.join(" "),
                    raw,
                    vector,
                }
            })
            .collect();

        tracing::info!(
            "Built ingredient index: {} entries, {} vocabulary terms in {:?}",
            entries.len(),
            vocabulary.len(),
            start.elapsed()
        );

        Self {
            normalizer,
            vocabulary,
            entries,
        }
    }

    /// Project a raw ingredient string into the build-time vector space.
    ///
    /// Terms unseen at build time are silently dropped; a fully
    /// out-of-vocabulary string projects to the zero vector.
    pub fn project(&self, raw: &str) -> SparseVector {
        let tokens = self.normalizer.tokens(raw);
        vectorize(&tokens, &self.vocabulary)
    }

    /// Rank corpus entries by similarity to `query`.
    ///
    /// Keeps entries scoring strictly above `threshold`, sorted by score
    /// descending; the sort is stable, so ties keep corpus order.
    pub fn find_similar(&self, query: &str, threshold: f32) -> Vec<ScoredMatch<'_>> {
        let query_vector = self.project(query);
        if query_vector.is_zero() {
            return vec![];
        }

        let mut matches: Vec<ScoredMatch<'_>> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, ingredient)| {
                let score = cosine_similarity(&query_vector, &ingredient.vector);
                (score > threshold).then_some(ScoredMatch {
                    index,
                    ingredient,
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }

    pub fn entries(&self) -> &[IndexedIngredient] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unigram and adjacent-bigram terms of a normalized token sequence.
fn document_terms(tokens: &[String]) -> impl Iterator<Item = String> + '_ {
    let unigrams = tokens.iter().cloned();
    let bigrams = tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]));
    unigrams.chain(bigrams)
}

/// tf × idf weights for a token sequence against a fixed vocabulary.
fn vectorize(tokens: &[String], vocabulary: &AHashMap<TermHash, f32>) -> SparseVector {
    let mut term_counts: AHashMap<TermHash, f32> = AHashMap::new();
    for term in document_terms(tokens) {
        *term_counts.entry(hash_term(&term)).or_insert(0.0) += 1.0;
    }

    let weights: Vec<(TermHash, f32)> = term_counts
        .into_iter()
        .filter_map(|(term, tf)| {
            vocabulary
                .get(&term)
                .map(|&idf| (term, tf * idf))
                .filter(|&(_, weight)| weight > 0.0)
        })
        .collect();

    SparseVector::from_weights(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn corpus_index() -> IngredientIndex {
        IngredientIndex::build([
            "chicken breast",
            "chicken thighs",
            "garlic",
            "red onion",
            "yellow onion",
        ])
    }

    #[test]
    fn empty_corpus_never_errors() {
        let index = IngredientIndex::build(Vec::<String>::new());
        check!(index.is_empty());
        check!(index.project("chicken").is_zero());
        check!(index.find_similar("chicken", 0.3).is_empty());
    }

    #[test]
    fn exact_entry_scores_highest() {
        let index = corpus_index();
        let matches = index.find_similar("garlic", 0.3);
        check!(!matches.is_empty());
        check!(matches[0].ingredient.raw == "garlic");
        check!((matches[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn related_entries_rank_below_exact_ones() {
        let index = corpus_index();
        let matches = index.find_similar("chicken breast", 0.1);
        let ranked: Vec<&str> = matches
            .iter()
            .map(|m| m.ingredient.raw.as_str())
            .collect();
        check!(ranked[0] == "chicken breast");
        check!(ranked.contains(&"chicken thighs"));
        // Unrelated entries never cross the threshold.
        check!(!ranked.contains(&"garlic"));
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let index = corpus_index();
        // At threshold 1.0 even an exact match (score 1.0) is excluded.
        check!(index.find_similar("garlic", 1.0).is_empty());
    }

    #[test]
    fn out_of_vocabulary_projects_to_zero() {
        let index = corpus_index();
        check!(index.project("dragonfruit").is_zero());
        check!(index.find_similar("dragonfruit", 0.0).is_empty());
    }

    #[test]
    fn duplicate_raw_names_collapse_to_first_occurrence() {
        let index = IngredientIndex::build(["garlic", "onion", "garlic"]);
        check!(index.len() == 2);
        check!(index.entries()[0].raw == "garlic");
        check!(index.entries()[1].raw == "onion");
    }

    #[test]
    fn ubiquitous_terms_stop_discriminating() {
        // "chicken" appears in every document, so its idf is 0 and a
        // chicken-only query has nothing to project onto.
        let index = IngredientIndex::build(["chicken breast", "chicken thigh", "chicken wing"]);
        check!(index.project("chicken").is_zero());
        check!(index.find_similar("chicken", 0.0).is_empty());
    }

    #[test]
    fn tied_scores_keep_corpus_order() {
        // Two raw spellings normalize to the same vector and score
        // identically; the earlier corpus entry must come first.
        let index = IngredientIndex::build(["Red Onion", "red onion", "garlic"]);
        let matches = index.find_similar("onion", 0.1);
        check!(matches.len() == 2);
        check!(matches[0].score == matches[1].score);
        check!(matches[0].ingredient.raw == "Red Onion");
        check!(matches[1].ingredient.raw == "red onion");
    }

    #[test]
    fn normalization_applies_before_matching() {
        let index = corpus_index();
        let matches = index.find_similar("2 cups chopped garlic (fresh)", 0.3);
        check!(!matches.is_empty());
        check!(matches[0].ingredient.raw == "garlic");
    }
}
