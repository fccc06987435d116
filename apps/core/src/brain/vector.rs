//! Bag-of-words term vectors and cosine similarity.
//!
//! Vectors are sparse, ephemeral, and order-independent: built per input
//! string, scored, and dropped. Tokens from a small "important" set count
//! double so domain-bearing words dominate filler.

use std::collections::{HashMap, HashSet};

use super::normalize::normalize;
use crate::knowledge::{KnowledgeBase, ScoredChunk};

/// Tokens that carry the query's intent get double weight.
const IMPORTANT_TERMS: &[&str] = &[
    "project",
    "skill",
    "experience",
    "education",
    "contact",
    "about",
    "who",
    "what",
    "how",
];

const IMPORTANT_TERM_WEIGHT: f32 = 2.0;

/// Tokens this short are noise ("a", "is", "to") and are discarded.
const MIN_TOKEN_CHARS: usize = 3;

/// Sparse mapping from normalized term to accumulated weight.
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    weights: HashMap<String, f32>,
}

impl TermVector {
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of a term, zero when absent.
    pub fn weight(&self, term: &str) -> f32 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    fn add(&mut self, term: &str, weight: f32) {
        *self.weights.entry(term.to_string()).or_insert(0.0) += weight;
    }

    /// Cosine similarity over the union of both vectors' terms.
    ///
    /// Returns exactly 0.0 when either magnitude is zero, so empty input can
    /// never divide by zero. Symmetric; in [0, 1] for non-negative weights.
    pub fn cosine(&self, other: &TermVector) -> f32 {
        let terms: HashSet<&String> = self.weights.keys().chain(other.weights.keys()).collect();

        let mut dot_product = 0.0f32;
        let mut magnitude_a = 0.0f32;
        let mut magnitude_b = 0.0f32;

        for term in terms {
            let a = self.weight(term);
            let b = other.weight(term);
            dot_product += a * b;
            magnitude_a += a * a;
            magnitude_b += b * b;
        }

        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            return 0.0;
        }

        dot_product / (magnitude_a.sqrt() * magnitude_b.sqrt())
    }
}

/// Builds term vectors from raw text.
pub struct Vectorizer {
    important: HashSet<&'static str>,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Vectorizer {
    pub fn new() -> Self {
        Self {
            important: IMPORTANT_TERMS.iter().copied().collect(),
        }
    }

    /// Normalize `text` and accumulate token weights.
    ///
    /// Duplicate tokens add up, so the synonym expansion in
    /// [`normalize`](super::normalize::normalize) boosts recall instead of
    /// replacing anything.
    pub fn vectorize(&self, text: &str) -> TermVector {
        let mut vector = TermVector::default();

        for token in normalize(text).split_whitespace() {
            if token.chars().count() < MIN_TOKEN_CHARS {
                continue;
            }
            let weight = if self.important.contains(token) {
                IMPORTANT_TERM_WEIGHT
            } else {
                1.0
            };
            vector.add(token, weight);
        }

        vector
    }

    /// Score `text` against every knowledge chunk, most similar first.
    ///
    /// Chunk vectors cover the chunk's prose plus its keyword tags. The sort
    /// is stable, so equal scores keep the knowledge base's chunk order.
    pub fn rank_chunks(&self, knowledge: &KnowledgeBase, text: &str) -> Vec<ScoredChunk> {
        let query_vector = self.vectorize(text);

        let mut scored: Vec<ScoredChunk> = knowledge
            .chunks()
            .into_iter()
            .map(|chunk| {
                let chunk_vector =
                    self.vectorize(&format!("{} {}", chunk.text, chunk.keywords.join(" ")));
                ScoredChunk {
                    similarity: query_vector.cosine(&chunk_vector),
                    chunk,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tokens_are_dropped() {
        let vectorizer = Vectorizer::new();
        let vector = vectorizer.vectorize("a to do it");
        assert!(vector.is_empty());
    }

    #[test]
    fn test_important_terms_weigh_double() {
        let vectorizer = Vectorizer::new();
        let vector = vectorizer.vectorize("project deadline");
        assert_eq!(vector.weight("project"), 2.0);
        assert_eq!(vector.weight("deadline"), 1.0);
    }

    #[test]
    fn test_duplicate_tokens_accumulate() {
        let vectorizer = Vectorizer::new();
        let vector = vectorizer.vectorize("rust rust rust");
        assert_eq!(vector.weight("rust"), 3.0);
    }

    #[test]
    fn test_cosine_self_similarity_is_one() {
        let vectorizer = Vectorizer::new();
        let vector = vectorizer.vectorize("rust security tooling");
        assert!((vector.cosine(&vector) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_with_empty_vector_is_zero() {
        let vectorizer = Vectorizer::new();
        let vector = vectorizer.vectorize("rust security tooling");
        let empty = TermVector::default();
        assert_eq!(vector.cosine(&empty), 0.0);
        assert_eq!(empty.cosine(&empty), 0.0);
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let vectorizer = Vectorizer::new();
        let a = vectorizer.vectorize("what projects have you built");
        let b = vectorizer.vectorize("tell me about your projects");
        assert!((a.cosine(&b) - b.cosine(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_vectors_score_zero() {
        let vectorizer = Vectorizer::new();
        let a = vectorizer.vectorize("quantum physics");
        let b = vectorizer.vectorize("gardening advice");
        assert_eq!(a.cosine(&b), 0.0);
    }

    #[test]
    fn test_ranking_puts_best_chunk_first() {
        let vectorizer = Vectorizer::new();
        let knowledge = KnowledgeBase::builtin().unwrap();

        let ranked = vectorizer.rank_chunks(&knowledge, "what languages and frameworks do you use");
        assert_eq!(
            ranked[0].chunk.category,
            crate::knowledge::Category::Skills
        );
        // sorted descending
        for window in ranked.windows(2) {
            assert!(window[0].similarity >= window[1].similarity);
        }
    }
}
