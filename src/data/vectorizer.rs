// ============================================================
// Layer 4 - Feature Vectorizer
// ============================================================
// Bag-of-words counter over canonical tokens.
//
//   fit       : token sequences → Vocabulary   (once, sequential)
//   transform : token sequence  → FeatureVector (any number of times)
//
// Example with ngram_max = 1:
//   fit([["profit","rise"], ["profit","fall"]])
//     → { "profit": 0, "rise": 1, "fall": 2 }
//   transform(["profit","profit","loss"])
//     → [2, 0, 0]       ("loss" is unseen and silently dropped)
//
// Column indices follow order of first appearance, so the same
// training tokens always give the same vocabulary.
//
// A Vocabulary can only be built by fit() (or restored from a
// saved model) and has no mutating methods. The n-gram range is
// frozen into it, so transform() cannot be called with settings
// that differ from the ones it was fitted with.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::data::normalizer::TokenSequence;
use crate::domain::error::PipelineError;

// ─── Vocabulary ───────────────────────────────────────────────────────────────
/// Immutable term → column mapping learned at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VocabularyRecord", into = "VocabularyRecord")]
pub struct Vocabulary {
    terms:     Vec<String>,
    index:     HashMap<String, usize>,
    ngram_max: usize,
}

/// On-disk form: the index is rebuilt from the term list
#[derive(Serialize, Deserialize)]
struct VocabularyRecord {
    ngram_max: usize,
    terms:     Vec<String>,
}

impl From<VocabularyRecord> for Vocabulary {
    fn from(r: VocabularyRecord) -> Self {
        Vocabulary::from_terms(r.terms, r.ngram_max)
    }
}

impl From<Vocabulary> for VocabularyRecord {
    fn from(v: Vocabulary) -> Self {
        VocabularyRecord { ngram_max: v.ngram_max, terms: v.terms }
    }
}

impl Vocabulary {
    fn from_terms(terms: Vec<String>, ngram_max: usize) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index, ngram_max }
    }

    /// Number of feature columns
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    #[cfg(test)]
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    pub fn ngram_max(&self) -> usize {
        self.ngram_max
    }
}

// ─── FeatureVector ────────────────────────────────────────────────────────────
/// Fixed-length count vector, stored sparsely.
/// `dim` always equals the vocabulary length it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim:     usize,
    /// (column, count), sorted by column, counts > 0
    entries: Vec<(usize, f32)>,
}

impl FeatureVector {
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[cfg(test)]
    pub fn get(&self, column: usize) -> f32 {
        self.entries
            .binary_search_by_key(&column, |(c, _)| *c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.dim];
        for &(c, v) in &self.entries {
            dense[c] = v;
        }
        dense
    }
}

// ─── FeatureVectorizer ────────────────────────────────────────────────────────
pub struct FeatureVectorizer {
    ngram_max: usize,
}

impl FeatureVectorizer {
    /// `ngram_max` of 1 counts single tokens; 2 adds token pairs, ...
    pub fn new(ngram_max: usize) -> Self {
        Self { ngram_max: ngram_max.max(1) }
    }

    /// Learn the vocabulary in one sequential pass.
    pub fn fit(&self, corpus: &[TokenSequence]) -> Result<Vocabulary, PipelineError> {
        let mut terms: Vec<String>     = Vec::new();
        let mut seen:  HashSet<String> = HashSet::new();

        for tokens in corpus {
            for term in ngrams(tokens, self.ngram_max) {
                if seen.insert(term.clone()) {
                    terms.push(term);
                }
            }
        }

        if terms.is_empty() {
            return Err(PipelineError::EmptyVocabulary);
        }

        tracing::info!(
            "Vocabulary fitted: {} terms from {} sequences (ngram_max={})",
            terms.len(),
            corpus.len(),
            self.ngram_max
        );
        Ok(Vocabulary::from_terms(terms, self.ngram_max))
    }
}

/// Count vector of one token sequence; unseen terms are dropped.
pub fn transform(vocabulary: &Vocabulary, tokens: &[String]) -> FeatureVector {
    let mut counts: HashMap<usize, f32> = HashMap::new();
    for term in ngrams(tokens, vocabulary.ngram_max) {
        if let Some(c) = vocabulary.column(&term) {
            *counts.entry(c).or_insert(0.0) += 1.0;
        }
    }

    let mut entries: Vec<(usize, f32)> = counts.into_iter().collect();
    entries.sort_unstable_by_key(|(c, _)| *c);

    FeatureVector {
        dim: vocabulary.len(),
        entries,
    }
}

pub fn transform_all(vocabulary: &Vocabulary, corpus: &[TokenSequence]) -> Vec<FeatureVector> {
    corpus.iter().map(|tokens| transform(vocabulary, tokens)).collect()
}

/// All contiguous n-grams for n in 1..=ngram_max, joined by a space.
fn ngrams(tokens: &[String], ngram_max: usize) -> Vec<String> {
    let mut out = Vec::new();
    for n in 1..=ngram_max {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            out.push(window.join(" "));
        }
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn seq(words: &[&str]) -> TokenSequence {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_fit_uses_first_appearance_order() {
        let vocab = FeatureVectorizer::new(1)
            .fit(&[seq(&["profit", "rise"]), seq(&["profit", "fall"])])
            .unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.column("profit"), Some(0));
        assert_eq!(vocab.column("rise"), Some(1));
        assert_eq!(vocab.column("fall"), Some(2));
        assert_eq!(vocab.term(2), Some("fall"));
    }

    #[test]
    fn test_transform_counts_tokens() {
        let vocab = FeatureVectorizer::new(1)
            .fit(&[seq(&["profit", "rise", "fall"])])
            .unwrap();
        let v = transform(&vocab, &seq(&["profit", "profit", "fall"]));
        assert_eq!(v.to_dense(), vec![2.0, 0.0, 1.0]);
        assert_eq!(v.get(0), 2.0);
        assert_eq!(v.get(1), 0.0);
    }

    #[test]
    fn test_unseen_tokens_give_zero_vector() {
        let vocab = FeatureVectorizer::new(1)
            .fit(&[seq(&["profit", "rise"])])
            .unwrap();
        let v = transform(&vocab, &seq(&["merger", "dividend"]));
        assert!(v.is_zero());
        assert_eq!(v.dim(), 2);
        assert_eq!(v.to_dense(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_corpus_has_no_vocabulary() {
        let err = FeatureVectorizer::new(1).fit(&[seq(&[]), seq(&[])]).unwrap_err();
        assert_eq!(err, PipelineError::EmptyVocabulary);
    }

    #[test]
    fn test_bigrams_are_frozen_into_vocabulary() {
        let vocab = FeatureVectorizer::new(2)
            .fit(&[seq(&["net", "sale", "rise"])])
            .unwrap();
        assert_eq!(vocab.ngram_max(), 2);
        assert_eq!(vocab.len(), 5);
        assert!(vocab.column("net sale").is_some());
        assert!(vocab.column("sale rise").is_some());

        let v = transform(&vocab, &seq(&["net", "sale"]));
        assert_eq!(v.get(vocab.column("net sale").unwrap()), 1.0);
    }

    #[test]
    fn test_vocabulary_survives_serde() {
        let vocab = FeatureVectorizer::new(1)
            .fit(&[seq(&["b", "a", "c"])])
            .unwrap();
        let json    = serde_json::to_string(&vocab).unwrap();
        let decoded: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, vocab);
        assert_eq!(decoded.column("c"), Some(2));
    }
}
