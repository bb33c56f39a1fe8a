// ============================================================
// Layer 4 - Text Normalizer
// ============================================================
// Turns free text into the canonical token stream every model
// is trained and queried on.
//
//   "The company reported strong growth."
//       │  Preprocessor        (PDF artefacts, whitespace)
//       ▼
//   BertPreTokenizer            (words and punctuation split)
//       │  ["The","company","reported","strong","growth","."]
//       ▼
//   lowercase + Snowball stem   (canonical form per token)
//       │
//       ▼
//   stop-word / punctuation filter
//       │
//       ▼
//   ["compani", "report", "strong", "growth"]
//
// The vocabulary is built from exactly this function at fit
// time and replayed at inference time, so normalize() is pure
// and order-preserving. Bad input degrades to an empty token
// list instead of an error: one unreadable paragraph must not
// stop the rest of a report from being scored.
//
// One shared instance lives for the whole process (see
// `shared()`); it is built once on first use and never mutated,
// so concurrent callers need no locking.
//
// Stems come from the English Snowball stemmer (rust-stemmers) and
// the stop-word list is the NLTK English one (stop-words), so the
// canonical forms match what other Snowball-based tools produce.
//
// Reference: tokenizers crate (pre_tokenizers::bert)
//            Rust Book §8 (Strings), §16 (Shared-State Concurrency)

use std::collections::HashSet;
use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::data::preprocessor::Preprocessor;

/// Ordered sequence of canonical tokens
pub type TokenSequence = Vec<String>;

static SHARED: LazyLock<TextNormalizer> = LazyLock::new(TextNormalizer::new);

/// The process-wide normalizer, initialised on first use.
pub fn shared() -> &'static TextNormalizer {
    &SHARED
}

pub struct TextNormalizer {
    preprocessor: Preprocessor,
    stemmer:      Stemmer,
    stop_words:   HashSet<String>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            preprocessor: Preprocessor::new(),
            stemmer:      Stemmer::create(Algorithm::English),
            stop_words:   stop_words::get(stop_words::LANGUAGE::English)
                .into_iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }

    /// Normalize one text into canonical tokens.
    pub fn normalize(&self, text: &str) -> TokenSequence {
        let cleaned = self.preprocessor.clean(text);
        if cleaned.is_empty() {
            return Vec::new();
        }

        let words = match split_words(&cleaned) {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!("Tokenizer rejected text ({} chars): {}", cleaned.len(), e);
                return Vec::new();
            }
        };

        words
            .iter()
            .filter_map(|word| self.canonical(word))
            .collect()
    }

    /// Normalize many texts, keeping their order.
    pub fn normalize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<TokenSequence> {
        texts.iter().map(|t| self.normalize(t.as_ref())).collect()
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Canonical form of one surface token, or None if it is filtered out.
    fn canonical(&self, word: &str) -> Option<String> {
        let surface = word.trim().to_lowercase();
        if is_punctuation(&surface) || self.is_stop_word(&surface) {
            return None;
        }

        let stem  = self.stemmer.stem(&surface);
        let token = match stem.trim() {
            ""   => surface.clone(),
            stem => stem.to_lowercase(),
        };

        if token.is_empty() || is_punctuation(&token) || self.is_stop_word(&token) {
            return None;
        }
        Some(token)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on whitespace and punctuation the way BERT does.
fn split_words(text: &str) -> tokenizers::Result<Vec<String>> {
    let mut pretokenized = PreTokenizedString::from(text);
    BertPreTokenizer.pre_tokenize(&mut pretokenized)?;

    Ok(pretokenized
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .map(|(piece, _, _)| piece.to_string())
        .collect())
}

/// A token with no letter or digit in it ("." "--" "€" "%")
fn is_punctuation(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_sentence_normalizes() {
        let tokens = TextNormalizer::new().normalize("The company reported strong growth.");
        assert_eq!(tokens, vec!["compani", "report", "strong", "growth"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let tokens = TextNormalizer::new().normalize("Profits were rising, costs fell");
        assert_eq!(tokens, vec!["profit", "rise", "cost", "fell"]);
    }

    #[test]
    fn test_inflections_share_one_form() {
        let n = TextNormalizer::new();
        for word in ["increased", "increasing", "increases"] {
            assert_eq!(n.normalize(word), n.normalize("increase"), "{word}");
        }
        for word in ["reported", "reporting", "reports"] {
            assert_eq!(n.normalize(word), vec!["report"], "{word}");
        }
        assert_eq!(n.normalize("companies"), n.normalize("company"));
    }

    #[test]
    fn test_contraction_fragments_are_dropped() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("The company's outlook didn't change"), vec!["compani", "outlook", "chang"]);
    }

    #[test]
    fn test_only_stop_words_and_punctuation_is_empty() {
        let n = TextNormalizer::new();
        assert!(n.normalize("It is what it is!!! ...").is_empty());
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("   \n\t ").is_empty());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let n    = shared();
        let text = "Operating profit totalled EUR 9.4 mn , up from EUR 8.7 mn in 2004 .";
        assert_eq!(n.normalize(text), n.normalize(text));
    }

    #[test]
    fn test_pdf_artifacts_do_not_split_words() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("pro\u{FB01}t"), n.normalize("profit"));
        assert_eq!(n.normalize("rev-\nenue"), n.normalize("revenue"));
    }

    #[test]
    fn test_normalize_all_keeps_positions() {
        let out = TextNormalizer::new().normalize_all(&["Sales rose.", "", "Net loss"]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], vec!["sale", "rose"]);
        assert!(out[1].is_empty());
        assert_eq!(out[2], vec!["net", "loss"]);
    }
}
