// ============================================================
// Layer 3 - LabeledExample Domain Type
// ============================================================
// One sentence from the labeled financial phrase corpus and
// its 3-way sentiment label.
//
// The label has three views, each used by a different layer:
//   - the label word in the corpus file  ("negative" ...)
//   - the numeric label                  (-1, 0, 1)
//   - the class column of the classifier (0, 1, 2)
//
// Example:
//   "The company reported strong growth.@positive"
//   → LabeledExample { text: "The company reported strong growth.",
//                      sentiment: Sentiment::Positive }
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment label: -1 negative, 0 neutral, 1 positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// All labels in classifier column order
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Map a corpus label word to a Sentiment.
    /// Matching is exact: the corpus uses lowercase words only.
    pub fn from_label_word(word: &str) -> Option<Self> {
        match word {
            "negative" => Some(Sentiment::Negative),
            "neutral"  => Some(Sentiment::Neutral),
            "positive" => Some(Sentiment::Positive),
            _          => None,
        }
    }

    pub fn label_word(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral  => "neutral",
            Sentiment::Positive => "positive",
        }
    }

    /// Numeric label used as the regression target
    pub fn value(self) -> i8 {
        match self {
            Sentiment::Negative => -1,
            Sentiment::Neutral  => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Column index in the classifier's output layer
    pub fn class_index(self) -> usize {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Neutral  => 1,
            Sentiment::Positive => 2,
        }
    }

    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A labeled corpus sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub sentiment: Sentiment,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_words_map_to_values() {
        assert_eq!(Sentiment::from_label_word("neutral").map(Sentiment::value), Some(0));
        assert_eq!(Sentiment::from_label_word("positive").map(Sentiment::value), Some(1));
        assert_eq!(Sentiment::from_label_word("negative").map(Sentiment::value), Some(-1));
        assert_eq!(Sentiment::from_label_word("Positive"), None);
        assert_eq!(Sentiment::from_label_word("bullish"), None);
    }

    #[test]
    fn test_class_index_round_trips() {
        for s in Sentiment::ALL {
            assert_eq!(Sentiment::from_class_index(s.class_index()), Some(s));
        }
        assert_eq!(Sentiment::from_class_index(3), None);
    }
}
