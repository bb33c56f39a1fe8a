// ============================================================
// Layer 3 - Document Domain Types
// ============================================================
// A report arrives as an ordered list of PageText values, one
// per PDF page. The segmenter turns those into Paragraphs that
// carry a stable address: (page_number, paragraph_number).
//
// Downstream reporting keys every prediction by that address,
// so both numbers are 1-based and paragraph_number runs across
// the whole document rather than restarting on each page.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::labeled_example::Sentiment;

/// Raw text of one page, as produced by a PageSource.
/// Immutable once extracted; pages are ordered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number within the source document
    pub page_number: u32,

    /// Text exactly as the extractor returned it, line breaks included
    pub raw_text: String,
}

impl PageText {
    pub fn new(page_number: u32, raw_text: impl Into<String>) -> Self {
        Self {
            page_number,
            raw_text: raw_text.into(),
        }
    }
}

/// One paragraph-level unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Page the paragraph was cut from
    pub page_number: u32,

    /// Document-global running counter, 1-based, page-then-local order
    pub paragraph_number: u32,

    /// Paragraph text with the split delimiter removed
    pub text: String,
}

impl Paragraph {
    pub fn new(page_number: u32, paragraph_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            paragraph_number,
            text: text.into(),
        }
    }

    /// The (page, paragraph) pair that reports are keyed by
    pub fn address(&self) -> (u32, u32) {
        (self.page_number, self.paragraph_number)
    }
}

/// A paragraph with both model outputs attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredParagraph {
    pub paragraph: Paragraph,
    /// Classifier output
    pub label: Sentiment,
    /// Regressor output, roughly within [-1, 1]
    pub score: f32,
}

impl ScoredParagraph {
    pub fn new(paragraph: Paragraph, label: Sentiment, score: f32) -> Self {
        Self { paragraph, label, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_address() {
        let p = Paragraph::new(2, 7, "Net sales rose");
        assert_eq!(p.address(), (2, 7));
    }
}
