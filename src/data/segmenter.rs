// ============================================================
// Layer 4 - Paragraph Segmenter
// ============================================================
// Splits per-page report text into addressed paragraphs.
//
// PDF text extraction usually drops paragraph markers but keeps
// the sentence-final period in front of a line break, so the
// boundary used here is the two-character sequence ".\n".
//
// Example:
//   page 1: "Sales rose."              → #1 "Sales rose."
//   page 2: "Costs fell.\nOutlook up." → #2 "Costs fell"
//                                        #3 "Outlook up."
//
// Rules:
//   - the delimiter is removed from the text, nothing else is
//     trimmed, so joining a page's paragraphs with ".\n"
//     gives back the page text byte for byte
//   - empty pieces at either end of a split are kept
//   - a page without the delimiter is one paragraph
//   - paragraph_number runs across the whole document
//
// This is a heuristic, not a grammar-aware splitter. A period
// that ends a line mid-paragraph will start a new paragraph.

use crate::domain::document::{PageText, Paragraph};
use crate::domain::error::PipelineError;

/// A period immediately followed by a newline
pub const PARAGRAPH_DELIMITER: &str = ".\n";

pub struct ParagraphSegmenter {
    delimiter: String,
}

impl ParagraphSegmenter {
    pub fn new() -> Self {
        Self {
            delimiter: PARAGRAPH_DELIMITER.to_string(),
        }
    }

    /// Split every page in order and number the paragraphs.
    ///
    /// Fails with InvalidDocumentInput when there are no pages, when
    /// no page has any text, or when page numbers are not positive
    /// and strictly rising. A blank page next to pages with text is
    /// fine and yields one empty paragraph.
    pub fn segment(&self, pages: &[PageText]) -> Result<Vec<Paragraph>, PipelineError> {
        if pages.is_empty() {
            return Err(PipelineError::InvalidDocumentInput {
                page:   0,
                reason: "document has no pages".to_string(),
            });
        }
        if pages.iter().all(|p| p.raw_text.trim().is_empty()) {
            return Err(PipelineError::InvalidDocumentInput {
                page:   pages[0].page_number,
                reason: "no extractable text on any page".to_string(),
            });
        }

        let mut paragraphs = Vec::new();
        let mut previous   = 0u32;
        let mut counter    = 0u32;

        for page in pages {
            if page.page_number <= previous {
                return Err(PipelineError::InvalidDocumentInput {
                    page:   page.page_number,
                    reason: format!(
                        "page numbers must be positive and increasing (follows page {previous})"
                    ),
                });
            }
            previous = page.page_number;

            for piece in self.split_page(&page.raw_text) {
                counter += 1;
                paragraphs.push(Paragraph::new(page.page_number, counter, piece));
            }
        }

        tracing::debug!("Segmented {} pages into {} paragraphs", pages.len(), paragraphs.len());
        Ok(paragraphs)
    }

    /// Split one page's text on the delimiter, keeping empty pieces.
    pub fn split_page<'a>(&self, raw_text: &'a str) -> Vec<&'a str> {
        raw_text.split(self.delimiter.as_str()).collect()
    }

    /// Inverse of split_page
    #[cfg(test)]
    pub fn reconstruct(&self, paragraphs: &[Paragraph]) -> String {
        paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }
}

impl Default for ParagraphSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_page_document_numbers_paragraphs_globally() {
        let pages = vec![
            PageText::new(1, "Operating profit rose."),
            PageText::new(2, "Net sales fell.\nThe outlook is unchanged."),
        ];
        let paragraphs = ParagraphSegmenter::new().segment(&pages).unwrap();

        assert_eq!(paragraphs.len(), 3);
        let numbers: Vec<u32> = paragraphs.iter().map(|p| p.paragraph_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(paragraphs[0].page_number, 1);
        assert_eq!(paragraphs[1].page_number, 2);
        assert_eq!(paragraphs[2].page_number, 2);
        assert_eq!(paragraphs[1].text, "Net sales fell");
        assert_eq!(paragraphs[2].text, "The outlook is unchanged.");
    }

    #[test]
    fn test_page_without_delimiter_is_one_paragraph() {
        let text  = "No period at a line end here\nat all";
        let pages = vec![PageText::new(1, text)];
        let paragraphs = ParagraphSegmenter::new().segment(&pages).unwrap();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text, text);
    }

    #[test]
    fn test_empty_edge_pieces_are_kept() {
        let seg = ParagraphSegmenter::new();
        assert_eq!(seg.split_page(".\nmiddle.\n"), vec!["", "middle", ""]);
    }

    #[test]
    fn test_reconstruction_restores_each_page() {
        let seg   = ParagraphSegmenter::new();
        let texts = [
            "  Leading space.\nQ3 results.\n\nTrailing.\n",
            "",
            "a.\n.\n.\nb",
            "Period without newline. Still one.",
        ];
        let pages: Vec<PageText> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| PageText::new(i as u32 + 1, *t))
            .collect();

        let paragraphs = seg.segment(&pages).unwrap();
        for page in &pages {
            let own: Vec<Paragraph> = paragraphs
                .iter()
                .filter(|p| p.page_number == page.page_number)
                .cloned()
                .collect();
            assert_eq!(seg.reconstruct(&own), page.raw_text);
        }
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let err = ParagraphSegmenter::new().segment(&[]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDocumentInput { .. }));
    }

    #[test]
    fn test_document_without_any_text_is_rejected() {
        let pages = vec![PageText::new(1, ""), PageText::new(2, "   ")];
        let err   = ParagraphSegmenter::new().segment(&pages).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidDocumentInput {
                page:   1,
                reason: "no extractable text on any page".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_page_among_text_pages_is_kept() {
        let pages = vec![
            PageText::new(1, "Sales rose."),
            PageText::new(2, " \n"),
            PageText::new(3, "Costs fell."),
        ];
        let paragraphs = ParagraphSegmenter::new().segment(&pages).unwrap();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1].page_number, 2);
        assert_eq!(paragraphs[1].text, " \n");
    }

    #[test]
    fn test_out_of_order_pages_are_rejected() {
        let pages = vec![PageText::new(2, "b"), PageText::new(1, "a")];
        let err   = ParagraphSegmenter::new().segment(&pages).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidDocumentInput {
                page:   1,
                reason: "page numbers must be positive and increasing (follows page 2)".to_string(),
            }
        );
    }
}
