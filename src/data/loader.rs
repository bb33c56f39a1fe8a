// ============================================================
// Layer 4 - Page Loaders
// ============================================================
// Turns a report file into an ordered Vec<PageText>.
//
// Two sources are supported:
//   - PdfPageSource  : a .pdf file, text extracted per page
//                      with the lopdf crate
//   - TextPageSource : a plain-text dump of a report where
//                      pages are separated by form feeds
//                      (\x0c), the layout pdftotext writes
//
// Text is returned exactly as extracted. Cleaning happens
// later in the normalizer, and the segmenter relies on the
// raw line breaks surviving untouched.
//
// Reference: lopdf crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use lopdf::Document;
use std::{fs, path::{Path, PathBuf}};

use crate::domain::document::PageText;
use crate::domain::traits::PageSource;

/// Page separator used by pdftotext and most text dumps
const FORM_FEED: char = '\u{000C}';

// ─── PdfPageSource ────────────────────────────────────────────────────────────
/// Extracts page text from a PDF file.
pub struct PdfPageSource {
    path: PathBuf,
}

impl PdfPageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<Document> {
        Document::load(&self.path)
            .with_context(|| format!("Cannot open PDF '{}'", self.path.display()))
    }
}

impl PageSource for PdfPageSource {
    fn extract_pages(&self) -> Result<Vec<PageText>> {
        let doc = self.open()?;

        // get_pages() is a BTreeMap keyed by 1-based page number,
        // so iteration order is already page order
        let mut pages = Vec::new();
        for (page_number, _object_id) in doc.get_pages() {
            match doc.extract_text(&[page_number]) {
                Ok(text) => {
                    tracing::debug!("Page {}: {} chars", page_number, text.len());
                    pages.push(PageText::new(page_number, text));
                }
                // Keep an empty page so numbering stays aligned with the PDF
                Err(e) => {
                    tracing::warn!(
                        "Page {} of '{}' has no extractable text: {}",
                        page_number,
                        self.path.display(),
                        e
                    );
                    pages.push(PageText::new(page_number, String::new()));
                }
            }
        }

        tracing::info!("Extracted {} pages from '{}'", pages.len(), self.path.display());
        Ok(pages)
    }

    fn page_count(&self) -> Result<usize> {
        Ok(self.open()?.get_pages().len())
    }
}

// ─── TextPageSource ───────────────────────────────────────────────────────────
/// Reads a text file whose pages are separated by form feeds.
/// A file with no form feed is a single page.
pub struct TextPageSource {
    path: PathBuf,
}

impl TextPageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for TextPageSource {
    fn extract_pages(&self) -> Result<Vec<PageText>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read '{}'", self.path.display()))?;

        let pages = split_pages(&text);
        tracing::info!("Read {} pages from '{}'", pages.len(), self.path.display());
        Ok(pages)
    }
}

/// Split a form-feed separated dump into numbered pages.
/// pdftotext ends the last page with a form feed too, so a
/// trailing empty page is dropped. A last page holding only
/// whitespace is still a page and is kept.
pub fn split_pages(text: &str) -> Vec<PageText> {
    let mut parts: Vec<&str> = text.split(FORM_FEED).collect();
    if parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    parts
        .into_iter()
        .enumerate()
        .map(|(i, raw)| PageText::new(i as u32 + 1, raw))
        .collect()
}

/// Pick a page source from the file extension.
pub fn page_source_for(path: &Path) -> Box<dyn PageSource> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfPageSource::new(path))
    } else {
        Box::new(TextPageSource::new(path))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_pages_numbers_from_one() {
        let pages = split_pages("first page.\nmore\x0csecond page.\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], PageText::new(1, "first page.\nmore"));
        assert_eq!(pages[1], PageText::new(2, "second page.\n"));
    }

    #[test]
    fn test_whitespace_last_page_is_kept() {
        let pages = split_pages("first page.\n\x0c \n");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], PageText::new(2, " \n"));
    }

    #[test]
    fn test_no_form_feed_is_one_page() {
        let pages = split_pages("only one page");
        assert_eq!(pages, vec![PageText::new(1, "only one page")]);
    }

    #[test]
    fn test_text_source_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "Revenue grew.\n\x0cCosts fell.\n").unwrap();

        let source = TextPageSource::new(f.path());
        let pages  = source.extract_pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(source.page_count().unwrap(), 2);
        assert_eq!(pages[1].raw_text, "Costs fell.\n");
    }

    #[test]
    fn test_missing_pdf_is_an_error() {
        let source = PdfPageSource::new("/definitely/not/here.pdf");
        assert!(source.extract_pages().is_err());
    }

    #[test]
    fn test_source_chosen_by_extension() {
        // Only checks dispatch; neither file exists
        assert!(page_source_for(Path::new("r.PDF")).extract_pages().is_err());
        assert!(page_source_for(Path::new("r.txt")).extract_pages().is_err());
    }
}
