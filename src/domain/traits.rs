// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The two leaf boundaries of the pipeline are both one-shot
// synchronous reads, performed before any stage runs:
//   - PageSource   → per-page report text (PDF or plain text)
//   - CorpusSource → labeled phrase corpus lines
//
// Application code only sees these traits, so a test can feed
// in-memory pages and the CLI can feed a PDF without any change
// to the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::document::PageText;
use crate::domain::labeled_example::LabeledExample;

// ─── PageSource ───────────────────────────────────────────────────────────────
/// Anything that can produce the ordered page texts of one document.
///
/// Implementations:
///   - PdfPageSource  → lopdf text extraction
///   - TextPageSource → form-feed separated text file
///   - Vec<PageText>  → already-extracted pages
pub trait PageSource {
    /// All pages in order, numbered from 1
    fn extract_pages(&self) -> Result<Vec<PageText>>;

    /// Number of pages without keeping their text
    fn page_count(&self) -> Result<usize> {
        Ok(self.extract_pages()?.len())
    }
}

impl PageSource for Vec<PageText> {
    fn extract_pages(&self) -> Result<Vec<PageText>> {
        Ok(self.clone())
    }

    fn page_count(&self) -> Result<usize> {
        Ok(self.len())
    }
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can produce labeled corpus examples.
pub trait CorpusSource {
    fn load_examples(&self) -> Result<Vec<LabeledExample>>;
}

impl CorpusSource for Vec<LabeledExample> {
    fn load_examples(&self) -> Result<Vec<LabeledExample>> {
        Ok(self.clone())
    }
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
///
/// Implementations:
///   - SentimentModel → vocabulary, estimator weights and config
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;
}
