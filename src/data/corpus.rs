// ============================================================
// Layer 4 - Corpus Loader
// ============================================================
// Reads the labeled financial phrase corpus.
//
// File format: one example per line, two fields separated by
// '@':
//
//   The company reported strong growth.@positive
//   Operating loss totalled EUR 0.3 mn.@negative
//
// Label words map to: neutral → 0, positive → 1, negative → -1.
// Any other label word fails the WHOLE load with the offending
// line number, since a partially loaded corpus would bias
// training.
//
// The published corpus is ISO-8859-1 encoded, so bytes that are
// not valid UTF-8 are decoded as Latin-1 instead of rejected.
//
// clean() then drops rows containing '+' and strips backticks.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::error::PipelineError;
use crate::domain::labeled_example::{LabeledExample, Sentiment};
use crate::domain::traits::CorpusSource;

/// Field separator of the corpus file
pub const FIELD_DELIMITER: char = '@';

/// Rows containing this character are dropped by clean()
const REJECTED_CHAR: char = '+';

/// Stripped from the text of every kept row by clean()
const STRIPPED_CHAR: char = '`';

pub struct CorpusLoader {
    path: PathBuf,
}

impl CorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the corpus file.
    pub fn load(&self) -> Result<Vec<LabeledExample>> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;
        let text = decode(bytes);

        let examples = parse_corpus(&text)
            .with_context(|| format!("Cannot parse corpus '{}'", self.path.display()))?;

        tracing::info!("Loaded {} labeled examples from '{}'", examples.len(), self.path.display());
        Ok(examples)
    }
}

impl CorpusSource for CorpusLoader {
    fn load_examples(&self) -> Result<Vec<LabeledExample>> {
        self.load()
    }
}

/// UTF-8 when valid, Latin-1 otherwise (every byte is one char).
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!("Corpus is not UTF-8, decoding as Latin-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Parse corpus text. Line numbers in errors are 1-based.
/// Blank lines are skipped.
pub fn parse_corpus(text: &str) -> Result<Vec<LabeledExample>, PipelineError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_row(i + 1, line))
        .collect()
}

/// Parse one `<sentence>@<label-word>` line.
///
/// The label is whatever follows the LAST '@', so sentences that
/// contain '@' themselves still parse.
pub fn parse_row(line_number: usize, line: &str) -> Result<LabeledExample, PipelineError> {
    let (sentence, label) = line
        .rsplit_once(FIELD_DELIMITER)
        .ok_or_else(|| PipelineError::MalformedCorpusRow {
            line:   line_number,
            field:  "sentiment",
            reason: format!("missing '{FIELD_DELIMITER}' delimiter"),
        })?;

    let label = label.trim_end_matches('\r').trim();
    let sentiment = Sentiment::from_label_word(label).ok_or_else(|| {
        PipelineError::MalformedCorpusRow {
            line:   line_number,
            field:  "sentiment",
            reason: format!("unknown label word '{label}' (expected neutral, positive or negative)"),
        }
    })?;

    Ok(LabeledExample::new(sentence, sentiment))
}

/// Drop rows containing '+', strip backticks from the rest.
///
/// Idempotent: the output has no '+' rows left to drop and no
/// backticks left to strip.
pub fn clean(examples: Vec<LabeledExample>) -> Vec<LabeledExample> {
    let before = examples.len();

    let cleaned: Vec<LabeledExample> = examples
        .into_iter()
        .filter(|ex| !ex.text.contains(REJECTED_CHAR))
        .map(|mut ex| {
            if ex.text.contains(STRIPPED_CHAR) {
                ex.text.retain(|c| c != STRIPPED_CHAR);
            }
            ex
        })
        .collect();

    tracing::debug!("Cleaning dropped {} of {} rows", before - cleaned.len(), before);
    cleaned
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_positive_row_loads() {
        let ex = parse_row(1, "The company reported strong growth.@positive").unwrap();
        assert_eq!(
            ex,
            LabeledExample::new("The company reported strong growth.", Sentiment::Positive)
        );
        assert_eq!(ex.sentiment.value(), 1);
    }

    #[test]
    fn test_unknown_label_fails_whole_load() {
        let text = "Sales rose.@positive\nProfit fell.@bearish\nFlat.@neutral\n";
        let err  = parse_corpus(text).unwrap_err();
        match err {
            PipelineError::MalformedCorpusRow { line, field, reason } => {
                assert_eq!(line, 2);
                assert_eq!(field, "sentiment");
                assert!(reason.contains("bearish"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_delimiter_is_malformed() {
        let err = parse_corpus("no label here").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedCorpusRow { line: 1, .. }));
    }

    #[test]
    fn test_label_after_last_delimiter() {
        let ex = parse_row(1, "Contact ir@example.com for details.@neutral").unwrap();
        assert_eq!(ex.text, "Contact ir@example.com for details.");
        assert_eq!(ex.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let examples = parse_corpus("A.@negative\r\n\r\nB.@neutral\r\n").unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_clean_drops_plus_and_strips_backticks() {
        let examples = vec![
            LabeledExample::new("Revenue is up + margins improved.", Sentiment::Positive),
            LabeledExample::new("`EPS` rose", Sentiment::Positive),
            LabeledExample::new("Nothing to do here", Sentiment::Neutral),
        ];
        let cleaned = clean(examples);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].text, "EPS rose");
        assert_eq!(cleaned[1].text, "Nothing to do here");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let examples = vec![
            LabeledExample::new("a + b", Sentiment::Neutral),
            LabeledExample::new("``x`` y", Sentiment::Negative),
            LabeledExample::new("plain", Sentiment::Positive),
        ];
        let once  = clean(examples);
        let twice = clean(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_latin1_file_decodes() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        // "Café sales rose.@positive" with é as a single Latin-1 byte
        f.write_all(b"Caf\xe9 sales rose.@positive\n").unwrap();

        let examples = CorpusLoader::new(f.path()).load().unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].text, "Café sales rose.");
    }
}
