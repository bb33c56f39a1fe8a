// ============================================================
// Layer 3 - Pipeline Errors
// ============================================================
// Typed conditions raised by the data and ml layers. The
// application layer wraps these in anyhow with extra context.
//
// There is no "vocabulary mismatch" variant: a
// SentimentModel owns its vocabulary and estimator as one value
// and never exposes a way to pair either with another.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// A corpus line could not be parsed; the whole load fails
    #[error("malformed corpus row at line {line}, field '{field}': {reason}")]
    MalformedCorpusRow {
        line:   usize,
        field:  &'static str,
        reason: String,
    },

    /// The page sequence handed to the segmenter is unusable
    #[error("invalid document input at page {page}: {reason}")]
    InvalidDocumentInput { page: u32, reason: String },

    #[error("cannot fit: no training examples left after cleaning")]
    EmptyTrainingSet,

    #[error("vectorizer fit failed: vocabulary is empty (every example normalized to zero tokens)")]
    EmptyVocabulary,

    #[error("split failed: {count} examples are too few for a train fraction of {ratio}")]
    InsufficientExamples { count: usize, ratio: f64 },

    #[error("estimator failed: {reason}")]
    Estimator { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_error_names_line_and_field() {
        let e = PipelineError::MalformedCorpusRow {
            line:   12,
            field:  "sentiment",
            reason: "unknown label word 'bullish'".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("line 12"));
        assert!(msg.contains("sentiment"));
        assert!(msg.contains("bullish"));
    }

    #[test]
    fn test_fit_errors_name_the_stage() {
        assert!(PipelineError::EmptyVocabulary.to_string().starts_with("vectorizer"));
        let e = PipelineError::Estimator { reason: "no batches".into() };
        assert!(e.to_string().starts_with("estimator"));
    }
}
