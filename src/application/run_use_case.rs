// ============================================================
// Layer 2 - RunUseCase (Orchestrator)
// ============================================================
// The only component that knows the end-to-end flow:
//
//   Step 1: Segment report pages into Paragraphs   (Layer 4)
//   Step 2: Load + clean the corpus                (Layer 4)
//   Step 3: Fit a classifier and a regressor       (Layer 5)
//           (or load both from a model directory)
//   Step 4: Predict both over every paragraph      (Layer 5)
//   Step 5: Zip predictions back onto paragraphs   (by position)
//
// Output order is input paragraph order, so a report keyed by
// (page_number, paragraph_number) lines up with the document.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::application::train_use_case::model_dir_for;
use crate::data::corpus::{clean, CorpusLoader};
use crate::data::loader::page_source_for;
use crate::data::segmenter::ParagraphSegmenter;
use crate::domain::document::{Paragraph, ScoredParagraph};
use crate::domain::traits::{CorpusSource, PageSource, Persistable};
use crate::infra::report::{write_report, write_report_file};
use crate::ml::estimator::Mode;
use crate::ml::pipeline::{PipelineConfig, SentimentModel, SentimentPipeline};

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Report to score (.pdf, or form-feed separated text)
    pub document_path: String,
    /// Corpus to fit on when no saved models are used
    pub corpus_path:   Option<String>,
    /// Directory written by `train`; takes precedence over corpus_path
    pub model_dir:     Option<String>,
    /// CSV destination; stdout when absent
    pub output_path:   Option<String>,
    pub pipeline:      PipelineConfig,
}

pub struct RunUseCase {
    config: RunConfig,
}

impl RunUseCase {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Score the configured document and write the report.
    pub fn execute(&self) -> Result<Vec<ScoredParagraph>> {
        let cfg   = &self.config;
        let pages = page_source_for(Path::new(&cfg.document_path));

        let scored = match (&cfg.model_dir, &cfg.corpus_path) {
            (Some(dir), _) => {
                let root       = Path::new(dir);
                let classifier = SentimentModel::load(&model_dir_for(root, Mode::Classification))?;
                let regressor  = SentimentModel::load(&model_dir_for(root, Mode::Regression))?;
                let paragraphs = segment_document(&*pages)?;
                score_paragraphs(paragraphs, &classifier, &regressor)?
            }
            (None, Some(corpus)) => self.run(&*pages, &CorpusLoader::new(corpus))?,
            (None, None) => bail!("Either a corpus or a model directory is required"),
        };

        match &cfg.output_path {
            Some(path) => write_report_file(&scored, Path::new(path))?,
            None       => write_report(&scored, std::io::stdout().lock())?,
        }
        Ok(scored)
    }

    /// Segment, fit both models on the corpus, then score every paragraph.
    pub fn run(&self, pages: &dyn PageSource, corpus: &dyn CorpusSource) -> Result<Vec<ScoredParagraph>> {
        // ── Step 1: Segment ───────────────────────────────────────────────────
        let paragraphs = segment_document(pages)?;

        // ── Step 2: Load + clean the corpus ───────────────────────────────────
        let examples = clean(corpus.load_examples()?);

        // ── Step 3: Fit both estimators ───────────────────────────────────────
        let pipeline   = SentimentPipeline::new(self.config.pipeline.clone());
        let classifier = pipeline
            .fit(&examples, Mode::Classification)
            .context("Cannot fit classification model")?;
        let regressor  = pipeline
            .fit(&examples, Mode::Regression)
            .context("Cannot fit regression model")?;

        // ── Step 4 + 5: Predict and zip ───────────────────────────────────────
        score_paragraphs(paragraphs, &classifier, &regressor)
    }
}

/// Extract and segment every page of a document.
pub fn segment_document(pages: &dyn PageSource) -> Result<Vec<Paragraph>> {
    let pages      = pages.extract_pages()?;
    let paragraphs = ParagraphSegmenter::new().segment(&pages)?;
    tracing::info!("Segmented {} pages into {} paragraphs", pages.len(), paragraphs.len());
    Ok(paragraphs)
}

/// Attach a label and a score to each paragraph, keeping input order.
pub fn score_paragraphs(
    paragraphs: Vec<Paragraph>,
    classifier: &SentimentModel,
    regressor:  &SentimentModel,
) -> Result<Vec<ScoredParagraph>> {
    if classifier.mode() != Mode::Classification || regressor.mode() != Mode::Regression {
        bail!(
            "expected a classification and a regression model, got {} and {}",
            classifier.mode(),
            regressor.mode()
        );
    }

    let texts: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();
    let labels = classifier.predict(&texts)?;
    let scores = regressor.predict(&texts)?;

    if labels.len() != paragraphs.len() || scores.len() != paragraphs.len() {
        bail!(
            "prediction count mismatch: {} paragraphs, {} labels, {} scores",
            paragraphs.len(), labels.len(), scores.len()
        );
    }

    paragraphs
        .into_iter()
        .zip(labels.into_iter().zip(scores))
        .map(|(paragraph, (label, score))| {
            let label = label
                .label()
                .with_context(|| format!("no label for paragraph {}", paragraph.paragraph_number))?;
            Ok(ScoredParagraph::new(paragraph, label, score.value()))
        })
        .collect()
}
