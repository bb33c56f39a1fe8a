// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// Fits sentiment models on the labeled corpus and saves them:
//
//   Step 1: Load the corpus file          (Layer 4 - data)
//   Step 2: Clean the examples            (Layer 4 - data)
//   Step 3: Fit one model per mode        (Layer 5 - ml)
//   Step 4: Save model + metrics.csv      (Layer 6 - infra)
//
// Each mode gets its own directory under model_dir:
//   <model_dir>/classifier/...
//   <model_dir>/regressor/...
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::corpus::{clean, CorpusLoader};
use crate::domain::traits::{CorpusSource, Persistable};
use crate::infra::metrics::{best_epoch, MetricsLogger};
use crate::ml::estimator::Mode;
use crate::ml::pipeline::{PipelineConfig, SentimentModel, SentimentPipeline};

/// Which estimators a command works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelection {
    Classification,
    Regression,
    Both,
}

impl ModeSelection {
    pub fn modes(self) -> Vec<Mode> {
        match self {
            ModeSelection::Classification => vec![Mode::Classification],
            ModeSelection::Regression     => vec![Mode::Regression],
            ModeSelection::Both           => vec![Mode::Classification, Mode::Regression],
        }
    }
}

/// Directory holding the saved model of one mode.
pub fn model_dir_for(root: &Path, mode: Mode) -> PathBuf {
    match mode {
        Mode::Classification => root.join("classifier"),
        Mode::Regression     => root.join("regressor"),
    }
}

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus_path: String,
    pub model_dir:   String,
    pub modes:       ModeSelection,
    pub pipeline:    PipelineConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_path: "data/Sentences_AllAgree.txt".to_string(),
            model_dir:   "models".to_string(),
            modes:       ModeSelection::Both,
            pipeline:    PipelineConfig::default(),
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Run the full training pipeline and return the fitted models.
    pub fn execute(&self) -> Result<Vec<SentimentModel>> {
        let corpus = CorpusLoader::new(&self.config.corpus_path);
        self.execute_with(&corpus)
    }

    pub fn execute_with(&self, corpus: &dyn CorpusSource) -> Result<Vec<SentimentModel>> {
        let cfg = &self.config;

        // ── Step 1: Load the corpus ──────────────────────────────────────────
        let raw = corpus.load_examples()?;

        // ── Step 2: Clean ─────────────────────────────────────────────────────
        let raw_count = raw.len();
        let examples  = clean(raw);
        tracing::info!(
            "Cleaned corpus: kept {} of {} examples",
            examples.len(),
            raw_count
        );

        // ── Step 3 + 4: Fit and save each requested mode ──────────────────────
        let pipeline = SentimentPipeline::new(cfg.pipeline.clone());
        let root     = Path::new(&cfg.model_dir);
        let mut models = Vec::new();

        for mode in cfg.modes.modes() {
            let model = pipeline
                .fit(&examples, mode)
                .with_context(|| format!("Cannot fit {mode} model"))?;

            let dir = model_dir_for(root, mode);
            model.save(&dir)?;
            let metrics = MetricsLogger::new(&dir)?;
            metrics.log_all(&model.report().history)?;
            tracing::info!("Epoch metrics written to '{}'", metrics.csv_path().display());

            if let Some(best) = best_epoch(&model.report().history) {
                tracing::info!(
                    "{} best validation loss {:.4} at epoch {}",
                    mode, best.val_loss, best.epoch
                );
            }
            models.push(model);
        }

        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::labeled_example::{LabeledExample, Sentiment};
    use crate::infra::checkpoint::CheckpointManager;

    fn corpus() -> Vec<LabeledExample> {
        vec![
            LabeledExample::new("Profit rose.", Sentiment::Positive),
            LabeledExample::new("Sales grew.", Sentiment::Positive),
            LabeledExample::new("Profit fell.", Sentiment::Negative),
            LabeledExample::new("Sales dropped.", Sentiment::Negative),
            LabeledExample::new("The meeting is in May.", Sentiment::Neutral),
            LabeledExample::new("Revenue is up + margins improved.", Sentiment::Positive),
        ]
    }

    #[test]
    fn test_both_modes_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            model_dir: dir.path().to_string_lossy().into_owned(),
            pipeline:  PipelineConfig { epochs: 3, batch_size: 2, ..PipelineConfig::default() },
            ..TrainConfig::default()
        };

        let models = TrainUseCase::new(cfg).execute_with(&corpus()).unwrap();
        assert_eq!(models.len(), 2);
        // The "+" row is cleaned away before the split
        assert_eq!(
            models[0].report().train_size + models[0].report().validation_size,
            5
        );

        for mode in [Mode::Classification, Mode::Regression] {
            let mode_dir = model_dir_for(dir.path(), mode);
            assert!(CheckpointManager::new(&mode_dir).exists());
            assert!(mode_dir.join("metrics.csv").is_file());
        }
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(ModeSelection::Regression.modes(), vec![Mode::Regression]);
        assert_eq!(ModeSelection::Both.modes().len(), 2);
    }
}
