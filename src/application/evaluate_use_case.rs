// ============================================================
// Layer 2 - EvaluateUseCase
// ============================================================
// Scores saved models on a labeled corpus file, typically a
// held-out file the models never saw.
//
//   Step 1: Load + clean the corpus   (Layer 4 - data)
//   Step 2: Load each saved model     (Layer 6 - infra)
//   Step 3: evaluate()                (Layer 5 - ml)

use anyhow::{Context, Result};
use std::path::Path;

use crate::application::train_use_case::{model_dir_for, ModeSelection};
use crate::data::corpus::{clean, CorpusLoader};
use crate::domain::traits::{CorpusSource, Persistable};
use crate::ml::estimator::Mode;
use crate::ml::evaluation::Evaluation;
use crate::ml::pipeline::SentimentModel;

#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    pub corpus_path: String,
    pub model_dir:   String,
    pub modes:       ModeSelection,
}

pub struct EvaluateUseCase {
    config: EvaluateConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Vec<(Mode, Evaluation)>> {
        self.execute_with(&CorpusLoader::new(&self.config.corpus_path))
    }

    pub fn execute_with(&self, corpus: &dyn CorpusSource) -> Result<Vec<(Mode, Evaluation)>> {
        let held_out = clean(corpus.load_examples()?);
        tracing::info!("Evaluating on {} held-out examples", held_out.len());

        let root = Path::new(&self.config.model_dir);
        self.config
            .modes
            .modes()
            .into_iter()
            .map(|mode| -> Result<(Mode, Evaluation)> {
                let model = SentimentModel::load(&model_dir_for(root, mode))?;
                let eval  = model
                    .evaluate(&held_out)
                    .with_context(|| format!("Cannot evaluate {mode} model"))?;
                tracing::info!("{} held-out {}", mode, eval);
                Ok((mode, eval))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::{TrainConfig, TrainUseCase};
    use crate::domain::labeled_example::{LabeledExample, Sentiment};
    use crate::ml::pipeline::PipelineConfig;

    #[test]
    fn test_evaluates_saved_models() {
        let dir   = tempfile::tempdir().unwrap();
        let root  = dir.path().to_string_lossy().into_owned();
        let train = vec![
            LabeledExample::new("Profit rose.", Sentiment::Positive),
            LabeledExample::new("Sales grew.", Sentiment::Positive),
            LabeledExample::new("Profit fell.", Sentiment::Negative),
            LabeledExample::new("Sales dropped.", Sentiment::Negative),
        ];
        TrainUseCase::new(TrainConfig {
            model_dir: root.clone(),
            pipeline:  PipelineConfig { epochs: 3, batch_size: 2, ..PipelineConfig::default() },
            ..TrainConfig::default()
        })
        .execute_with(&train)
        .unwrap();

        let held_out = vec![
            LabeledExample::new("Orders rose.", Sentiment::Positive),
            LabeledExample::new("Orders fell.", Sentiment::Negative),
        ];
        let results = EvaluateUseCase::new(EvaluateConfig {
            corpus_path: String::new(),
            model_dir:   root,
            modes:       ModeSelection::Both,
        })
        .execute_with(&held_out)
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, Mode::Classification);
        assert_eq!(results[0].1.count(), 2);
        assert_eq!(results[1].1.metric_name(), "mae");
    }

    #[test]
    fn test_missing_models_fail() {
        let dir = tempfile::tempdir().unwrap();
        let uc  = EvaluateUseCase::new(EvaluateConfig {
            corpus_path: String::new(),
            model_dir:   dir.path().to_string_lossy().into_owned(),
            modes:       ModeSelection::Regression,
        });
        let held_out = vec![LabeledExample::new("Orders rose.", Sentiment::Positive)];
        assert!(uc.execute_with(&held_out).is_err());
    }
}
