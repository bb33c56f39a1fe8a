// ============================================================
// Layer 5 - Estimator
// ============================================================
// The trainable half of a SentimentModel. Two variants share the
// same linear model type and differ only in their output width,
// loss and how outputs are read back:
//
//   Classifier : 3 outputs → argmax → Sentiment (-1, 0, 1)
//   Regressor  : 1 output  → raw continuous score
//
// Predictions are typed (Prediction::Label / Prediction::Score),
// so a classifier can never hand an out-of-domain value such as
// 0.7 to evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::dataset::SentimentSample;
use crate::data::vectorizer::FeatureVector;
use crate::domain::error::PipelineError;
use crate::domain::labeled_example::Sentiment;
use crate::infra::metrics::EpochMetrics;
use crate::ml::inferencer::Inferencer;
use crate::ml::model::LinearSentimentModel;
use crate::ml::trainer::{run_training, InferBackend, TrainerSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Classification,
    Regression,
}

impl Mode {
    pub fn num_outputs(self) -> usize {
        match self {
            Mode::Classification => Sentiment::ALL.len(),
            Mode::Regression     => 1,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Classification => write!(f, "classification"),
            Mode::Regression     => write!(f, "regression"),
        }
    }
}

/// One model output for one input text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Prediction {
    Label(Sentiment),
    Score(f32),
}

impl Prediction {
    /// Numeric view: -1/0/1 for labels, the raw score otherwise
    pub fn value(self) -> f32 {
        match self {
            Prediction::Label(s) => f32::from(s.value()),
            Prediction::Score(v) => v,
        }
    }

    pub fn label(self) -> Option<Sentiment> {
        match self {
            Prediction::Label(s) => Some(s),
            Prediction::Score(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Estimator {
    Classifier(LinearSentimentModel<InferBackend>),
    Regressor(LinearSentimentModel<InferBackend>),
}

impl Estimator {
    /// Train a fresh estimator of the given mode.
    pub fn fit(
        mode:       Mode,
        train:      Vec<SentimentSample>,
        validation: Vec<SentimentSample>,
        settings:   TrainerSettings,
    ) -> Result<(Self, Vec<EpochMetrics>), PipelineError> {
        let (model, history) = run_training(mode, train, validation, settings)?;
        Ok((Self::from_model(mode, model), history))
    }

    pub(crate) fn from_model(mode: Mode, model: LinearSentimentModel<InferBackend>) -> Self {
        match mode {
            Mode::Classification => Estimator::Classifier(model),
            Mode::Regression     => Estimator::Regressor(model),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Estimator::Classifier(_) => Mode::Classification,
            Estimator::Regressor(_)  => Mode::Regression,
        }
    }

    pub fn model(&self) -> &LinearSentimentModel<InferBackend> {
        match self {
            Estimator::Classifier(m) | Estimator::Regressor(m) => m,
        }
    }

    pub fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<Prediction>, PipelineError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        match self {
            Estimator::Classifier(model) => Inferencer::new(model)
                .argmax_rows(rows)?
                .into_iter()
                .map(|column| {
                    Sentiment::from_class_index(column)
                        .map(Prediction::Label)
                        .ok_or_else(|| PipelineError::Estimator {
                            reason: format!("classifier produced unknown column {column}"),
                        })
                })
                .collect(),
            Estimator::Regressor(model) => Ok(Inferencer::new(model)
                .forward_rows(rows)?
                .into_iter()
                .map(Prediction::Score)
                .collect()),
        }
    }
}
