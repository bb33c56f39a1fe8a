// ============================================================
// Layer 5 - Sentiment Pipeline
// ============================================================
// Fits the vectorizer and one estimator together and freezes
// both into a SentimentModel:
//
//   examples ──split(seed)──► train / validation
//      │
//      ├─ normalize  (process-wide TextNormalizer)
//      ├─ fit vocabulary on the training split only
//      ├─ transform both splits
//      ├─ fit estimator (classifier or regressor)
//      └─ evaluate on the validation split
//
// A SentimentModel has no setters. The vocabulary that built the
// estimator's input columns is the only one predict() ever uses.

use serde::{Deserialize, Serialize};

use crate::data::dataset::SentimentSample;
use crate::data::normalizer;
use crate::data::splitter::{split_train_val, DEFAULT_TRAIN_FRACTION};
use crate::data::vectorizer::{transform_all, FeatureVector, FeatureVectorizer, Vocabulary};
use crate::domain::error::PipelineError;
use crate::domain::labeled_example::{LabeledExample, Sentiment};
use crate::infra::metrics::EpochMetrics;
use crate::ml::estimator::{Estimator, Mode, Prediction};
use crate::ml::evaluation::{classification_report, regression_report, Evaluation};
use crate::ml::trainer::TrainerSettings;

// ─── Configuration ────────────────────────────────────────────────────────────
// Saved next to the weights as pipeline_config.json, so a reloaded
// model knows how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub train_fraction: f64,
    pub seed:           u64,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub learning_rate:  f64,
    pub ngram_max:      usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_fraction: DEFAULT_TRAIN_FRACTION,
            seed:           42,
            epochs:         30,
            batch_size:     64,
            learning_rate:  0.05,
            ngram_max:      1,
        }
    }
}

impl PipelineConfig {
    pub fn trainer_settings(&self) -> TrainerSettings {
        TrainerSettings {
            epochs:        self.epochs,
            batch_size:    self.batch_size,
            learning_rate: self.learning_rate,
            seed:          self.seed,
        }
    }
}

/// What happened during one fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub train_size:      usize,
    pub validation_size: usize,
    pub history:         Vec<EpochMetrics>,
    pub validation:      Evaluation,
}

// ─── SentimentPipeline ────────────────────────────────────────────────────────
pub struct SentimentPipeline {
    config: PipelineConfig,
}

impl SentimentPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Fit a vocabulary and an estimator of `mode` on `examples`.
    pub fn fit(&self, examples: &[LabeledExample], mode: Mode) -> Result<SentimentModel, PipelineError> {
        let cfg = &self.config;

        // ── Step 1: Reject an empty corpus ────────────────────────────────────
        if examples.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }

        // ── Step 2: Seeded train / validation split ───────────────────────────
        let (train, validation) =
            split_train_val(examples.to_vec(), cfg.train_fraction, cfg.seed);
        if train.is_empty() || validation.is_empty() {
            return Err(PipelineError::InsufficientExamples {
                count: examples.len(),
                ratio: cfg.train_fraction,
            });
        }
        tracing::info!(
            "Fitting {} model: {} train, {} validation examples",
            mode, train.len(), validation.len()
        );

        // ── Step 3: Normalize and fit the vocabulary ──────────────────────────
        let norm         = normalizer::shared();
        let train_tokens = norm.normalize_all(&texts_of(&train));
        let val_tokens   = norm.normalize_all(&texts_of(&validation));

        let vocabulary = FeatureVectorizer::new(cfg.ngram_max).fit(&train_tokens)?;
        tracing::info!(
            "Vocabulary fitted: {} columns (n-grams up to {})",
            vocabulary.len(), vocabulary.ngram_max()
        );

        // ── Step 4: Vectorize both splits ─────────────────────────────────────
        let train_rows = transform_all(&vocabulary, &train_tokens);
        let val_rows   = transform_all(&vocabulary, &val_tokens);
        let val_labels: Vec<Sentiment> = validation.iter().map(|e| e.sentiment).collect();

        let train_samples = samples_of(train_rows, &train);
        let val_samples   = samples_of(val_rows.clone(), &validation);

        // ── Step 5: Fit the estimator ─────────────────────────────────────────
        let (estimator, history) =
            Estimator::fit(mode, train_samples, val_samples, cfg.trainer_settings())?;

        // ── Step 6: Score the validation split ────────────────────────────────
        let validation_eval = score(&estimator, &val_rows, &val_labels)?;
        tracing::info!("{} validation: {}", mode, validation_eval);

        let report = TrainingReport {
            train_size:      train.len(),
            validation_size: validation.len(),
            history,
            validation:      validation_eval,
        };

        SentimentModel::from_parts(cfg.clone(), vocabulary, estimator, report)
    }
}

// ─── SentimentModel ───────────────────────────────────────────────────────────
/// A fitted vocabulary and estimator, used as one unit.
#[derive(Debug, Clone)]
pub struct SentimentModel {
    config:     PipelineConfig,
    vocabulary: Vocabulary,
    estimator:  Estimator,
    report:     TrainingReport,
}

impl SentimentModel {
    /// Assemble a model, checking that the estimator reads exactly
    /// the vocabulary's columns.
    pub(crate) fn from_parts(
        config:     PipelineConfig,
        vocabulary: Vocabulary,
        estimator:  Estimator,
        report:     TrainingReport,
    ) -> Result<Self, PipelineError> {
        let expected = estimator.model().num_features();
        if vocabulary.len() != expected {
            return Err(PipelineError::Estimator {
                reason: format!(
                    "vocabulary has {} columns but estimator expects {}",
                    vocabulary.len(),
                    expected
                ),
            });
        }
        Ok(Self { config, vocabulary, estimator, report })
    }

    pub fn mode(&self) -> Mode {
        self.estimator.mode()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// One prediction per text, in input order.
    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Prediction>, PipelineError> {
        let rows = self.vectorize(texts);
        self.estimator.predict(&rows)
    }

    /// Score the model on labeled examples it was not trained on.
    pub fn evaluate(&self, held_out: &[LabeledExample]) -> Result<Evaluation, PipelineError> {
        let rows   = self.vectorize(&texts_of(held_out));
        let labels: Vec<Sentiment> = held_out.iter().map(|e| e.sentiment).collect();
        score(&self.estimator, &rows, &labels)
    }

    fn vectorize<S: AsRef<str>>(&self, texts: &[S]) -> Vec<FeatureVector> {
        let tokens = normalizer::shared().normalize_all(texts);
        let rows   = transform_all(&self.vocabulary, &tokens);

        let empty = rows.iter().filter(|r| r.is_zero()).count();
        if empty > 0 {
            tracing::warn!(
                "{} of {} texts have no in-vocabulary tokens; they score on bias alone",
                empty,
                rows.len()
            );
        }
        rows
    }
}

fn texts_of(examples: &[LabeledExample]) -> Vec<&str> {
    examples.iter().map(|e| e.text.as_str()).collect()
}

fn samples_of(rows: Vec<FeatureVector>, examples: &[LabeledExample]) -> Vec<SentimentSample> {
    rows.into_iter()
        .zip(examples)
        .map(|(features, e)| SentimentSample::new(features, e.sentiment))
        .collect()
}

fn score(
    estimator: &Estimator,
    rows:      &[FeatureVector],
    labels:    &[Sentiment],
) -> Result<Evaluation, PipelineError> {
    let predictions = estimator.predict(rows)?;

    match estimator.mode() {
        Mode::Classification => {
            let predicted = predictions
                .iter()
                .map(|p| {
                    p.label().ok_or_else(|| PipelineError::Estimator {
                        reason: format!("classifier returned non-label output {}", p.value()),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(classification_report(&predicted, labels))
        }
        Mode::Regression => {
            let scores: Vec<f32> = predictions.iter().map(|p| p.value()).collect();
            Ok(regression_report(&scores, labels))
        }
    }
}
