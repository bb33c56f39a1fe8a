// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Mini-batch Adam over the vectorized training split, with a
// validation pass after every epoch.
//
//   - Training runs on Autodiff<NdArray> (CPU) for gradients
//   - model.valid() drops autodiff for the validation pass
//   - The DataLoader shuffles with the pipeline seed and runs on
//     the calling thread, so batch order is reproducible
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::data::{
    batcher::SentimentBatcher,
    dataset::{SentimentDataset, SentimentSample},
};
use crate::domain::error::PipelineError;
use crate::infra::metrics::EpochMetrics;
use crate::ml::estimator::Mode;
use crate::ml::model::{LinearSentimentConfig, LinearSentimentModel};

pub type InferBackend = NdArray;
type TrainBackend     = Autodiff<NdArray>;

/// Optimiser settings for one fit
#[derive(Debug, Clone, Copy)]
pub struct TrainerSettings {
    pub epochs:        usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
    pub seed:          u64,
}

pub fn run_training(
    mode:       Mode,
    train:      Vec<SentimentSample>,
    validation: Vec<SentimentSample>,
    settings:   TrainerSettings,
) -> Result<(LinearSentimentModel<InferBackend>, Vec<EpochMetrics>), PipelineError> {
    let num_features = match train.first() {
        Some(sample) => sample.features.dim(),
        None => {
            return Err(PipelineError::Estimator {
                reason: "no training samples".to_string(),
            })
        }
    };
    if settings.epochs == 0 || settings.batch_size == 0 {
        return Err(PipelineError::Estimator {
            reason: format!(
                "epochs ({}) and batch size ({}) must be positive",
                settings.epochs, settings.batch_size
            ),
        });
    }

    let device = NdArrayDevice::default();
    train_loop(mode, num_features, train, validation, settings, device)
}

fn train_loop(
    mode:         Mode,
    num_features: usize,
    train:        Vec<SentimentSample>,
    validation:   Vec<SentimentSample>,
    settings:     TrainerSettings,
    device:       NdArrayDevice,
) -> Result<(LinearSentimentModel<InferBackend>, Vec<EpochMetrics>), PipelineError> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = LinearSentimentConfig::for_mode(mode, num_features);
    let mut model: LinearSentimentModel<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "{} estimator ready: {} features → {} outputs",
        mode, num_features, model_cfg.num_outputs
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    // ── Data loaders ──────────────────────────────────────────────────────────
    let train_loader = DataLoaderBuilder::new(SentimentBatcher::<TrainBackend>::new(device.clone()))
        .batch_size(settings.batch_size)
        .shuffle(settings.seed)
        .build(SentimentDataset::new(train));

    let val_loader = DataLoaderBuilder::new(SentimentBatcher::<InferBackend>::new(device.clone()))
        .batch_size(settings.batch_size)
        .build(SentimentDataset::new(validation));

    let mut history = Vec::with_capacity(settings.epochs);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=settings.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let loss = model.forward_loss(mode, batch);

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(settings.learning_rate, model, grads);
        }

        let train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;
        for batch in val_loader.iter() {
            val_loss_sum += model_valid.forward_loss(mode, batch).into_scalar().elem::<f64>();
            val_batches  += 1;
        }

        let val_loss = if val_batches > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };

        if !train_loss.is_finite() && train_batches > 0 {
            return Err(PipelineError::Estimator {
                reason: format!("training loss diverged at epoch {epoch}; lower the learning rate"),
            });
        }

        tracing::debug!(
            "{} epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4}",
            mode, epoch, settings.epochs, train_loss, val_loss,
        );
        history.push(EpochMetrics::new(epoch, train_loss, val_loss));
    }

    if let Some(last) = history.last() {
        tracing::info!(
            "{} training complete: train_loss={:.4}, val_loss={:.4}",
            mode, last.train_loss, last.val_loss
        );
    }
    Ok((model.valid(), history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vectorizer::{transform, FeatureVectorizer};
    use crate::domain::labeled_example::Sentiment;

    fn settings() -> TrainerSettings {
        TrainerSettings { epochs: 5, batch_size: 4, learning_rate: 0.05, seed: 42 }
    }

    fn samples() -> Vec<SentimentSample> {
        let tokens = vec![
            vec!["profit".to_string(), "rise".to_string()],
            vec!["loss".to_string(), "widen".to_string()],
            vec!["profit".to_string()],
            vec!["loss".to_string()],
        ];
        let vocab  = FeatureVectorizer::new(1).fit(&tokens).unwrap();
        let labels = [Sentiment::Positive, Sentiment::Negative, Sentiment::Positive, Sentiment::Negative];
        tokens
            .iter()
            .zip(labels)
            .map(|(t, s)| SentimentSample::new(transform(&vocab, t), s))
            .collect()
    }

    #[test]
    fn test_training_loss_decreases() {
        let data = samples();
        let (model, history) =
            run_training(Mode::Classification, data.clone(), data, settings()).unwrap();
        assert_eq!(model.num_outputs(), 3);
        assert_eq!(history.len(), 5);
        assert!(history[4].train_loss < history[0].train_loss);
    }

    #[test]
    fn test_no_samples_is_estimator_error() {
        let err = run_training(Mode::Regression, Vec::new(), Vec::new(), settings()).unwrap_err();
        assert!(matches!(err, PipelineError::Estimator { .. }));
    }

    #[test]
    fn test_zero_epochs_rejected() {
        let data = samples();
        let bad  = TrainerSettings { epochs: 0, ..settings() };
        assert!(run_training(Mode::Regression, data.clone(), data, bad).is_err());
    }
}
