use burn::{
    nn::{
        loss::{CrossEntropyLossConfig, MseLoss, Reduction},
        Initializer, Linear, LinearConfig,
    },
    prelude::*,
};

use crate::data::batcher::SentimentBatch;
use crate::ml::estimator::Mode;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally - do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct LinearSentimentConfig {
    /// Vocabulary length
    pub num_features: usize,
    /// 3 for the classifier, 1 for the regressor
    pub num_outputs:  usize,
}

impl LinearSentimentConfig {
    pub fn for_mode(mode: Mode, num_features: usize) -> Self {
        Self::new(num_features, mode.num_outputs())
    }

    /// Weights and bias start at zero, so a fit never depends on
    /// RNG state.
    pub fn init<B: Backend>(&self, device: &B::Device) -> LinearSentimentModel<B> {
        let linear = LinearConfig::new(self.num_features, self.num_outputs)
            .with_initializer(Initializer::Zeros)
            .init(device);
        LinearSentimentModel { linear }
    }
}

/// A single linear layer over token counts: multinomial logistic
/// regression with 3 outputs, least squares with 1.
#[derive(Module, Debug)]
pub struct LinearSentimentModel<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> LinearSentimentModel<B> {
    /// features: [batch, num_features] → [batch, num_outputs]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(features)
    }

    pub fn num_features(&self) -> usize {
        self.linear.weight.dims()[0]
    }

    pub fn num_outputs(&self) -> usize {
        self.linear.weight.dims()[1]
    }

    /// Mean loss of one batch: cross-entropy for classification,
    /// squared error for regression.
    pub fn forward_loss(&self, mode: Mode, batch: SentimentBatch<B>) -> Tensor<B, 1> {
        let output = self.forward(batch.features);
        match mode {
            Mode::Classification => CrossEntropyLossConfig::new()
                .init(&output.device())
                .forward(output, batch.classes),
            Mode::Regression => MseLoss::new().forward(output, batch.targets, Reduction::Mean),
        }
    }
}
