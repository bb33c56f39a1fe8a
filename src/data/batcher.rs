// ============================================================
// Layer 4 - Sentiment Batcher
// ============================================================
// Implements burn's Batcher trait to turn a Vec<SentimentSample>
// into dense tensors for one optimiser step.
//
// Samples hold sparse count vectors; only the rows of the current
// mini-batch are expanded to dense form:
//   Input:  N samples, each a FeatureVector of dimension D
//   Output: features [N, D], classes [N], targets [N, 1]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::SentimentSample;
use crate::data::vectorizer::FeatureVector;

// ─── SentimentBatch ───────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct SentimentBatch<B: Backend> {
    /// Token counts - shape: [batch_size, vocabulary_len]
    pub features: Tensor<B, 2>,

    /// Classifier targets (0 negative, 1 neutral, 2 positive) - shape: [batch_size]
    pub classes: Tensor<B, 1, Int>,

    /// Regression targets (-1.0, 0.0, 1.0) - shape: [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

// ─── SentimentBatcher ─────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct SentimentBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SentimentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<SentimentSample, SentimentBatch<B>> for SentimentBatcher<B> {
    fn batch(&self, items: Vec<SentimentSample>) -> SentimentBatch<B> {
        let batch_size = items.len();

        let features = dense_features::<B>(
            items.iter().map(|s| &s.features),
            batch_size,
            &self.device,
        );

        let classes: Vec<i64> = items.iter().map(|s| s.class_index() as i64).collect();
        let targets: Vec<f32> = items.iter().map(|s| s.target()).collect();

        let classes = Tensor::<B, 1, Int>::from_data(
            TensorData::new(classes, [batch_size]), &self.device,
        );
        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets, [batch_size, 1]), &self.device,
        );

        SentimentBatch { features, classes, targets }
    }
}

/// Stack sparse rows into one dense [rows, dim] tensor.
/// Every row must share the same dimension.
pub fn dense_features<'a, B: Backend>(
    rows:   impl Iterator<Item = &'a FeatureVector>,
    count:  usize,
    device: &B::Device,
) -> Tensor<B, 2> {
    let mut dim  = 0usize;
    let mut flat = Vec::new();

    for row in rows {
        dim = row.dim();
        if flat.is_empty() {
            flat.reserve(count * dim);
        }
        flat.extend(row.to_dense());
    }

    Tensor::<B, 2>::from_data(TensorData::new(flat, [count, dim]), device)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vectorizer::{transform, FeatureVectorizer};
    use crate::domain::labeled_example::Sentiment;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_targets() {
        let tokens = vec![
            vec!["profit".to_string(), "rise".to_string()],
            vec!["loss".to_string()],
        ];
        let vocab = FeatureVectorizer::new(1).fit(&tokens).unwrap();
        let items = vec![
            SentimentSample::new(transform(&vocab, &tokens[0]), Sentiment::Positive),
            SentimentSample::new(transform(&vocab, &tokens[1]), Sentiment::Negative),
        ];

        let batcher = SentimentBatcher::<NdArray>::new(Default::default());
        let batch   = batcher.batch(items);

        assert_eq!(batch.features.dims(), [2, 3]);
        assert_eq!(batch.classes.dims(), [2]);
        assert_eq!(batch.targets.dims(), [2, 1]);

        let features: Vec<f32> = batch.features.into_data().convert::<f32>().to_vec().unwrap();
        assert_eq!(features, vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

        let classes: Vec<i64> = batch.classes.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(classes, vec![2, 0]);

        let targets: Vec<f32> = batch.targets.into_data().convert::<f32>().to_vec().unwrap();
        assert_eq!(targets, vec![1.0, -1.0]);
    }
}
