use burn::data::dataset::Dataset;

use crate::data::vectorizer::FeatureVector;
use crate::domain::labeled_example::Sentiment;

/// One vectorized, labeled training sample.
/// Both targets are kept; the estimator picks the one it trains on.
#[derive(Debug, Clone)]
pub struct SentimentSample {
    pub features:  FeatureVector,
    pub sentiment: Sentiment,
}

impl SentimentSample {
    pub fn new(features: FeatureVector, sentiment: Sentiment) -> Self {
        Self { features, sentiment }
    }

    /// Classifier target column
    pub fn class_index(&self) -> usize {
        self.sentiment.class_index()
    }

    /// Regression target
    pub fn target(&self) -> f32 {
        f32::from(self.sentiment.value())
    }
}

pub struct SentimentDataset {
    samples: Vec<SentimentSample>,
}

impl SentimentDataset {
    pub fn new(samples: Vec<SentimentSample>) -> Self { Self { samples } }
}

impl Dataset<SentimentSample> for SentimentDataset {
    fn get(&self, index: usize) -> Option<SentimentSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
