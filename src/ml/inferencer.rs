// ============================================================
// Layer 5 - Inferencer
// ============================================================
// Runs a fitted linear model over count vectors in fixed-size
// chunks, so a long report never needs one giant dense matrix.
//
// Output is row-major: outputs[row * num_outputs + column].

use crate::data::batcher::dense_features;
use crate::data::vectorizer::FeatureVector;
use crate::domain::error::PipelineError;
use crate::ml::model::LinearSentimentModel;
use crate::ml::trainer::InferBackend;

/// Rows expanded to dense form per forward pass
const CHUNK_ROWS: usize = 256;

pub struct Inferencer<'a> {
    model: &'a LinearSentimentModel<InferBackend>,
}

impl<'a> Inferencer<'a> {
    pub fn new(model: &'a LinearSentimentModel<InferBackend>) -> Self {
        Self { model }
    }

    /// Raw model outputs for every row.
    pub fn forward_rows(&self, rows: &[FeatureVector]) -> Result<Vec<f32>, PipelineError> {
        let expected = self.model.num_features();
        if let Some(bad) = rows.iter().find(|r| r.dim() != expected) {
            return Err(PipelineError::Estimator {
                reason: format!(
                    "feature vector has {} columns, model expects {}",
                    bad.dim(),
                    expected
                ),
            });
        }

        let device  = Default::default();
        let mut out = Vec::with_capacity(rows.len() * self.model.num_outputs());

        for chunk in rows.chunks(CHUNK_ROWS) {
            let x      = dense_features::<InferBackend>(chunk.iter(), chunk.len(), &device);
            let output = self.model.forward(x);
            let values = output
                .into_data()
                .convert::<f32>()
                .to_vec::<f32>()
                .map_err(|e| PipelineError::Estimator {
                    reason: format!("cannot read model output: {e:?}"),
                })?;
            out.extend(values);
        }

        Ok(out)
    }

    /// Index of the largest output per row (classifier columns).
    pub fn argmax_rows(&self, rows: &[FeatureVector]) -> Result<Vec<usize>, PipelineError> {
        let width  = self.model.num_outputs();
        let values = self.forward_rows(rows)?;

        Ok(values
            .chunks(width)
            .map(|row| {
                // First maximum wins, so ties resolve to the lowest column
                let mut best = 0usize;
                for (i, v) in row.iter().enumerate() {
                    if *v > row[best] {
                        best = i;
                    }
                }
                best
            })
            .collect())
    }
}
