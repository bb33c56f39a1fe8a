// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// All burn model code lives here, plus the pipeline that binds a
// fitted vocabulary to a fitted estimator.
//
//   model.rs      - one Linear layer over token counts
//   trainer.rs    - Adam mini-batch loop with validation loss
//   inferencer.rs - chunked forward passes over count vectors
//   estimator.rs  - Classifier / Regressor variants, Prediction
//   evaluation.rs - accuracy, confusion matrix, MAE
//   pipeline.rs   - SentimentPipeline::fit → SentimentModel
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Linear sentiment model architecture
pub mod model;

/// Training loop with per-epoch validation
pub mod trainer;

/// Batched forward passes for prediction
pub mod inferencer;

/// Classifier and regressor variants
pub mod estimator;

/// Held-out scoring
pub mod evaluation;

/// Vectorizer + estimator fit/predict unit
pub mod pipeline;
