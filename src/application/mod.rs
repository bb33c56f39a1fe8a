// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers for one goal each: training
// models, evaluating saved models, and scoring a report.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No argument parsing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Fit and save models from the labeled corpus
pub mod train_use_case;

// Score saved models on a held-out corpus
pub mod evaluate_use_case;

// Segment a report and score each paragraph
pub mod run_use_case;
