// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting file output that does not belong to any one
// business layer:
//
//   checkpoint.rs - save/load a SentimentModel directory
//                   (config JSON, vocabulary + report JSON,
//                   burn weights record)
//
//   metrics.rs    - per-epoch loss history as CSV
//
//   report.rs     - scored paragraphs as CSV
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model directory saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// Prediction report CSV writer
pub mod report;
