// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything from raw report pages and corpus lines up to the
// tensor batches the estimator trains on.
//
//   report (.pdf / .txt)                corpus (sentence@label)
//       │                                   │
//       ▼                                   ▼
//   loader      → Vec<PageText>         corpus     → Vec<LabeledExample>
//       │                                   │        (load + clean)
//       ▼                                   │
//   segmenter   → Vec<Paragraph>            │
//       │                                   │
//       └──────────────┬────────────────────┘
//                      ▼
//   normalizer  → TokenSequence   (preprocessor + stemmer inside)
//                      │
//                      ▼
//   vectorizer  → FeatureVector   (Vocabulary fitted once)
//                      │
//                      ▼
//   splitter / dataset / batcher → training batches
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads report pages from PDF or form-feed separated text
pub mod loader;

/// Splits pages into addressed paragraphs
pub mod segmenter;

/// Parses and cleans the labeled phrase corpus
pub mod corpus;

/// Scrubs PDF artefacts and whitespace from raw text
pub mod preprocessor;

/// Text → canonical token sequence
pub mod normalizer;

/// Token sequences → count vectors over a fitted vocabulary
pub mod vectorizer;

/// Seeded shuffle and train/validation split
pub mod splitter;

/// Implements burn's Dataset trait for vectorized samples
pub mod dataset;

/// Implements burn's Batcher trait to create tensor batches
pub mod batcher;
