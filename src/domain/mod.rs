// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with: pages of report text, the paragraphs cut
// from them, labeled corpus sentences and the errors that the
// pipeline can raise.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only data and the traits other layers implement
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// Page text and the paragraphs derived from it
pub mod document;

// A labeled corpus sentence and the 3-way sentiment label
pub mod labeled_example;

// Error taxonomy shared by the data and ml layers
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
