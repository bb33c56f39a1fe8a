// ============================================================
// Layer 4 - Train/Validation Splitter
// ============================================================
// Shuffles samples and splits them into two sets:
//   - Training set:   used to fit the vocabulary and estimator
//   - Validation set: used to score the fitted model
//
// Corpus files are often grouped by label or by source, so the
// samples are shuffled before the cut.
//
// The shuffle is driven by a seeded StdRng, so the same samples
// and seed always give the same split, and therefore the same
// fitted model.
//
// Split ratio: 70% training, 30% validation (configurable)
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation (SeedableRng, SliceRandom)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Default share of samples used for training
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.7;

/// Shuffle `samples` with `seed` and split into (train, validation).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.7 = 70%
/// * `seed`           - RNG seed; equal seeds give equal splits
///
/// # Example
/// ```ignore
/// let (train, val) = split_train_val(all_samples, 0.7, 42);
/// ```
pub fn split_train_val<T>(mut samples: Vec<T>, train_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    // e.g. 100 samples * 0.7 = 70 → first 70 are training
    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    // After this: samples = [0..split_at], val = [split_at..total]
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        samples.len(),
        val.len(),
        (samples.len() * 100) / total.max(1),
        (val.len()     * 100) / total.max(1),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val)      = split_train_val(items, 0.7, 42);
        assert_eq!(train.len(), 70);
        assert_eq!(val.len(),   30);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, val)      = split_train_val(items, 0.7, 1);
        let mut all: Vec<usize> = train.into_iter().chain(val).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_val((0..40).collect::<Vec<usize>>(), 0.7, 7);
        let b = split_train_val((0..40).collect::<Vec<usize>>(), 0.7, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_order() {
        let (a, _) = split_train_val((0..40).collect::<Vec<usize>>(), 0.7, 1);
        let (b, _) = split_train_val((0..40).collect::<Vec<usize>>(), 0.7, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.7, 42);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }
}
