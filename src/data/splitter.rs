// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles row indices with a fixed seed and splits them into:
//   - Training set: used to fit the scaler and the regression
//   - Held-out set: used to measure R² on unseen data
//
// Why split on indices instead of rows?
//   The encoded data lives in one ndarray matrix; selecting
//   rows by index avoids copying the matrix twice.
//
// Why a fixed seed?
//   Reproducibility is a stated property of the trainer: the
//   same CSV and the same seed must produce the same split and
//   therefore bit-identical metrics across runs.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom
// which is the standard unbiased shuffle algorithm.
//
// Reference: rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `0..n_rows` with the given seed and split into
/// (train_indices, test_indices).
///
/// # Arguments
/// * `n_rows`        - Total number of rows
/// * `test_fraction` - Proportion held out, e.g. 0.2 = 20%
/// * `seed`          - RNG seed; same seed → same split
pub fn split_indices(n_rows: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_rows).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    // e.g. 100 rows * 0.2 = 20 held out
    let n_test = ((n_rows as f64) * test_fraction).round() as usize;
    let n_test = n_test.min(n_rows);

    // split_off(n) removes elements [n..] and returns them
    let test = indices.split_off(n_rows - n_test);

    tracing::debug!(
        "Split: {} training, {} held-out (seed={})",
        indices.len(),
        test.len(),
        seed,
    );

    (indices, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let (train, test) = split_indices(100, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn test_all_indices_preserved() {
        // No index lost, no index duplicated
        let (train, test) = split_indices(50, 0.3, 7);
        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        assert_eq!(split_indices(30, 0.2, 42), split_indices(30, 0.2, 42));
    }

    #[test]
    fn test_different_seed_different_split() {
        assert_ne!(split_indices(30, 0.2, 42), split_indices(30, 0.2, 43));
    }

    #[test]
    fn test_empty_dataset() {
        let (train, test) = split_indices(0, 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_zero_fraction_keeps_everything() {
        let (train, test) = split_indices(10, 0.0, 42);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }
}
