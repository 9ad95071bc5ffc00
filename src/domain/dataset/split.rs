//! Seeded train/test partitioning

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::Dataset;
use crate::domain::DomainError;

/// Result of partitioning a dataset
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Shuffle row indices with a seeded RNG and hold out `ceil(test_size * n)` rows.
///
/// The same dataset, ratio and seed always produce the same partitions.
pub fn train_test_split(
    dataset: &Dataset,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit, DomainError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(DomainError::validation(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n_samples = dataset.n_samples();
    let n_test = (test_size * n_samples as f64).ceil() as usize;

    if n_test == 0 || n_test >= n_samples {
        return Err(DomainError::validation(format!(
            "test_size {} leaves no samples in one of the partitions (n_samples = {})",
            test_size, n_samples
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_indices, train_indices) = indices.split_at(n_test);

    Ok(TrainTestSplit {
        train: dataset.select(train_indices),
        test: dataset.select(test_indices),
    })
}
