use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::field::FieldEstimate;
use crate::geometry::{Domain, Position};

/// Generate the weight vector where each cell has the same workload.
pub fn uniform_cell_weights(no_of_cells: usize) -> Vec<f64> {
    vec![1.0; no_of_cells]
}

/// Generate the weight vector where each cell's workload is its predicted
/// variance: uncertain cells need more samples.
pub fn variance_cell_weights(field: &FieldEstimate) -> Vec<f64> {
    field.variance().to_vec()
}

/// Scatter `count` agents uniformly over `domain`.
///
/// The same seed always yields the same positions; without a seed the
/// generator is seeded from entropy.
pub fn random_agent_positions(domain: &Domain, count: usize, seed: Option<u64>) -> Vec<Position> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    (0..count)
        .map(|_| {
            Position::new(
                sample_axis(&mut rng, domain.min.x, domain.max.x),
                sample_axis(&mut rng, domain.min.y, domain.max.y),
            )
        })
        .collect()
}

fn sample_axis(rng: &mut SmallRng, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
