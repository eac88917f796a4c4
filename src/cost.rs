//! Heterogeneity cost models.
//!
//! A cost model scores how undesirable it is for an agent at one position to be
//! responsible for the cell at another. The partitioner only ever sees the
//! [`CostModel`] trait, so new heterogeneity sources plug in without touching
//! it.

use std::fmt;

use crate::geometry::{Domain, Position};

mod composite;
mod distance;
mod topography;
mod uncertainty;

pub use composite::CompositeCost;
pub use distance::DistanceCost;
pub use topography::TopographyCost;
pub use uncertainty::UncertaintyCost;

/// Samples per grid spacing taken along an agent-to-cell path when a model
/// does not configure its own.
pub const DEFAULT_SAMPLES_PER_CELL: u32 = 2;

pub trait CostModel: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Cost of making the agent at `agent` responsible for the cell at `cell`.
    ///
    /// Returns a finite, non-negative value; lower is preferable. Positions
    /// outside the model's domain are clamped to the nearest in-domain point.
    /// Implementations are pure: the same inputs always give the same bits.
    fn evaluate(&self, agent: &Position, cell: &Position) -> f64;

    /// The domain queries are clamped into.
    fn domain(&self) -> Domain;

    /// `(nx, ny)` of the grid the model's per-cell data was built for, if any.
    fn grid_shape(&self) -> Option<(usize, usize)> {
        None
    }
}

// Clamps both ends of a query into `domain`, tracing any adjustment.
fn clamp_query(domain: &Domain, model: &'static str, agent: &Position, cell: &Position) -> (Position, Position) {
    let agent_clamped = domain.clamp(agent);
    let cell_clamped = domain.clamp(cell);
    if agent_clamped.adjusted || cell_clamped.adjusted {
        tracing::trace!(
            model,
            ?agent,
            ?cell,
            "query outside domain bounds, clamped"
        );
    }
    (agent_clamped.position, cell_clamped.position)
}

// Costs too large for an `f64` saturate instead of becoming infinite.
fn saturate(cost: f64) -> f64 {
    cost.min(f64::MAX)
}

// Evenly spaced points from `from` to `to`, both ends included, at least
// `samples_per_cell` per `spacing` of path length.
fn path_samples(
    from: Position,
    to: Position,
    spacing: f64,
    samples_per_cell: u32,
) -> impl Iterator<Item = Position> {
    let length = from.distance(&to);
    let steps = ((length / spacing) * f64::from(samples_per_cell)).ceil().max(1.0) as usize;
    (0..=steps).map(move |step| from.lerp(&to, step as f64 / steps as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_samples_include_both_ends() {
        // Arrange
        let from = Position::new(0.0, 0.0);
        let to = Position::new(2.0, 0.0);

        // Act
        let samples: Vec<Position> = path_samples(from, to, 1.0, 2).collect();

        // Assert
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], from);
        assert_eq!(samples[2], Position::new(1.0, 0.0));
        assert_eq!(samples[4], to);
    }

    #[test]
    fn test_path_samples_of_zero_length_path() {
        let p = Position::new(1.0, 1.0);

        let samples: Vec<Position> = path_samples(p, p, 1.0, 2).collect();

        assert_eq!(samples, vec![p, p]);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(f64::MAX * 2.0), f64::MAX);
        assert_eq!(saturate(1.5), 1.5);
    }
}
