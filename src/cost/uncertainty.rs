use crate::algorithms::{ConfigurationError, Error};
use crate::cost::topography::check_weight;
use crate::cost::{clamp_query, path_samples, saturate, CostModel};
use crate::field::FieldEstimate;
use crate::geometry::{Domain, Position};
use crate::grid::Grid;

/// Distance discounted by the estimator's uncertainty along the way.
///
/// The cost is `distance / (1 + weight * u)` where `u` is the mean normalized
/// variance sampled along the agent-to-cell segment, so an agent whose route
/// crosses poorly estimated ground is preferred for that cell. Built from one
/// field estimate; rebuild it when the estimate is refreshed.
#[derive(Clone, Debug)]
pub struct UncertaintyCost {
    grid: Grid,
    uncertainty: Vec<f64>,
    weight: f64,
    samples_per_cell: u32,
}

impl UncertaintyCost {
    pub fn new(
        grid: &Grid,
        field: &FieldEstimate,
        weight: f64,
        samples_per_cell: u32,
    ) -> Result<Self, Error> {
        check_weight(weight)?;
        if samples_per_cell == 0 {
            return Err(ConfigurationError::NotPositive("samples_per_cell").into());
        }
        if field.len() != grid.len() {
            return Err(ConfigurationError::LenMismatch {
                name: "field_estimate",
                expected: grid.len(),
                actual: field.len(),
            }
            .into());
        }
        Ok(Self {
            grid: grid.clone(),
            uncertainty: field.normalized_variance(),
            weight,
            samples_per_cell,
        })
    }

    /// Mean normalized variance along the segment from `from` to `to`.
    pub fn path_uncertainty(&self, from: &Position, to: &Position) -> f64 {
        let (sum, count) = path_samples(*from, *to, self.grid.spacing(), self.samples_per_cell)
            .map(|p| self.grid.sample(&self.uncertainty, &p))
            .fold((0.0, 0usize), |(sum, count), u| (sum + u, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

impl CostModel for UncertaintyCost {
    fn name(&self) -> &'static str {
        "uncertainty_dependent"
    }

    fn evaluate(&self, agent: &Position, cell: &Position) -> f64 {
        let (agent, cell) = clamp_query(&self.grid.domain(), self.name(), agent, cell);
        saturate(agent.distance(&cell) / (1.0 + self.weight * self.path_uncertainty(&agent, &cell)))
    }

    fn domain(&self) -> Domain {
        self.grid.domain()
    }

    fn grid_shape(&self) -> Option<(usize, usize)> {
        Some(self.grid.shape())
    }
}
