use crate::algorithms::{ConfigurationError, Error};
use crate::cost::{clamp_query, path_samples, saturate, CostModel};
use crate::geometry::{Domain, Position};
use crate::grid::Grid;

/// Distance plus a penalty for the terrain crossed on the way.
///
/// The cost of an agent/cell pair is `distance + weight * climb`, where
/// `climb` is the total absolute elevation change met along the straight
/// segment between them. On flat terrain, or with a zero weight, this is the
/// distance model. Costs beyond `f64::MAX` saturate there.
#[derive(Clone, Debug)]
pub struct TopographyCost {
    grid: Grid,
    elevation: Vec<f64>,
    weight: f64,
    samples_per_cell: u32,
}

impl TopographyCost {
    /// `terrain_map` holds one row of elevations per grid row, `nx` values each.
    pub fn new(
        grid: &Grid,
        terrain_map: &[Vec<f64>],
        weight: f64,
        samples_per_cell: u32,
    ) -> Result<Self, Error> {
        check_weight(weight)?;
        if samples_per_cell == 0 {
            return Err(ConfigurationError::NotPositive("samples_per_cell").into());
        }

        let (nx, ny) = grid.shape();
        let cols = terrain_map.first().map_or(0, Vec::len);
        if terrain_map.iter().any(|row| row.len() != cols) {
            return Err(ConfigurationError::RaggedRows("terrain_map").into());
        }
        if (cols, terrain_map.len()) != (nx, ny) {
            return Err(ConfigurationError::ShapeMismatch {
                name: "terrain_map",
                expected: (nx, ny),
                actual: (cols, terrain_map.len()),
            }
            .into());
        }
        let elevation: Vec<f64> = terrain_map.iter().flatten().cloned().collect();
        if elevation.iter().any(|h| !h.is_finite()) {
            return Err(ConfigurationError::NonFinite("terrain_map").into());
        }

        Ok(Self {
            grid: grid.clone(),
            elevation,
            weight,
            samples_per_cell,
        })
    }

    /// Total absolute elevation change along the segment from `from` to `to`,
    /// saturated at `f64::MAX`.
    pub fn climb(&self, from: &Position, to: &Position) -> f64 {
        let mut heights = path_samples(*from, *to, self.grid.spacing(), self.samples_per_cell)
            .map(|p| self.grid.sample(&self.elevation, &p));
        let Some(first) = heights.next() else {
            return 0.0;
        };
        let climb = heights
            .fold((0.0, first), |(climb, previous), h| (climb + (h - previous).abs(), h))
            .0;
        saturate(climb)
    }
}

pub(crate) fn check_weight(weight: f64) -> Result<(), Error> {
    if !weight.is_finite() {
        return Err(ConfigurationError::NonFinite("weight").into());
    }
    if weight < 0.0 {
        return Err(ConfigurationError::Negative("weight").into());
    }
    Ok(())
}

impl CostModel for TopographyCost {
    fn name(&self) -> &'static str {
        "topography_dependent"
    }

    fn evaluate(&self, agent: &Position, cell: &Position) -> f64 {
        let (agent, cell) = clamp_query(&self.grid.domain(), self.name(), agent, cell);
        saturate(agent.distance(&cell) + self.weight * self.climb(&agent, &cell))
    }

    fn domain(&self) -> Domain {
        self.grid.domain()
    }

    fn grid_shape(&self) -> Option<(usize, usize)> {
        Some(self.grid.shape())
    }
}
