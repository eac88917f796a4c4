use serde::{Deserialize, Serialize};

use crate::algorithms::{ConfigurationError, Error};
use crate::cost::{
    CompositeCost, CostModel, DistanceCost, TopographyCost, UncertaintyCost,
    DEFAULT_SAMPLES_PER_CELL,
};
use crate::field::FieldEstimate;
use crate::grid::Grid;

fn default_samples_per_cell() -> u32 {
    DEFAULT_SAMPLES_PER_CELL
}

fn default_weight() -> f64 {
    1.0
}

/// Static parameters of a heterogeneity cost model.
///
/// Deserialized from JSON tagged by `"model"`, for example
/// `{"model": "topography_dependent", "terrain_map": [[0.0, 1.0]], "weight": 0.5}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum HeterogeneityParams {
    #[default]
    Distance,
    TopographyDependent {
        /// Elevation per cell, one row per grid row.
        #[serde(default)]
        terrain_map: Option<Vec<Vec<f64>>>,
        #[serde(default = "default_weight")]
        weight: f64,
        #[serde(default = "default_samples_per_cell")]
        samples_per_cell: u32,
    },
    UncertaintyDependent {
        #[serde(default = "default_weight")]
        weight: f64,
        #[serde(default = "default_samples_per_cell")]
        samples_per_cell: u32,
    },
    Composite {
        components: Vec<WeightedParams>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedParams {
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub params: HeterogeneityParams,
}

impl HeterogeneityParams {
    /// Whether building this model needs a field estimate.
    pub fn needs_field(&self) -> bool {
        match self {
            HeterogeneityParams::UncertaintyDependent { .. } => true,
            HeterogeneityParams::Composite { components } => {
                components.iter().any(|component| component.params.needs_field())
            }
            _ => false,
        }
    }

    /// Constructs the cost model these parameters describe for `grid`.
    ///
    /// `field` is only read by uncertainty-dependent models.
    pub fn build(
        &self,
        grid: &Grid,
        field: Option<&FieldEstimate>,
    ) -> Result<Box<dyn CostModel>, Error> {
        let model: Box<dyn CostModel> = match self {
            HeterogeneityParams::Distance => Box::new(DistanceCost::new(grid.domain())),
            HeterogeneityParams::TopographyDependent {
                terrain_map,
                weight,
                samples_per_cell,
            } => {
                let terrain_map = terrain_map
                    .as_ref()
                    .ok_or(ConfigurationError::MissingParameter("terrain_map"))?;
                Box::new(TopographyCost::new(grid, terrain_map, *weight, *samples_per_cell)?)
            }
            HeterogeneityParams::UncertaintyDependent {
                weight,
                samples_per_cell,
            } => {
                let field = field.ok_or(ConfigurationError::MissingParameter("field_estimate"))?;
                Box::new(UncertaintyCost::new(grid, field, *weight, *samples_per_cell)?)
            }
            HeterogeneityParams::Composite { components } => {
                let components = components
                    .iter()
                    .map(|component| -> Result<(f64, Box<dyn CostModel>), Error> {
                        Ok((component.weight, component.params.build(grid, field)?))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                Box::new(CompositeCost::new(components)?)
            }
        };
        tracing::debug!(model = model.name(), "built cost model");
        Ok(model)
    }
}
