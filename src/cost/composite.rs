use crate::algorithms::{ConfigurationError, Error};
use crate::cost::topography::check_weight;
use crate::cost::{saturate, CostModel};
use crate::geometry::{Domain, Position};

/// A non-negative weighted sum of other cost models.
///
/// All components share one domain. Sums beyond `f64::MAX` saturate there.
#[derive(Debug)]
pub struct CompositeCost {
    components: Vec<(f64, Box<dyn CostModel>)>,
    domain: Domain,
}

impl CompositeCost {
    pub fn new(components: Vec<(f64, Box<dyn CostModel>)>) -> Result<Self, Error> {
        let Some(domain) = components.first().map(|(_, model)| model.domain()) else {
            return Err(ConfigurationError::EmptyComposite.into());
        };
        for (weight, _) in &components {
            check_weight(*weight)?;
        }

        // Every component bound to a grid must be bound to the same one.
        let mut shapes = components.iter().filter_map(|(_, model)| model.grid_shape());
        if let Some(first) = shapes.next() {
            if let Some(other) = shapes.find(|shape| *shape != first) {
                return Err(ConfigurationError::ShapeMismatch {
                    name: "components",
                    expected: first,
                    actual: other,
                }
                .into());
            }
        }
        if let Some(other) = components
            .iter()
            .map(|(_, model)| model.domain())
            .find(|other| *other != domain)
        {
            return Err(ConfigurationError::DomainMismatch {
                name: "components",
                expected: domain,
                actual: other,
            }
            .into());
        }
        Ok(Self { components, domain })
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl CostModel for CompositeCost {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn evaluate(&self, agent: &Position, cell: &Position) -> f64 {
        // Summed in component order so every robot gets the same bits.
        let sum: f64 = self
            .components
            .iter()
            .map(|(weight, model)| saturate(weight * model.evaluate(agent, cell)))
            .sum();
        saturate(sum)
    }

    fn domain(&self) -> Domain {
        self.domain
    }

    fn grid_shape(&self) -> Option<(usize, usize)> {
        self.components.iter().find_map(|(_, model)| model.grid_shape())
    }
}
