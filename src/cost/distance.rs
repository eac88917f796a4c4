use crate::cost::{clamp_query, saturate, CostModel};
use crate::geometry::{Domain, Position};

/// Straight-line distance. Partitions under this model are plain Voronoi cells.
#[derive(Clone, Debug)]
pub struct DistanceCost {
    domain: Domain,
}

impl DistanceCost {
    pub fn new(domain: Domain) -> Self {
        Self { domain }
    }
}

impl CostModel for DistanceCost {
    fn name(&self) -> &'static str {
        "distance"
    }

    fn evaluate(&self, agent: &Position, cell: &Position) -> f64 {
        let (agent, cell) = clamp_query(&self.domain, self.name(), agent, cell);
        saturate(agent.distance(&cell))
    }

    fn domain(&self) -> Domain {
        self.domain
    }
}
