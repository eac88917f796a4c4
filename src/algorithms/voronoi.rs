// Generalized Voronoi partitioning: every cell goes to the agent for which the
// active cost model is lowest. The evaluation is exhaustive, O(agents * cells),
// which is fine for tens of agents over thousands of cells.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::algorithms::{Error, InvalidInput};
use crate::cost::CostModel;
use crate::geometry::Position;
use crate::graph::BoundaryEdge;
use crate::grid::Grid;

/// Diagnostic data of one partitioning run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartitionMetadata {
    /// Agents whose positions lay outside the domain and were clamped into it.
    pub clamped_agents: Vec<usize>,
}

/// The outcome of one partitioning run.
///
/// Immutable once returned; a new run with new agent positions produces a new
/// result instead of updating this one.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionResult {
    assignment: Vec<usize>,
    boundary_edges: Vec<BoundaryEdge>,
    agent_count: usize,
    clamped_agents: Vec<usize>,
}

impl PartitionResult {
    /// Agent index of every cell, indexed like the grid.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Adjacent cell pairs owned by different agents, sorted.
    pub fn boundary_edges(&self) -> &[BoundaryEdge] {
        &self.boundary_edges
    }

    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    pub fn cell_count(&self) -> usize {
        self.assignment.len()
    }

    pub fn clamped_agents(&self) -> &[usize] {
        &self.clamped_agents
    }

    pub fn agent_of(&self, cell: usize) -> Option<usize> {
        self.assignment.get(cell).copied()
    }

    /// Cells the given agent is responsible for, ascending.
    pub fn cells_of(&self, agent: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == agent)
            .map(|(cell, _)| cell)
    }

    /// Boundary edges touching the region of the given agent.
    pub fn boundary_of(&self, agent: usize) -> impl Iterator<Item = &BoundaryEdge> + '_ {
        self.boundary_edges.iter().filter(move |edge| {
            self.assignment[edge.0] == agent || self.assignment[edge.1] == agent
        })
    }

    /// The outline of every agent's region. An edge is listed under both of
    /// the agents it separates.
    pub fn boundaries_by_agent(&self) -> FxHashMap<usize, Vec<BoundaryEdge>> {
        let mut boundaries: FxHashMap<usize, Vec<BoundaryEdge>> = FxHashMap::default();
        for edge in &self.boundary_edges {
            boundaries.entry(self.assignment[edge.0]).or_default().push(*edge);
            boundaries.entry(self.assignment[edge.1]).or_default().push(*edge);
        }
        boundaries
    }
}

/// Assigns every cell to its minimum-cost agent under `model`.
pub struct VoronoiPartitioner<'m> {
    pub model: &'m dyn CostModel,
}

// Clamps agents into the grid domain once, so that evaluation never has to.
fn clamp_agents(agents: &[Position], grid: &Grid) -> Result<(Vec<Position>, Vec<usize>), Error> {
    let domain = grid.domain();
    let mut positions = Vec::with_capacity(agents.len());
    let mut clamped_agents = Vec::new();
    for (agent, position) in agents.iter().enumerate() {
        if !position.is_finite() {
            return Err(InvalidInput::NonFiniteAgent(agent).into());
        }
        let clamped = domain.clamp(position);
        if clamped.adjusted {
            tracing::warn!(
                agent,
                x = position.x,
                y = position.y,
                clamped_x = clamped.position.x,
                clamped_y = clamped.position.y,
                "agent outside domain bounds, clamped"
            );
            clamped_agents.push(agent);
        }
        positions.push(clamped.position);
    }
    Ok((positions, clamped_agents))
}

// Index of the cheapest agent for `cell`. Agents are scanned in order and only
// a strictly lower cost replaces the incumbent, so ties go to the lowest index.
fn cheapest_agent(model: &dyn CostModel, agents: &[Position], cell: &Position) -> usize {
    let mut best_agent = 0;
    let mut best_cost = f64::INFINITY;
    for (agent, position) in agents.iter().enumerate() {
        let cost = model.evaluate(position, cell);
        debug_assert!(cost.is_finite() && cost >= 0.0, "{} returned {cost}", model.name());
        if cost < best_cost {
            best_cost = cost;
            best_agent = agent;
        }
    }
    best_agent
}

fn voronoi(
    part_ids: &mut [usize],
    agents: &[Position],
    grid: &Grid,
    model: &dyn CostModel,
) -> Result<PartitionMetadata, Error> {
    if agents.is_empty() {
        return Err(InvalidInput::NoAgents.into());
    }
    if grid.is_empty() {
        return Err(InvalidInput::EmptyGrid.into());
    }
    if let Some(expected) = model.grid_shape() {
        if expected != grid.shape() {
            return Err(InvalidInput::GridShapeMismatch {
                expected,
                actual: grid.shape(),
            }
            .into());
        }
    }
    if model.domain() != grid.domain() {
        return Err(InvalidInput::DomainMismatch {
            expected: model.domain(),
            actual: grid.domain(),
        }
        .into());
    }

    let (agents, clamped_agents) = clamp_agents(agents, grid)?;

    // Each cell writes only its own slot.
    part_ids
        .par_iter_mut()
        .enumerate()
        .for_each(|(cell, part)| *part = cheapest_agent(model, &agents, &grid.position(cell)));

    Ok(PartitionMetadata { clamped_agents })
}

impl<'a, 'm> crate::Partition<(&'a [Position], &'a Grid)> for VoronoiPartitioner<'m> {
    type Metadata = PartitionMetadata;
    type Error = Error;

    fn partition(
        &mut self,
        part_ids: &mut [usize],
        (agents, grid): (&'a [Position], &'a Grid),
    ) -> Result<Self::Metadata, Self::Error> {
        if part_ids.len() != grid.len() {
            return Err(InvalidInput::InputLenMismatch {
                expected: grid.len(),
                actual: part_ids.len(),
            }
            .into());
        }
        voronoi(part_ids, agents, grid, self.model)
    }
}

/// Partitions `grid` among `agents` under `model` and extracts the outlines.
///
/// Identical inputs give identical results, which lets every robot compute the
/// partition on its own and still agree with the others.
pub fn partition(
    agents: &[Position],
    grid: &Grid,
    model: &dyn CostModel,
) -> Result<PartitionResult, Error> {
    let mut assignment = vec![0; grid.len()];
    let metadata = voronoi(&mut assignment, agents, grid, model)?;
    let boundary_edges = grid.adjacency().boundary_edges(&assignment);

    tracing::debug!(
        model = model.name(),
        agents = agents.len(),
        cells = grid.len(),
        boundary_edges = boundary_edges.len(),
        "partitioned domain"
    );

    Ok(PartitionResult {
        assignment,
        boundary_edges,
        agent_count: agents.len(),
        clamped_agents: metadata.clamped_agents,
    })
}
