// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe
use num_traits::ToPrimitive;
use serde::Serialize;

use crate::algorithms::PartitionResult;
use crate::grid::Grid;

/// Calculates the total weight for each part of a given partition.
pub fn compute_parts_load(partition: &[usize], num_parts: usize, weights: &[f64]) -> Vec<f64> {
    let mut loads = vec![0.0; num_parts];

    for (&part, w) in partition.iter().zip(weights) {
        if part < num_parts {
            loads[part] += w;
        }
    }

    loads
}

/// Compute imbalance after passing part loads.
pub fn compute_imbalance_from_part_loads(num_parts: usize, part_loads: &[f64]) -> f64 {
    let total_weight: f64 = part_loads.iter().sum();

    let ideal_part_weight = total_weight / num_parts.to_f64().unwrap_or(1.0);
    if ideal_part_weight == 0.0 {
        return 0.0;
    }

    part_loads
        .iter()
        .map(|part_weight| (part_weight - ideal_part_weight) / ideal_part_weight)
        .fold(0.0f64, |acc, dev| acc.max(dev))
}

/// Compute the imbalance of the given partition: how far the heaviest part
/// exceeds an even share, relative to that share.
pub fn imbalance(num_parts: usize, partition: &[usize], weights: &[f64]) -> f64 {
    if num_parts == 0 {
        return 0.0;
    }

    let part_loads = compute_parts_load(partition, num_parts, weights);

    compute_imbalance_from_part_loads(num_parts, &part_loads)
}

/// Workload statistics of a partition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PartitionSummary {
    pub cells_per_agent: Vec<usize>,
    pub loads: Vec<f64>,
    pub imbalance: f64,
    /// Total length of the outlines between regions.
    pub boundary_length: f64,
}

impl PartitionSummary {
    /// `weights` holds one workload value per cell.
    pub fn from_result(result: &PartitionResult, grid: &Grid, weights: &[f64]) -> Self {
        debug_assert_eq!(weights.len(), result.cell_count());
        let num_parts = result.agent_count();
        let mut cells_per_agent = vec![0; num_parts];
        for &agent in result.assignment() {
            cells_per_agent[agent] += 1;
        }
        Self {
            cells_per_agent,
            loads: compute_parts_load(result.assignment(), num_parts, weights),
            imbalance: imbalance(num_parts, result.assignment(), weights),
            boundary_length: grid.adjacency().edge_cut(result.assignment()),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_ulps_eq;
    use itertools::assert_equal;
    use crate::algorithms::partition;
    use crate::cost::DistanceCost;
    use crate::generate::uniform_cell_weights;
    use crate::geometry::Position;
    use super::*;

    #[test]
    fn test_compute_parts_load() {
        // Arrange
        let partition = [0, 0, 1, 1];
        let cell_weights = vec![4.0, 7.0, 5.0, 2.0];
        let num_parts = 2;

        // Act
        let partition_weights = compute_parts_load(&partition, num_parts, &cell_weights);

        // Assert
        assert_equal(partition_weights, [11.0, 7.0]);
    }

    #[test]
    fn test_imbalance() {
        // Arrange
        let partition = [0, 0, 1, 1];
        let cell_weights = vec![3.0, 3.0, 2.0, 2.0];
        let num_parts = 2;

        // Act
        let imb = imbalance(num_parts, &partition, &cell_weights);

        // Assert
        assert_ulps_eq!(imb, 0.2);
    }

    #[test]
    fn test_summary_of_line_partition() {
        // Arrange
        let grid = Grid::new(Position::new(0.0, 0.0), 1.0, 11, 1).unwrap();
        let model = DistanceCost::new(grid.domain());
        let agents = [Position::new(0.0, 0.0), Position::new(10.0, 0.0)];
        let result = partition(&agents, &grid, &model).unwrap();

        // Act
        let summary = PartitionSummary::from_result(&result, &grid, &uniform_cell_weights(grid.len()));

        // Assert
        assert_eq!(summary.cells_per_agent, vec![6, 5]);
        assert_equal(summary.loads, [6.0, 5.0]);
        assert_ulps_eq!(summary.imbalance, 1.0 / 11.0);
        assert_ulps_eq!(summary.boundary_length, 1.0);
    }

    #[test]
    fn test_summary_imbalance_matches_free_function() {
        // Arrange
        let grid = Grid::new(Position::new(0.0, 0.0), 1.0, 4, 1).unwrap();
        let model = DistanceCost::new(grid.domain());
        let agents = [Position::new(0.0, 0.0), Position::new(3.0, 0.0)];
        let weights = [3.0, 3.0, 2.0, 2.0];
        let result = partition(&agents, &grid, &model).unwrap();

        // Act
        let summary = PartitionSummary::from_result(&result, &grid, &weights);

        // Assert
        assert_equal(summary.loads.iter().cloned(), [6.0, 4.0]);
        assert_ulps_eq!(summary.imbalance, imbalance(2, result.assignment(), &weights));
        assert_ulps_eq!(summary.imbalance, 0.2);
    }
}
