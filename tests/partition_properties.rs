use proptest::prelude::*;
use sampling_partition::cost::{DistanceCost, TopographyCost};
use sampling_partition::graph::BoundaryEdge;
use sampling_partition::{partition, CostModel, Error, Grid, InvalidInput, Position};

fn grid(nx: usize, ny: usize) -> Grid {
    Grid::new(Position::new(0.0, 0.0), 1.0, nx, ny).unwrap()
}

// Unit-square fractions scaled onto the grid's domain.
fn place(grid: &Grid, fractions: &[(f64, f64)]) -> Vec<Position> {
    let domain = grid.domain();
    fractions
        .iter()
        .map(|(fx, fy)| {
            Position::new(
                domain.min.x + fx * (domain.max.x - domain.min.x),
                domain.min.y + fy * (domain.max.y - domain.min.y),
            )
        })
        .collect()
}

fn check_boundary(grid: &Grid, assignment: &[usize], edges: &[BoundaryEdge]) {
    for BoundaryEdge(a, b) in edges {
        assert!(a < b);
        assert_ne!(assignment[*a], assignment[*b]);
        assert!(grid.adjacency().get_edge_weight(*a, *b).is_some());
    }
    for cell in 0..grid.len() {
        for (neighbor, _) in grid.adjacency().neighbors(cell) {
            let edge = BoundaryEdge::new(cell, neighbor);
            let differs = assignment[cell] != assignment[neighbor];
            assert_eq!(edges.binary_search(&edge).is_ok(), differs);
        }
    }
}

proptest! {
    #[test]
    fn every_cell_gets_one_agent_in_range(
        nx in 1usize..12,
        ny in 1usize..12,
        fractions in prop::collection::vec((0.0..=1.0f64, 0.0..=1.0f64), 1..6),
    ) {
        let grid = grid(nx, ny);
        let agents = place(&grid, &fractions);
        let model = DistanceCost::new(grid.domain());

        let result = partition(&agents, &grid, &model).unwrap();

        prop_assert_eq!(result.assignment().len(), grid.len());
        prop_assert!(result.assignment().iter().all(|agent| *agent < agents.len()));
    }

    #[test]
    fn identical_inputs_give_identical_results(
        nx in 1usize..10,
        ny in 1usize..10,
        fractions in prop::collection::vec((0.0..=1.0f64, 0.0..=1.0f64), 1..6),
        terrain_seed in prop::collection::vec(0.0..10.0f64, 100),
        weight in 0.0..3.0f64,
    ) {
        let grid = grid(nx, ny);
        let agents = place(&grid, &fractions);
        let terrain: Vec<Vec<f64>> = (0..ny)
            .map(|row| (0..nx).map(|col| terrain_seed[row * nx + col]).collect())
            .collect();
        let model = TopographyCost::new(&grid, &terrain, weight, 2).unwrap();

        let first = partition(&agents, &grid, &model).unwrap();
        let second = partition(&agents, &grid, &model).unwrap();

        prop_assert_eq!(&first, &second);
        check_boundary(&grid, first.assignment(), first.boundary_edges());
    }

    #[test]
    fn boundary_edges_separate_exactly_the_differing_neighbours(
        nx in 1usize..12,
        ny in 1usize..12,
        fractions in prop::collection::vec((0.0..=1.0f64, 0.0..=1.0f64), 1..8),
    ) {
        let grid = grid(nx, ny);
        let agents = place(&grid, &fractions);
        let model = DistanceCost::new(grid.domain());

        let result = partition(&agents, &grid, &model).unwrap();

        check_boundary(&grid, result.assignment(), result.boundary_edges());
    }

    #[test]
    fn moving_closer_never_loses_a_cell(
        nx in 1usize..12,
        ny in 1usize..12,
        fractions in prop::collection::vec((0.0..=1.0f64, 0.0..=1.0f64), 2..6),
        mover_pick in any::<prop::sample::Index>(),
        cell_pick in any::<prop::sample::Index>(),
        step in 0.05..=1.0f64,
    ) {
        let grid = grid(nx, ny);
        let mut agents = place(&grid, &fractions);
        let model = DistanceCost::new(grid.domain());
        let before = partition(&agents, &grid, &model).unwrap();

        // Pick a cell the mover owns before it moves.
        let mover = mover_pick.index(agents.len());
        let owned: Vec<usize> = before.cells_of(mover).collect();
        prop_assume!(!owned.is_empty());
        let cell = owned[cell_pick.index(owned.len())];

        agents[mover] = agents[mover].lerp(&grid.position(cell), step);
        let after = partition(&agents, &grid, &model).unwrap();

        prop_assert_eq!(after.agent_of(cell), Some(mover));
    }

    #[test]
    fn distance_cost_is_symmetric_and_non_negative(
        ax in -5.0..15.0f64, ay in -5.0..15.0f64,
        bx in -5.0..15.0f64, by in -5.0..15.0f64,
    ) {
        let grid = grid(11, 11);
        let model = DistanceCost::new(grid.domain());
        let a = Position::new(ax, ay);
        let b = Position::new(bx, by);

        let forward = model.evaluate(&a, &b);

        prop_assert!(forward.is_finite() && forward >= 0.0);
        prop_assert_eq!(forward, model.evaluate(&b, &a));
    }
}

#[test]
fn two_agents_on_a_line_of_eleven_cells() {
    // Arrange
    let grid = grid(11, 1);
    let model = DistanceCost::new(grid.domain());
    let agents = [Position::new(0.0, 0.0), Position::new(10.0, 0.0)];

    // Act
    let result = partition(&agents, &grid, &model).unwrap();

    // Assert
    assert_eq!(result.assignment(), &[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
    assert_eq!(result.boundary_edges(), &[BoundaryEdge(5, 6)]);
}

#[test]
fn empty_agent_list_is_rejected() {
    let grid = grid(11, 1);
    let model = DistanceCost::new(grid.domain());

    let result = partition(&[], &grid, &model);

    assert!(matches!(result, Err(Error::InvalidInput(InvalidInput::NoAgents))));
}

#[test]
fn partitions_run_concurrently() {
    // Arrange
    let grid = grid(30, 30);
    let model = DistanceCost::new(grid.domain());
    let agents = [
        Position::new(3.0, 3.0),
        Position::new(25.0, 4.0),
        Position::new(12.0, 27.0),
    ];
    let expected = partition(&agents, &grid, &model).unwrap();

    // Act
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| partition(&agents, &grid, &model).unwrap()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    // Assert
    for result in results {
        assert_eq!(result, expected);
    }
}
