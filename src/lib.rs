//! Heterogeneity-weighted partitioning of a sampling domain among robots.
//!
//! Every robot runs the same computation on the same shared inputs (agent
//! positions, the grid, a cost model) and obtains the same partition without
//! exchanging it.
pub mod algorithms;
pub mod cost;
pub mod field;
pub mod generate;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod imbalance;
pub mod io;
pub mod params;
pub mod transport;

pub use algorithms::{partition, ConfigurationError, Error, InvalidInput, PartitionResult};
pub use cost::CostModel;
pub use field::FieldEstimate;
pub use geometry::{Domain, Position};
pub use grid::Grid;
pub use params::HeterogeneityParams;

// The `Partition` trait allows for partitioning data.
// Partitioning algorithms implement this trait.
// The generic argument `M` defines the input of the algorithms (e.g. a set of
// agent positions together with the grid to divide among them).
// The output slice must have one entry per element to partition.
pub trait Partition<M> {
    // Diagnostic data returned for a specific run of the algorithm.
    type Metadata;

    // Error details, should the algorithm fail to run.
    type Error;

    // Partition the given data and output the part ID of each element in
    // `part_ids`.
    //
    // Part IDs are agent indices, so the number of parts is the number of
    // agents. An agent that wins no cell owns an empty part.
    fn partition(&mut self, part_ids: &mut [usize], data: M)
                 -> Result<Self::Metadata, Self::Error>;
}
