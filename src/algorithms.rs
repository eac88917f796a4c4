use thiserror::Error;

use crate::geometry::Domain;

mod voronoi;

pub use voronoi::{partition, PartitionMetadata, PartitionResult, VoronoiPartitioner};

/// Reasons a cost model or domain refuses its configuration.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// A parameter the selected variant requires was not supplied.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A per-cell map does not cover the grid it is used with.
    #[error("`{name}` has shape {actual:?} but the grid is {expected:?} (nx, ny)")]
    ShapeMismatch {
        name: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A per-cell array does not hold one entry per grid cell.
    #[error("`{name}` has {actual} entries but the grid has {expected} cells")]
    LenMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Rows of a per-cell map do not all have the same length.
    #[error("`{0}` has rows of differing length")]
    RaggedRows(&'static str),

    #[error("`{0}` contains a non-finite value")]
    NonFinite(&'static str),

    #[error("`{0}` must not be negative")]
    Negative(&'static str),

    #[error("`{0}` must be strictly positive")]
    NotPositive(&'static str),

    #[error("domain lower bound exceeds upper bound")]
    InvertedBounds,

    #[error("a composite cost model needs at least one component")]
    EmptyComposite,

    /// Parts of one model were built for different domains.
    #[error("`{name}` were built for different domains: {expected:?} and {actual:?}")]
    DomainMismatch {
        name: &'static str,
        expected: Domain,
        actual: Domain,
    },
}

/// Reasons a partitioning run refuses its inputs.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum InvalidInput {
    #[error("no agents to partition the domain among")]
    NoAgents,

    #[error("the grid has no cells")]
    EmptyGrid,

    /// The cost model was built for a grid of another shape.
    #[error("cost model expects a {expected:?} grid, got {actual:?}")]
    GridShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The cost model clamps into another domain than the grid spans.
    #[error("cost model covers {expected:?}, the grid spans {actual:?}")]
    DomainMismatch { expected: Domain, actual: Domain },

    /// Input sets don't have matching lengths.
    #[error("input sets don't have the same length (expected {expected} items, got {actual})")]
    InputLenMismatch { expected: usize, actual: usize },

    #[error("agent {0} has a non-finite position")]
    NonFiniteAgent(usize),

    #[error("field estimate contains a non-finite or negative value at cell {0}")]
    InvalidField(usize),
}

/// Common errors of the crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
