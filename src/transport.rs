//! The seam between the partitioner and whatever moves data between robots.
//!
//! The message layer itself lives elsewhere. A [`PartitionService`] is handed
//! a sink to publish to, and callers feed it fresh agent positions and field
//! estimates as they arrive.

use std::path::PathBuf;

use crate::algorithms::{partition, ConfigurationError, Error, PartitionResult};
use crate::cost::CostModel;
use crate::field::FieldEstimate;
use crate::geometry::Position;
use crate::grid::Grid;
use crate::io::{write_boundary_edges_to_file, write_partition_data_to_file};
use crate::params::HeterogeneityParams;

/// Receives every partition the service computes.
pub trait PartitionSink {
    fn publish(
        &mut self,
        result: &PartitionResult,
        field: Option<&FieldEstimate>,
    ) -> Result<(), Error>;
}

impl<F> PartitionSink for F
where
    F: FnMut(&PartitionResult, Option<&FieldEstimate>) -> Result<(), Error>,
{
    fn publish(
        &mut self,
        result: &PartitionResult,
        field: Option<&FieldEstimate>,
    ) -> Result<(), Error> {
        self(result, field)
    }
}

/// Writes each published partition (and its outline, if a path is set) to disk,
/// replacing the previous files.
#[derive(Clone, Debug)]
pub struct FileSink {
    pub partition_file: PathBuf,
    pub boundary_file: Option<PathBuf>,
}

impl PartitionSink for FileSink {
    fn publish(&mut self, result: &PartitionResult, _field: Option<&FieldEstimate>) -> Result<(), Error> {
        write_partition_data_to_file(result.assignment(), &self.partition_file)?;
        if let Some(boundary_file) = &self.boundary_file {
            write_boundary_edges_to_file(result.boundary_edges(), boundary_file)?;
        }
        Ok(())
    }
}

/// Recomputes and publishes the partition whenever its inputs change.
pub struct PartitionService<S> {
    grid: Grid,
    params: HeterogeneityParams,
    model: Option<Box<dyn CostModel>>,
    field: Option<FieldEstimate>,
    latest: Option<PartitionResult>,
    sink: S,
}

impl<S: PartitionSink> PartitionService<S> {
    /// Models that need a field estimate are built on the first
    /// [`update_field`](Self::update_field); the others are built right away so
    /// configuration errors surface here.
    pub fn new(grid: Grid, params: HeterogeneityParams, sink: S) -> Result<Self, Error> {
        let model = if params.needs_field() {
            None
        } else {
            Some(params.build(&grid, None)?)
        };
        Ok(Self {
            grid,
            params,
            model,
            field: None,
            latest: None,
            sink,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The most recently published partition.
    pub fn latest(&self) -> Option<&PartitionResult> {
        self.latest.as_ref()
    }

    /// Stores a new field estimate and rebuilds the cost model from it.
    ///
    /// On failure the previous estimate and model stay in place.
    pub fn update_field(&mut self, field: FieldEstimate) -> Result<(), Error> {
        if field.len() != self.grid.len() {
            return Err(ConfigurationError::LenMismatch {
                name: "field_estimate",
                expected: self.grid.len(),
                actual: field.len(),
            }
            .into());
        }
        let model = self.params.build(&self.grid, Some(&field))?;
        self.model = Some(model);
        self.field = Some(field);
        Ok(())
    }

    /// Partitions the grid among `agents` and publishes the result.
    pub fn update_agents(&mut self, agents: &[Position]) -> Result<&PartitionResult, Error> {
        let model = self
            .model
            .as_deref()
            .ok_or(ConfigurationError::MissingParameter("field_estimate"))?;
        let result = partition(agents, &self.grid, model)?;
        self.sink.publish(&result, self.field.as_ref())?;
        Ok(self.latest.insert(result))
    }
}
