use serde::{Deserialize, Serialize};

use crate::algorithms::{ConfigurationError, Error};
use crate::geometry::{Domain, Position};
use crate::graph::{BoundaryEdge, Graph};

/// Geometry of a regular rectangular lattice of cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Centre of cell 0.
    pub origin: Position,
    pub spacing: f64,
    pub nx: usize,
    pub ny: usize,
}

/// The discretized sampling domain.
///
/// Cells are indexed row-major (`row * nx + col`); an index addresses the same
/// physical cell for as long as the grid lives.
#[derive(Clone, Debug)]
pub struct Grid {
    spec: GridSpec,
    adjacency: Graph,
}

impl Grid {
    pub fn new(origin: Position, spacing: f64, nx: usize, ny: usize) -> Result<Self, Error> {
        Self::from_spec(GridSpec {
            origin,
            spacing,
            nx,
            ny,
        })
    }

    pub fn from_spec(spec: GridSpec) -> Result<Self, Error> {
        if !spec.origin.is_finite() {
            return Err(ConfigurationError::NonFinite("origin").into());
        }
        if !spec.spacing.is_finite() {
            return Err(ConfigurationError::NonFinite("spacing").into());
        }
        if spec.spacing <= 0.0 {
            return Err(ConfigurationError::NotPositive("spacing").into());
        }
        Ok(Self {
            adjacency: Graph::lattice(spec.nx, spec.ny, spec.spacing),
            spec,
        })
    }

    /// `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.spec.nx, self.spec.ny)
    }

    pub fn spacing(&self) -> f64 {
        self.spec.spacing
    }

    pub fn len(&self) -> usize {
        self.spec.nx * self.spec.ny
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Centre of the cell at `index`.
    pub fn position(&self, index: usize) -> Position {
        debug_assert!(index < self.len());
        let col = index % self.spec.nx;
        let row = index / self.spec.nx;
        Position::new(
            self.spec.origin.x + col as f64 * self.spec.spacing,
            self.spec.origin.y + row as f64 * self.spec.spacing,
        )
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        (0..self.len()).map(|index| self.position(index))
    }

    /// Bounding box of the cell centres. Positions are clamped into it.
    pub fn domain(&self) -> Domain {
        let nx = self.spec.nx.max(1) - 1;
        let ny = self.spec.ny.max(1) - 1;
        let min = self.spec.origin;
        let max = Position::new(
            min.x + nx as f64 * self.spec.spacing,
            min.y + ny as f64 * self.spec.spacing,
        );
        Domain { min, max }
    }

    /// 4-neighbourhood adjacency of the cells.
    pub fn adjacency(&self) -> &Graph {
        &self.adjacency
    }

    /// The face separating the two cells of a boundary edge, as a line segment.
    ///
    /// Renderers draw partition outlines from these. `None` if the two cells
    /// are not lattice neighbours.
    pub fn edge_segment(&self, edge: &BoundaryEdge) -> Option<(Position, Position)> {
        if edge.0 >= self.len() || edge.1 >= self.len() {
            return None;
        }
        self.adjacency.get_edge_weight(edge.0, edge.1)?;
        let a = self.position(edge.0);
        let b = self.position(edge.1);
        let mid = a.lerp(&b, 0.5);
        let half = self.spec.spacing / 2.0;
        let segment = if a.y == b.y {
            (Position::new(mid.x, mid.y - half), Position::new(mid.x, mid.y + half))
        } else {
            (Position::new(mid.x - half, mid.y), Position::new(mid.x + half, mid.y))
        };
        Some(segment)
    }

    /// Bilinear interpolation of per-cell `values` at `position`.
    ///
    /// `position` is clamped to the domain first. `values` must hold one entry
    /// per cell.
    pub fn sample(&self, values: &[f64], position: &Position) -> f64 {
        debug_assert_eq!(values.len(), self.len());
        let (nx, ny) = self.shape();
        let p = self.domain().clamp(position).position;

        let fx = (p.x - self.spec.origin.x) / self.spec.spacing;
        let fy = (p.y - self.spec.origin.y) / self.spec.spacing;
        let (c0, c1, tx) = bracket(fx, nx);
        let (r0, r1, ty) = bracket(fy, ny);

        let at = |row: usize, col: usize| values[row * nx + col];
        let bottom = at(r0, c0) * (1.0 - tx) + at(r0, c1) * tx;
        let top = at(r1, c0) * (1.0 - tx) + at(r1, c1) * tx;
        bottom * (1.0 - ty) + top * ty
    }
}

// Lower and upper lattice index around a fractional coordinate, and the weight
// of the upper one.
fn bracket(f: f64, n: usize) -> (usize, usize, f64) {
    let last = n.saturating_sub(1);
    let f = f.clamp(0.0, last as f64);
    let lower = (f.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    (lower, upper, f - lower as f64)
}
