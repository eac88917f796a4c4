// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator};
use rayon::iter::ParallelIterator as _;
use serde::Serialize;
use sprs::{CsMat, TriMat};

/// An undirected adjacency between two cells assigned to different agents.
///
/// The lower cell index always comes first, so an edge has exactly one
/// representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BoundaryEdge(pub usize, pub usize);

impl BoundaryEdge {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn contains(&self, cell: usize) -> bool {
        self.0 == cell || self.1 == cell
    }
}

/// Cell adjacency of a grid.
#[derive(Clone, Debug)]
pub struct Graph {
    /// The adjacency stored as a symmetric sparse matrix in CSR format. The
    /// weight of an entry is the length of the face both cells share.
    graph_csr: CsMat<f64>,
}

impl Graph {
    /// The 4-neighbourhood adjacency of a row-major `nx` by `ny` lattice.
    ///
    /// Diagonal neighbours are not connected: two cells touching only at a
    /// corner share no face and never form a boundary edge.
    pub fn lattice(nx: usize, ny: usize, spacing: f64) -> Self {
        let n = nx * ny;
        let mut triplets = TriMat::new((n, n));
        for row in 0..ny {
            for col in 0..nx {
                let vertex = row * nx + col;
                if col + 1 < nx {
                    triplets.add_triplet(vertex, vertex + 1, spacing);
                    triplets.add_triplet(vertex + 1, vertex, spacing);
                }
                if row + 1 < ny {
                    triplets.add_triplet(vertex, vertex + nx, spacing);
                    triplets.add_triplet(vertex + nx, vertex, spacing);
                }
            }
        }
        Self {
            graph_csr: triplets.to_csr(),
        }
    }

    /// The number of vertices in the graph.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.graph_csr.rows(), self.graph_csr.cols());
        self.graph_csr.rows()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An iterator over the neighbors of the given vertex and the weights of
    /// the connecting edges.
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let indptr = self.graph_csr.indptr().into_raw_storage();
        let (start, end) = (indptr[vertex], indptr[vertex + 1]);
        self.graph_csr.indices()[start..end]
            .iter()
            .cloned()
            .zip(self.graph_csr.data()[start..end].iter().cloned())
    }

    /// Get edge weight for a pair of vertices.
    pub fn get_edge_weight(&self, vertex1: usize, vertex2: usize) -> Option<f64> {
        self.graph_csr.get(vertex1, vertex2).cloned()
    }

    /// Every adjacent pair of vertices assigned to different parts, sorted and
    /// without duplicates.
    pub fn boundary_edges(&self, partition: &[usize]) -> Vec<BoundaryEdge> {
        debug_assert_eq!(self.len(), partition.len());

        let indptr = self.graph_csr.indptr().into_raw_storage();
        let indices = self.graph_csr.indices();
        let mut edges: Vec<BoundaryEdge> = indptr
            .par_iter()
            .zip(&indptr[1..])
            .enumerate()
            .flat_map_iter(|(vertex, (start, end))| {
                let vertex_part = partition[vertex];
                // Only look at lower neighbours so each edge is visited once.
                indices[*start..*end]
                    .iter()
                    .take_while(move |neighbor| **neighbor < vertex)
                    .filter(move |neighbor| partition[**neighbor] != vertex_part)
                    .map(move |neighbor| BoundaryEdge::new(*neighbor, vertex))
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// The edge cut of a partition.
    ///
    /// The total weight of the edges that link vertices of different parts.
    /// On a lattice graph this is the length of the partition outlines.
    pub fn edge_cut(&self, partition: &[usize]) -> f64 {
        debug_assert_eq!(self.len(), partition.len());

        let indptr = self.graph_csr.indptr().into_raw_storage();
        let indices = self.graph_csr.indices();
        let data = self.graph_csr.data();
        indptr
            .par_iter()
            .zip(&indptr[1..])
            .enumerate()
            .map(|(vertex, (start, end))| {
                let neighbors = &indices[*start..*end];
                let edge_weights = &data[*start..*end];
                let vertex_part = partition[vertex];
                neighbors
                    .iter()
                    .zip(edge_weights)
                    .take_while(|(neighbor, _edge_weight)| **neighbor < vertex)
                    .filter(|(neighbor, _edge_weight)| vertex_part != partition[**neighbor])
                    .map(|(_neighbor, edge_weight)| *edge_weight)
                    .sum::<f64>()
            })
            .sum()
    }
}
