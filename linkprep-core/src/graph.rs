//! Sparse undirected graph representation.
//!
//! [`SparseGraph`] stores a symmetric, binary adjacency structure in CSR
//! form. Construction accepts any pair list (asymmetric, duplicated, with
//! self-loops) and normalises it: both orientations are materialised, the
//! mirrored list is sorted in parallel and deduplicated, and self-loops are
//! dropped.

use rayon::prelude::*;
use thiserror::Error;

use crate::key::{EdgeKey, MAX_NODE_COUNT};

/// Errors returned while building a [`SparseGraph`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// The requested node count exceeds the edge-key packing range.
    #[error("node count {node_count} exceeds the supported maximum {max}", max = MAX_NODE_COUNT)]
    NodeCountOverflow {
        /// The node count supplied by the caller.
        node_count: usize,
    },
    /// An edge referenced a node id outside `0..node_count`.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node id referenced by an edge.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
}

impl GraphError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::NodeCountOverflow { .. } => GraphErrorCode::NodeCountOverflow,
            Self::InvalidNodeId { .. } => GraphErrorCode::InvalidNodeId,
        }
    }
}

/// Machine-readable error codes for [`GraphError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphErrorCode {
    /// The requested node count exceeds the edge-key packing range.
    NodeCountOverflow,
    /// An edge referenced a node id outside the graph.
    InvalidNodeId,
}

impl GraphErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NodeCountOverflow => "GRAPH_NODE_COUNT_OVERFLOW",
            Self::InvalidNodeId => "GRAPH_INVALID_NODE_ID",
        }
    }
}

/// Symmetric, binary adjacency over nodes `0..node_count`.
///
/// # Examples
/// ```
/// use linkprep_core::SparseGraph;
///
/// let graph = SparseGraph::from_edges(3, &[(0, 1), (1, 0), (1, 2), (2, 2)])
///     .expect("edges are in range");
/// assert_eq!(graph.edge_count(), 2);
/// assert!(graph.has_edge(0, 1));
/// assert!(!graph.has_edge(0, 2));
/// assert_eq!(graph.degree(1), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseGraph {
    offsets: Vec<usize>,
    neighbours: Vec<usize>,
    edge_count: usize,
}

impl SparseGraph {
    /// Builds a graph from an arbitrary undirected pair list.
    ///
    /// The input is symmetrised and binarised: orientation and multiplicity
    /// are ignored, and self-loops are discarded.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeCountOverflow`] when `node_count` exceeds
    /// [`MAX_NODE_COUNT`] and [`GraphError::InvalidNodeId`] when an edge
    /// endpoint lies outside `0..node_count`.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        if node_count > MAX_NODE_COUNT {
            return Err(GraphError::NodeCountOverflow { node_count });
        }
        for &(u, v) in edges {
            let out_of_range = [u, v].into_iter().find(|&node| node >= node_count);
            if let Some(node) = out_of_range {
                return Err(GraphError::InvalidNodeId { node, node_count });
            }
        }

        let mut mirrored: Vec<(usize, usize)> = edges
            .iter()
            .filter(|(u, v)| u != v)
            .flat_map(|&(u, v)| [(u, v), (v, u)])
            .collect();
        mirrored.par_sort_unstable();
        mirrored.dedup();

        let mut offsets = vec![0_usize; node_count + 1];
        for &(u, _) in &mirrored {
            offsets[u + 1] += 1;
        }
        for node in 0..node_count {
            offsets[node + 1] += offsets[node];
        }
        let neighbours = mirrored.into_iter().map(|(_, v)| v).collect::<Vec<_>>();
        let edge_count = neighbours.len() / 2;

        Ok(Self {
            offsets,
            neighbours,
            edge_count,
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of undirected edges.
    #[rustfmt::skip]
    #[must_use]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the degree of `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Returns the sorted neighbour list of `node`.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        &self.neighbours[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Tests edge membership via binary search on the neighbour list.
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.node_count() && self.neighbours(u).binary_search(&v).is_ok()
    }

    /// Iterates the undirected edge set in canonical `u < v` order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count()).flat_map(move |u| {
            self.neighbours(u)
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    /// Collects the canonical edge set as sorted [`EdgeKey`]s.
    #[must_use]
    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges().map(|(u, v)| EdgeKey::encode(u, v)).collect()
    }

    /// Returns the flattened endpoint table.
    ///
    /// Each node appears once per incident edge, so drawing a uniform slot
    /// from this table selects a node with probability proportional to its
    /// degree.
    #[rustfmt::skip]
    #[must_use]
    pub fn endpoint_table(&self) -> &[usize] { &self.neighbours }
}
