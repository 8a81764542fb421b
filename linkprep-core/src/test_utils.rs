//! Shared graph fixtures and invariant checkers for tests.

use rand::{Rng, rngs::SmallRng, seq::SliceRandom};

use crate::{graph::SparseGraph, split::UnionFind};

pub(crate) fn path_graph(node_count: usize) -> SparseGraph {
    let edges: Vec<_> = (1..node_count).map(|v| (v - 1, v)).collect();
    SparseGraph::from_edges(node_count, &edges).expect("path edges are in range")
}

pub(crate) fn triangle_graph() -> SparseGraph {
    SparseGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).expect("triangle edges are in range")
}

pub(crate) fn complete_graph(node_count: usize) -> SparseGraph {
    let mut edges = Vec::new();
    for u in 0..node_count {
        for v in (u + 1)..node_count {
            edges.push((u, v));
        }
    }
    SparseGraph::from_edges(node_count, &edges).expect("complete edges are in range")
}

/// Builds a connected graph from a random spanning tree plus `extra_edges`
/// random chords (duplicates collapse at construction).
pub(crate) fn random_connected_graph(
    rng: &mut SmallRng,
    node_count: usize,
    extra_edges: usize,
) -> SparseGraph {
    assert!(node_count >= 2, "a connected graph needs at least two nodes");

    let mut perm: Vec<usize> = (0..node_count).collect();
    perm.shuffle(rng);

    let mut edges: Vec<(usize, usize)> = (1..node_count).map(|i| (perm[i - 1], perm[i])).collect();
    for _ in 0..extra_edges {
        let u = rng.gen_range(0..node_count);
        let v = rng.gen_range(0..node_count);
        if u != v {
            edges.push((u, v));
        }
    }
    SparseGraph::from_edges(node_count, &edges).expect("generated edges are in range")
}

/// Counts connected components over the nodes touched by `edges`, treating
/// untouched nodes as absent.
pub(crate) fn component_count(node_count: usize, edges: &[(usize, usize)]) -> usize {
    let mut forest = UnionFind::new(node_count);
    let mut touched = vec![false; node_count];
    for &(u, v) in edges {
        forest.union(u, v);
        touched[u] = true;
        touched[v] = true;
    }

    let mut roots: Vec<usize> = (0..node_count)
        .filter(|&node| touched[node])
        .map(|node| forest.find(node))
        .collect();
    roots.sort_unstable();
    roots.dedup();
    roots.len()
}
