//! Sequential union-find used for spanning-forest construction.
//!
//! Path-halving find with union by rank. The splitter runs single-threaded,
//! so no synchronisation is required.

pub(crate) struct UnionFind {
    parents: Vec<usize>,
    ranks: Vec<u8>,
    components: usize,
}

impl UnionFind {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            parents: (0..node_count).collect(),
            ranks: vec![0; node_count],
            components: node_count,
        }
    }

    pub(crate) fn components(&self) -> usize {
        self.components
    }

    pub(crate) fn find(&mut self, node: usize) -> usize {
        let mut current = node;
        while self.parents[current] != current {
            let grandparent = self.parents[self.parents[current]];
            self.parents[current] = grandparent;
            current = grandparent;
        }
        current
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `false` when both already share a root, i.e. adding the edge
    /// `(left, right)` would close a cycle.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }

        let (parent, child) = match self.ranks[left_root].cmp(&self.ranks[right_root]) {
            std::cmp::Ordering::Greater => (left_root, right_root),
            std::cmp::Ordering::Less => (right_root, left_root),
            std::cmp::Ordering::Equal => {
                self.ranks[left_root] += 1;
                (left_root, right_root)
            }
        };
        self.parents[child] = parent;
        self.components -= 1;
        true
    }
}
