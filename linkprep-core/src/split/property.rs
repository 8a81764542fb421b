//! Property-based tests for the splitter over generated graphs.
//!
//! Graphs are generated from a random spanning tree plus chords, so every
//! fixture is connected and the number of removable edges is known exactly.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    key::EdgeKey,
    test_utils::{component_count, random_connected_graph},
};

use super::{SplitError, TrainTestEdgeSplitter};

#[derive(Clone, Debug)]
struct SplitFixture {
    graph: crate::graph::SparseGraph,
    fraction: f64,
    seed: u64,
}

fn split_fixture_strategy() -> impl Strategy<Value = SplitFixture> {
    (
        4_usize..=48,
        0_usize..=60,
        any::<u64>(),
        0.01_f64..0.95,
        any::<u64>(),
    )
        .prop_map(|(node_count, extra_edges, graph_seed, fraction, seed)| {
            let mut rng = SmallRng::seed_from_u64(graph_seed);
            SplitFixture {
                graph: random_connected_graph(&mut rng, node_count, extra_edges),
                fraction,
                seed,
            }
        })
}

proptest! {
    #[test]
    fn split_invariants_hold_or_infeasibility_is_exact(fixture in split_fixture_strategy()) {
        let SplitFixture { graph, fraction, seed } = fixture;
        let mut rng = SmallRng::seed_from_u64(seed);

        let total = graph.edge_count();
        let forest_edges = graph.node_count() - 1;
        let removable = total - forest_edges;
        let requested = (fraction * total as f64).floor() as usize;

        match TrainTestEdgeSplitter::new(fraction).fit(&graph, &mut rng) {
            Ok(split) => {
                prop_assert!(requested <= removable);
                prop_assert_eq!(split.test_edges().len(), requested);
                prop_assert_eq!(split.train_edges().len(), total - requested);

                let train: HashSet<EdgeKey> = split
                    .train_edges()
                    .iter()
                    .map(|&(u, v)| EdgeKey::encode(u, v))
                    .collect();
                let test: HashSet<EdgeKey> = split
                    .test_edges()
                    .iter()
                    .map(|&(u, v)| EdgeKey::encode(u, v))
                    .collect();
                prop_assert!(train.is_disjoint(&test));
                prop_assert_eq!(train.len() + test.len(), total);

                prop_assert_eq!(
                    component_count(graph.node_count(), split.train_edges()),
                    1
                );
            }
            Err(SplitError::Infeasible { removable: reported, requested: wanted, .. }) => {
                prop_assert_eq!(reported, removable);
                prop_assert_eq!(wanted, requested);
                prop_assert!(requested > removable);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}
