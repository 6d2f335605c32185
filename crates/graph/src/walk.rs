use crate::graph::WordGraph;
use crate::report::WalkReport;
use petgraph::graph::NodeIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

impl WordGraph {
    /// Walk from a uniformly random word along uniformly random out-edges.
    ///
    /// Stops at a word without out-edges, or as soon as the chosen edge has
    /// already been traversed (that edge is not followed a second time).
    pub fn random_walk<R: Rng + ?Sized>(&self, rng: &mut R) -> WalkReport {
        let store = self.store();
        let nodes: Vec<NodeIndex> = store.indices().collect();
        let Some(&start) = nodes.choose(rng) else {
            return WalkReport::Empty;
        };

        let mut current = start;
        let mut path = vec![start];
        let mut traversed: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

        loop {
            let successors = store.successors(current);
            let Some(&(next, _)) = successors.choose(rng) else {
                break;
            };
            if !traversed.insert((current, next)) {
                break;
            }
            current = next;
            path.push(next);
        }

        log::debug!(
            "Random walk from '{}' visited {} words",
            store.word(start),
            path.len()
        );

        WalkReport::Walk {
            words: path
                .into_iter()
                .map(|idx| store.word(idx).to_string())
                .collect(),
        }
    }
}
