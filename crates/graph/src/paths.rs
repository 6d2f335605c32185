//! All-shortest-paths search.
//!
//! A Dijkstra variant that keeps every tied-shortest route instead of a single
//! predecessor. Edge cost is `1 / weight`, so frequent word pairs are cheap
//! hops. Ties are detected by exact equality of the accumulated `f64` sums;
//! when three or more routes merge, rounding can split what would be an exact
//! tie in real arithmetic.

use crate::graph::WordGraph;
use crate::report::{PathReport, PathSet};
use crate::store::AdjacencyStore;
use petgraph::graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Priority-queue entry; reversed ordering turns `BinaryHeap` into a min-heap
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    node: NodeIndex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

/// Result of one single-source search
pub struct ShortestPaths<'g> {
    store: &'g AdjacencyStore,
    source: NodeIndex,
    distances: Vec<f64>,
    paths: Vec<Vec<Vec<NodeIndex>>>,
}

impl<'g> ShortestPaths<'g> {
    fn run(store: &'g AdjacencyStore, source: NodeIndex) -> Self {
        let n = store.node_count();
        let mut distances = vec![f64::INFINITY; n];
        let mut paths: Vec<Vec<Vec<NodeIndex>>> = vec![Vec::new(); n];
        let mut visited = HashSet::new();
        let mut queue = BinaryHeap::new();

        distances[source.index()] = 0.0;
        paths[source.index()].push(vec![source]);
        queue.push(Frontier {
            distance: 0.0,
            node: source,
        });

        while let Some(Frontier { node: current, .. }) = queue.pop() {
            if !visited.insert(current) {
                continue;
            }

            let current_distance = distances[current.index()];
            for (neighbor, weight) in store.successors(current) {
                let candidate = current_distance + 1.0 / f64::from(weight);
                let best = distances[neighbor.index()];

                #[allow(clippy::float_cmp)]
                let tie = candidate == best;
                if candidate < best {
                    let extended = extend_all(&paths[current.index()], neighbor);
                    distances[neighbor.index()] = candidate;
                    paths[neighbor.index()] = extended;
                    queue.push(Frontier {
                        distance: candidate,
                        node: neighbor,
                    });
                } else if tie {
                    let extended = extend_all(&paths[current.index()], neighbor);
                    paths[neighbor.index()].extend(extended);
                }
            }
        }

        log::debug!(
            "Shortest-path search from '{}' reached {} of {} words",
            store.word(source),
            paths.iter().filter(|p| !p.is_empty()).count(),
            n
        );

        Self {
            store,
            source,
            distances,
            paths,
        }
    }

    pub fn source(&self) -> &str {
        self.store.word(self.source)
    }

    /// Shortest distance to `target`, `None` when unreachable or unknown
    pub fn distance(&self, target: &str) -> Option<f64> {
        let idx = self.store.find(target)?;
        let distance = self.distances[idx.index()];
        distance.is_finite().then_some(distance)
    }

    /// Every tied-shortest path to `target`; the first entry is a valid
    /// single answer for callers that need only one.
    pub fn paths_to(&self, target: &str) -> Vec<Vec<String>> {
        self.store
            .find(target)
            .map(|idx| self.named_paths(idx))
            .unwrap_or_default()
    }

    fn named_paths(&self, target: NodeIndex) -> Vec<Vec<String>> {
        self.paths[target.index()]
            .iter()
            .map(|path| {
                path.iter()
                    .map(|&idx| self.store.word(idx).to_string())
                    .collect()
            })
            .collect()
    }

    fn path_set(&self, target: NodeIndex) -> Option<PathSet> {
        if self.paths[target.index()].is_empty() {
            return None;
        }
        Some(PathSet {
            from: self.source().to_string(),
            to: self.store.word(target).to_string(),
            distance: self.distances[target.index()],
            paths: self.named_paths(target),
        })
    }
}

fn extend_all(prefixes: &[Vec<NodeIndex>], next: NodeIndex) -> Vec<Vec<NodeIndex>> {
    prefixes
        .iter()
        .map(|prefix| {
            let mut path = Vec::with_capacity(prefix.len() + 1);
            path.extend_from_slice(prefix);
            path.push(next);
            path
        })
        .collect()
}

impl WordGraph {
    /// Run the search from `source`; `None` when the word is unknown
    pub fn all_shortest_paths(&self, source: &str) -> Option<ShortestPaths<'_>> {
        let idx = self.store().find(source)?;
        Some(ShortestPaths::run(self.store(), idx))
    }

    /// Shortest paths between two words; an empty `word2` switches to
    /// one-to-all mode.
    pub fn shortest_paths(&self, word1: &str, word2: &str) -> PathReport {
        let from = word1.to_lowercase();
        let to = word2.to_lowercase();

        let Some(source) = self.store().find(&from) else {
            return PathReport::StartNotFound { word: from };
        };
        if to.is_empty() {
            return self.shortest_paths_from_all(&from);
        }
        let Some(target) = self.store().find(&to) else {
            return PathReport::TargetNotFound { word: to };
        };

        match ShortestPaths::run(self.store(), source).path_set(target) {
            Some(set) => PathReport::Paths(set),
            None => PathReport::NoPath { from, to },
        }
    }

    /// Shortest paths from `word1` to every other word, sorted by target
    pub fn shortest_paths_from_all(&self, word1: &str) -> PathReport {
        let from = word1.to_lowercase();
        let Some(source) = self.store().find(&from) else {
            return PathReport::StartNotFound { word: from };
        };

        let mut others: Vec<NodeIndex> = self.store().indices().filter(|&i| i != source).collect();
        if others.is_empty() {
            return PathReport::NoOtherWords;
        }
        others.sort_by(|&a, &b| self.store().word(a).cmp(self.store().word(b)));

        let search = ShortestPaths::run(self.store(), source);
        let targets: Vec<PathSet> = others
            .into_iter()
            .filter_map(|target| search.path_set(target))
            .collect();

        if targets.is_empty() {
            PathReport::NoReachableTargets { from }
        } else {
            PathReport::AllTargets { from, targets }
        }
    }
}
