//! Word importance ranking.
//!
//! PageRank over the weighted word graph, seeded with a TF-IDF-like prior:
//! a word's prior is its total edge weight (in + out) scaled by
//! `ln(n / distinct_neighbours)`. The prior both initialises the ranks and
//! weights the teleport term. Sink mass is spread evenly over all words.

use crate::graph::WordGraph;
use crate::store::AdjacencyStore;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// TF-IDF-like prior of every node, indexed by `NodeIndex::index()`
#[allow(clippy::cast_precision_loss)]
pub(crate) fn priors(store: &AdjacencyStore) -> Vec<f64> {
    let n = store.node_count() as f64;

    store
        .indices()
        .map(|idx| {
            let inbound = store.predecessors(idx);
            let outbound = store.successors(idx);

            let weight_sum: u64 = inbound
                .iter()
                .chain(&outbound)
                .map(|&(_, weight)| u64::from(weight))
                .sum();

            let neighbours: HashSet<NodeIndex> = inbound
                .iter()
                .chain(&outbound)
                .map(|&(other, _)| other)
                .filter(|&other| other != idx)
                .collect();
            let linked = neighbours.len().max(1) as f64;

            weight_sum as f64 * (n / linked).ln()
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn compute(store: &AdjacencyStore, damping: f64, iterations: usize) -> Vec<f64> {
    let count = store.node_count();
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;

    let priors = priors(store);
    let total_prior: f64 = priors.iter().sum();

    // Zero total prior (e.g. only isolated words) falls back to uniform
    let (mut ranks, teleport): (Vec<f64>, Vec<f64>) = if total_prior == 0.0 {
        (vec![1.0 / n; count], vec![(1.0 - damping) / n; count])
    } else {
        priors
            .iter()
            .map(|p| (p / total_prior, (1.0 - damping) * (p / total_prior)))
            .unzip()
    };

    let out_weights: Vec<u64> = store.indices().map(|idx| store.out_weight(idx)).collect();
    let inbound: Vec<Vec<(NodeIndex, u32)>> =
        store.indices().map(|idx| store.predecessors(idx)).collect();

    for _ in 0..iterations {
        let sink_mass: f64 = store
            .indices()
            .filter(|idx| !store.has_successors(*idx))
            .map(|idx| ranks[idx.index()])
            .sum();

        let next: Vec<f64> = (0..count)
            .map(|v| {
                let mut contribution: f64 = inbound[v]
                    .iter()
                    .filter(|(source, _)| out_weights[source.index()] > 0)
                    .map(|&(source, weight)| {
                        let s = source.index();
                        ranks[s] * (f64::from(weight) / out_weights[s] as f64)
                    })
                    .sum();
                contribution += sink_mass / n;

                teleport[v] + damping * contribution
            })
            .collect();

        ranks = next;
    }

    log::debug!(
        "Ranked {} words over {} rounds (total mass {:.6})",
        count,
        iterations,
        ranks.iter().sum::<f64>()
    );

    ranks
}

impl WordGraph {
    fn rank_vector(&self) -> &[f64] {
        self.ranks.get_or_init(|| {
            compute(
                self.store(),
                self.config().damping_factor,
                self.config().iterations,
            )
        })
    }

    /// Importance score of `word`; 0.0 for unknown words
    pub fn rank(&self, word: &str) -> f64 {
        match self.store().find(word) {
            Some(idx) => self.rank_vector()[idx.index()],
            None => 0.0,
        }
    }

    /// Every word with its score, highest first (ties by word)
    pub fn rank_all(&self) -> Vec<(String, f64)> {
        let ranks = self.rank_vector();
        let mut ranked: Vec<(String, f64)> = self
            .store()
            .indices()
            .map(|idx| (self.store().word(idx).to_string(), ranks[idx.index()]))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn graph_of(edges: &[(&str, &str)]) -> WordGraph {
        let mut store = AdjacencyStore::new();
        for (from, to) in edges {
            store.add_edge(from, to);
        }
        WordGraph::new(store)
    }

    #[test]
    fn unknown_word_scores_zero() {
        let graph = graph_of(&[("a", "b")]);
        assert_eq!(graph.rank("missing"), 0.0);
        assert_eq!(WordGraph::new(AdjacencyStore::new()).rank("a"), 0.0);
    }

    #[test]
    fn prior_combines_weight_and_idf() {
        // a -> b (x2), b -> c, d isolated; n = 4
        let mut store = AdjacencyStore::new();
        store.add_edge("a", "b");
        store.add_edge("a", "b");
        store.add_edge("b", "c");
        store.add_node("d");

        let priors = priors(&store);
        let ln = f64::ln;
        assert!((priors[0] - 2.0 * ln(4.0)).abs() < 1e-12);
        assert!((priors[1] - 3.0 * ln(2.0)).abs() < 1e-12);
        assert!((priors[2] - 1.0 * ln(4.0)).abs() < 1e-12);
        assert_eq!(priors[3], 0.0);
    }

    #[test]
    fn first_round_uses_prior_teleport_and_sink_mass() {
        // a -> b (x2), b -> c; c is a sink, n = 3
        let mut store = AdjacencyStore::new();
        store.add_edge("a", "b");
        store.add_edge("a", "b");
        store.add_edge("b", "c");

        let ln = f64::ln;
        let prior = [2.0 * ln(3.0), 3.0 * ln(1.5), ln(3.0)];
        let total: f64 = prior.iter().sum();
        let start: Vec<f64> = prior.iter().map(|p| p / total).collect();

        let initial = compute(&store, 0.85, 0);
        for (got, want) in initial.iter().zip(&start) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }

        let sink = start[2] / 3.0;
        let expected = [
            0.15 * start[0] + 0.85 * sink,
            0.15 * start[1] + 0.85 * (start[0] + sink),
            0.15 * start[2] + 0.85 * (start[1] + sink),
        ];
        let config = EngineConfig {
            iterations: 1,
            ..Default::default()
        };
        let graph = WordGraph::with_config(store, config).unwrap();
        for (word, want) in ["a", "b", "c"].iter().zip(expected) {
            let got = graph.rank(word);
            assert!((got - want).abs() < 1e-12, "{word}: {got} != {want}");
        }

        assert!((graph.rank("a") - 0.142_026_638).abs() < 1e-8);
        assert!((graph.rank("b") - 0.523_327_163).abs() < 1e-8);
        assert!((graph.rank("c") - 0.334_646_199).abs() < 1e-8);
    }

    #[test]
    fn isolated_words_fall_back_to_uniform() {
        let mut store = AdjacencyStore::new();
        store.add_node("left");
        store.add_node("right");
        let graph = WordGraph::new(store);

        let left = graph.rank("left");
        let right = graph.rank("RIGHT");
        assert!(left.is_finite() && left > 0.0);
        assert!((left - 0.5).abs() < 1e-12);
        assert!((right - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scores_form_a_distribution() {
        let graph = WordGraph::from_text(
            "the scientist carefully analyzed the data wrote a detailed report and \
             the team requested more data so the scientist analyzed it again",
        );

        let ranked = graph.rank_all();
        let total: f64 = ranked.iter().map(|(_, score)| score).sum();
        assert!((total - 1.0).abs() < 1e-9, "total = {total}");

        for (word, score) in &ranked {
            assert!(*score > 0.0, "{word} scored {score}");
        }
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn hub_outranks_leaf() {
        let graph = graph_of(&[
            ("a", "hub"),
            ("b", "hub"),
            ("c", "hub"),
            ("hub", "a"),
            ("d", "a"),
        ]);
        assert!(graph.rank("hub") > graph.rank("d"));
        assert_eq!(graph.rank_all()[0].0, "hub");
    }

    #[test]
    fn total_mass_is_stable_across_iteration_counts() {
        let edges = [("x", "y"), ("y", "z"), ("z", "x"), ("z", "sink"), ("y", "y")];
        let mut store = AdjacencyStore::new();
        for (from, to) in edges {
            store.add_edge(from, to);
        }

        for iterations in [1, 10, 200] {
            let config = EngineConfig {
                iterations,
                ..Default::default()
            };
            let graph = WordGraph::with_config(store.clone(), config).unwrap();
            let total: f64 = graph.rank_all().iter().map(|(_, s)| s).sum();
            assert!((total - 1.0).abs() < 1e-9, "{iterations} rounds: {total}");
        }
    }

    #[test]
    fn ranking_is_computed_once() {
        let graph = graph_of(&[("a", "b"), ("b", "a")]);
        let first = graph.rank("a");
        assert!(graph.ranks.get().is_some());
        assert_eq!(graph.rank("a"), first);
    }
}
