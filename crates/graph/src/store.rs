use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use std::fmt;

/// Weighted word-adjacency graph.
///
/// Nodes are lowercase words, edge weights count how often one word directly
/// followed another. Nodes and edges keep insertion order, so every listing
/// derived from the store is deterministic for a given input.
#[derive(Debug, Clone)]
pub struct AdjacencyStore {
    /// Directed graph (word -> following word, weight = co-occurrence count)
    graph: DiGraph<String, u32>,

    /// Word -> NodeIndex mapping for fast lookup
    word_index: HashMap<String, NodeIndex>,
}

impl AdjacencyStore {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            word_index: HashMap::new(),
        }
    }

    /// Build a store by feeding every consecutive token pair as an edge
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        let mut previous: Option<NodeIndex> = None;

        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            let current = store.add_node(token);
            if let Some(prev) = previous {
                store.link(prev, current);
            }
            previous = Some(current);
        }

        store
    }

    /// Add a word node; no-op if it already exists
    pub fn add_node(&mut self, word: &str) -> NodeIndex {
        let word = word.to_lowercase();
        if let Some(&idx) = self.word_index.get(&word) {
            return idx;
        }

        let idx = self.graph.add_node(word.clone());
        self.word_index.insert(word, idx);
        idx
    }

    /// Add an edge or bump the weight of an existing one
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.link(from, to);
    }

    fn link(&mut self, from: NodeIndex, to: NodeIndex) {
        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge] += 1,
            None => {
                self.graph.add_edge(from, to, 1);
            }
        }
    }

    /// All words in insertion order
    pub fn nodes(&self) -> Vec<String> {
        self.words().map(str::to_string).collect()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .map(move |idx| self.graph[idx].as_str())
    }

    pub fn has_node(&self, word: &str) -> bool {
        self.find(word).is_some()
    }

    /// Outgoing edges of `from` as (target, weight), in edge-creation order.
    /// Unknown words yield an empty list.
    pub fn out_edges(&self, from: &str) -> Vec<(String, u32)> {
        self.find(from)
            .map(|idx| self.named(self.successors(idx)))
            .unwrap_or_default()
    }

    /// Incoming edges of `to` as (source, weight), ordered by source insertion.
    pub fn in_edges(&self, to: &str) -> Vec<(String, u32)> {
        self.find(to)
            .map(|idx| self.named(self.predecessors(idx)))
            .unwrap_or_default()
    }

    /// Edge weight, or 0 when the edge or either word is absent
    pub fn weight(&self, from: &str, to: &str) -> u32 {
        match (self.find(from), self.find(to)) {
            (Some(from), Some(to)) => self.weight_between(from, to),
            _ => 0,
        }
    }

    /// Sum of outgoing weights of `word`
    pub fn total_out_weight(&self, word: &str) -> u64 {
        self.find(word)
            .map(|idx| self.out_weight(idx))
            .unwrap_or(0)
    }

    /// Every edge as (from, to, weight), grouped by source in insertion order
    pub fn edges(&self) -> Vec<(String, String, u32)> {
        self.graph
            .node_indices()
            .flat_map(|from| {
                self.successors(from).into_iter().map(move |(to, weight)| {
                    (self.graph[from].clone(), self.graph[to].clone(), weight)
                })
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    // Index-level accessors used by the engine's inner loops.

    pub(crate) fn find(&self, word: &str) -> Option<NodeIndex> {
        self.word_index.get(&word.to_lowercase()).copied()
    }

    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub(crate) fn word(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub(crate) fn successors(&self, idx: NodeIndex) -> Vec<(NodeIndex, u32)> {
        let mut edges: Vec<_> = self
            .graph
            .edges(idx)
            .map(|e| (e.id(), e.target(), *e.weight()))
            .collect();
        edges.sort_by_key(|(id, _, _)| id.index());
        edges.into_iter().map(|(_, to, w)| (to, w)).collect()
    }

    pub(crate) fn predecessors(&self, idx: NodeIndex) -> Vec<(NodeIndex, u32)> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .filter(|e| *e.weight() > 0)
            .map(|e| (e.source(), *e.weight()))
            .collect();
        edges.sort_by_key(|(from, _)| from.index());
        edges
    }

    pub(crate) fn weight_between(&self, from: NodeIndex, to: NodeIndex) -> u32 {
        self.graph
            .find_edge(from, to)
            .map(|edge| self.graph[edge])
            .unwrap_or(0)
    }

    pub(crate) fn out_weight(&self, idx: NodeIndex) -> u64 {
        self.graph.edges(idx).map(|e| u64::from(*e.weight())).sum()
    }

    pub(crate) fn has_successors(&self, idx: NodeIndex) -> bool {
        self.graph.edges(idx).next().is_some()
    }

    fn named(&self, edges: Vec<(NodeIndex, u32)>) -> Vec<(String, u32)> {
        edges
            .into_iter()
            .map(|(idx, weight)| (self.graph[idx].clone(), weight))
            .collect()
    }
}

impl Default for AdjacencyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AdjacencyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directed Graph Structure:")?;
        for idx in self.graph.node_indices() {
            write!(f, "{} -> ", self.graph[idx])?;
            let successors = self.successors(idx);
            if successors.is_empty() {
                write!(f, "[No outgoing edges]")?;
            }
            for (i, (to, weight)) in successors.into_iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}(weight: {})", self.graph[to], weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_edge_creates_nodes_and_counts() {
        let mut store = AdjacencyStore::new();
        store.add_edge("the", "data");
        store.add_edge("The", "DATA");
        store.add_edge("data", "the");

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.weight("the", "data"), 2);
        assert_eq!(store.weight("THE", "Data"), 2);
        assert_eq!(store.weight("data", "the"), 1);
    }

    #[test]
    fn add_node_is_idempotent_and_case_insensitive() {
        let mut store = AdjacencyStore::new();
        let first = store.add_node("Word");
        let second = store.add_node("word");

        assert_eq!(first, second);
        assert_eq!(store.nodes(), vec!["word".to_string()]);
        assert!(store.has_node("WORD"));
        assert!(store.out_edges("word").is_empty());
    }

    #[test]
    fn self_edges_follow_increment_rule() {
        let mut store = AdjacencyStore::new();
        store.add_edge("echo", "echo");
        store.add_edge("echo", "echo");

        assert_eq!(store.node_count(), 1);
        assert_eq!(store.weight("echo", "echo"), 2);
        assert_eq!(store.in_edges("echo"), vec![("echo".to_string(), 2)]);
    }

    #[test]
    fn absent_words_are_never_errors() {
        let store = AdjacencyStore::new();
        assert!(store.out_edges("ghost").is_empty());
        assert!(store.in_edges("ghost").is_empty());
        assert_eq!(store.weight("ghost", "town"), 0);
        assert_eq!(store.total_out_weight("ghost"), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn out_edges_keep_creation_order() {
        let mut store = AdjacencyStore::new();
        store.add_edge("a", "zeta");
        store.add_edge("a", "beta");
        store.add_edge("a", "alpha");
        store.add_edge("a", "zeta");

        assert_eq!(
            store.out_edges("a"),
            vec![
                ("zeta".to_string(), 2),
                ("beta".to_string(), 1),
                ("alpha".to_string(), 1),
            ]
        );
        assert_eq!(store.total_out_weight("a"), 4);
    }

    #[test]
    fn in_edges_scan_all_sources() {
        let mut store = AdjacencyStore::new();
        store.add_edge("x", "hub");
        store.add_edge("y", "hub");
        store.add_edge("y", "hub");
        store.add_edge("hub", "z");

        assert_eq!(
            store.in_edges("hub"),
            vec![("x".to_string(), 1), ("y".to_string(), 2)]
        );
        assert!(store.in_edges("x").is_empty());
    }

    #[test]
    fn out_edges_are_a_copy() {
        let mut store = AdjacencyStore::new();
        store.add_edge("a", "b");
        let mut copy = store.out_edges("a");
        copy.push(("c".to_string(), 9));

        assert_eq!(store.out_edges("a").len(), 1);
        assert!(!store.has_node("c"));
    }

    #[test]
    fn from_tokens_links_consecutive_pairs() {
        let store = AdjacencyStore::from_tokens(["to", "be", "or", "not", "to", "be"]);

        assert_eq!(store.nodes(), vec!["to", "be", "or", "not"]);
        assert_eq!(store.weight("to", "be"), 2);
        assert_eq!(store.weight("be", "or"), 1);
        assert_eq!(store.weight("not", "to"), 1);
        assert_eq!(store.edge_count(), 4);
    }

    #[test]
    fn from_tokens_keeps_a_lone_word() {
        let store = AdjacencyStore::from_tokens(["alone"]);
        assert_eq!(store.nodes(), vec!["alone"]);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn edges_lists_every_triple() {
        let store = AdjacencyStore::from_tokens(["a", "b", "a", "b"]);
        assert_eq!(
            store.edges(),
            vec![
                ("a".to_string(), "b".to_string(), 2),
                ("b".to_string(), "a".to_string(), 1),
            ]
        );
    }

    #[test]
    fn display_dumps_adjacency() {
        let store = AdjacencyStore::from_tokens(["a", "b", "a", "c"]);
        assert_eq!(
            store.to_string(),
            "Directed Graph Structure:\n\
             a -> b(weight: 1), c(weight: 1)\n\
             b -> a(weight: 1)\n\
             c -> [No outgoing edges]\n"
        );
    }
}
