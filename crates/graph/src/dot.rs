//! Graphviz DOT emission. Pure text; running the renderer is the caller's job.

use crate::store::AdjacencyStore;
use std::collections::HashSet;

/// Colours cycled through when several paths are highlighted
pub const PATH_COLORS: [&str; 8] = [
    "red", "blue", "green", "orange", "purple", "cyan", "brown", "pink",
];

const HEADER: &str = "digraph G {\n    node [style=filled,fillcolor=lightgray];\n    edge [fontsize=10];\n";

fn quote(word: &str) -> String {
    format!("\"{}\"", word.replace('\\', "\\\\").replace('"', "\\\""))
}

/// The whole graph, every edge labelled with its weight
pub fn to_dot(store: &AdjacencyStore) -> String {
    let mut dot = String::from(HEADER);

    for word in store.words() {
        dot.push_str(&format!("    {};\n", quote(word)));
    }
    for (from, to, weight) in store.edges() {
        dot.push_str(&format!(
            "    {} -> {} [label=\"{}\"];\n",
            quote(&from),
            quote(&to),
            weight
        ));
    }

    dot.push('}');
    dot
}

/// The whole graph with `paths` highlighted, path `i` in `PATH_COLORS[i % 8]`.
///
/// A node or edge shared by several paths takes the colour of the first one.
pub fn to_dot_with_paths(store: &AdjacencyStore, paths: &[Vec<String>]) -> String {
    let mut dot = String::from(HEADER);

    let node_sets: Vec<HashSet<String>> = paths
        .iter()
        .map(|path| path.iter().map(|w| w.to_lowercase()).collect())
        .collect();
    let edge_sets: Vec<HashSet<(String, String)>> = paths
        .iter()
        .map(|path| {
            path.windows(2)
                .map(|hop| (hop[0].to_lowercase(), hop[1].to_lowercase()))
                .collect()
        })
        .collect();

    for word in store.words() {
        let color = node_sets
            .iter()
            .position(|set| set.contains(word))
            .map_or("lightgray", |i| PATH_COLORS[i % PATH_COLORS.len()]);
        dot.push_str(&format!("    {} [fillcolor={}];\n", quote(word), color));
    }

    for (from, to, weight) in store.edges() {
        let key = (from, to);
        let (color, penwidth) = edge_sets
            .iter()
            .position(|set| set.contains(&key))
            .map_or(("black", "1.0"), |i| {
                (PATH_COLORS[i % PATH_COLORS.len()], "2.0")
            });
        dot.push_str(&format!(
            "    {} -> {} [label=\"{}\",color={},penwidth={}];\n",
            quote(&key.0),
            quote(&key.1),
            weight,
            color,
            penwidth
        ));
    }

    if !paths.is_empty() {
        dot.push_str("    subgraph cluster_legend {\n");
        dot.push_str("        label=\"Paths\";\n");
        dot.push_str("        style=filled;\n");
        dot.push_str("        fillcolor=white;\n");
        for i in 0..paths.len() {
            dot.push_str(&format!(
                "        \"Path {}\" [fillcolor={}];\n",
                i + 1,
                PATH_COLORS[i % PATH_COLORS.len()]
            ));
        }
        dot.push_str("    }\n");
    }

    dot.push('}');
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_graph_lists_nodes_and_weighted_edges() {
        let store = AdjacencyStore::from_tokens(["a", "b", "a", "b"]);
        assert_eq!(
            to_dot(&store),
            "digraph G {\n\
             \x20   node [style=filled,fillcolor=lightgray];\n\
             \x20   edge [fontsize=10];\n\
             \x20   \"a\";\n\
             \x20   \"b\";\n\
             \x20   \"a\" -> \"b\" [label=\"2\"];\n\
             \x20   \"b\" -> \"a\" [label=\"1\"];\n\
             }"
        );
    }

    #[test]
    fn highlighted_paths_get_distinct_colours() {
        let store = AdjacencyStore::from_tokens(["a", "b", "d", "x", "a", "c", "d"]);
        let paths = vec![
            vec!["a".to_string(), "b".to_string(), "d".to_string()],
            vec!["a".to_string(), "c".to_string(), "d".to_string()],
        ];
        let dot = to_dot_with_paths(&store, &paths);

        assert!(dot.contains("\"a\" [fillcolor=red];"));
        assert!(dot.contains("\"c\" [fillcolor=blue];"));
        assert!(dot.contains("\"x\" [fillcolor=lightgray];"));
        assert!(dot.contains("\"a\" -> \"b\" [label=\"1\",color=red,penwidth=2.0];"));
        assert!(dot.contains("\"c\" -> \"d\" [label=\"1\",color=blue,penwidth=2.0];"));
        assert!(dot.contains("\"d\" -> \"x\" [label=\"1\",color=black,penwidth=1.0];"));
        assert!(dot.contains("\"Path 2\" [fillcolor=blue];"));
        assert!(dot.ends_with("    }\n}"));
    }

    #[test]
    fn colours_wrap_after_palette() {
        let store = AdjacencyStore::from_tokens(["a", "b"]);
        let paths: Vec<Vec<String>> = (0..9).map(|_| vec!["a".to_string()]).collect();
        let dot = to_dot_with_paths(&store, &paths);
        assert!(dot.contains("\"Path 9\" [fillcolor=red];"));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(quote("say\"hi"), "\"say\\\"hi\"");
    }
}
