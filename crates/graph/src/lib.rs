//! # wordlink graph
//!
//! Weighted word-adjacency graph built from free text, plus the queries that
//! run over it.
//!
//! ## Architecture
//!
//! ```text
//! raw text
//!     │
//!     ├──> Builder (letters-only tokens, lowercase)
//!     │
//!     ├──> Adjacency Store (petgraph)
//!     │      ├─ Nodes: words
//!     │      └─ Edges: word -> next word, weight = co-occurrence count
//!     │
//!     └──> WordGraph engine
//!            ├─ Bridge words / bridge-augmented text
//!            ├─ All shortest paths (cost = 1 / weight, ties kept)
//!            ├─ PageRank seeded by a TF-IDF-like prior
//!            ├─ Random walk
//!            └─ DOT export for rendering
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wordlink_graph::WordGraph;
//!
//! let graph = WordGraph::from_text("to explore strange new worlds, to seek out new life");
//! assert_eq!(
//!     graph.query_bridge_words(Some("explore"), Some("new")).to_string(),
//!     "The bridge words from explore to new are: strange."
//! );
//! println!("{}", graph.shortest_paths("to", "life"));
//! ```

mod builder;
mod config;
pub mod dot;
mod error;
mod graph;
mod paths;
mod rank;
mod report;
mod store;
mod walk;

pub use builder::{tokenize, GraphBuilder};
pub use config::EngineConfig;
pub use error::{GraphError, Result};
pub use graph::WordGraph;
pub use paths::ShortestPaths;
pub use report::{BridgeReport, PathReport, PathSet, WalkReport};
pub use store::AdjacencyStore;
