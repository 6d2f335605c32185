use crate::error::{GraphError, Result};
use crate::store::AdjacencyStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static NON_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z]+").expect("static regex must compile"));

/// Split raw text into lowercase letter-only tokens.
///
/// Every run of non-letters acts as a single separator, so punctuation,
/// digits and line breaks never produce empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_LETTERS
        .replace_all(text, " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Build word graphs from text sources
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build graph from in-memory text
    pub fn from_text(text: &str) -> AdjacencyStore {
        let store = AdjacencyStore::from_tokens(tokenize(text));

        log::info!(
            "Built word graph: {} nodes, {} edges",
            store.node_count(),
            store.edge_count()
        );

        store
    }

    /// Build graph from a text file; the only fallible step of construction
    pub fn from_file(path: impl AsRef<Path>) -> Result<AdjacencyStore> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| GraphError::io(path.display().to_string(), e))?;

        log::debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(Self::from_text(&text))
    }
}

impl AdjacencyStore {
    /// Tokenize `text` and feed consecutive pairs as edges
    pub fn from_text(text: &str) -> Self {
        GraphBuilder::from_text(text)
    }
}
