use crate::builder::{tokenize, GraphBuilder};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::report::BridgeReport;
use crate::store::AdjacencyStore;
use once_cell::sync::OnceCell;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

/// Query engine over a finished adjacency store.
///
/// The store is never mutated after construction, which lets the engine
/// compute the ranking once and reuse it for every `rank` call.
pub struct WordGraph {
    store: AdjacencyStore,
    config: EngineConfig,
    pub(crate) ranks: OnceCell<Vec<f64>>,
}

impl WordGraph {
    /// Wrap a pre-built store with the default engine config
    pub fn new(store: AdjacencyStore) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
            ranks: OnceCell::new(),
        }
    }

    pub fn with_config(store: AdjacencyStore, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            ranks: OnceCell::new(),
        })
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(GraphBuilder::from_text(text))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(GraphBuilder::from_file(path)?))
    }

    pub fn store(&self) -> &AdjacencyStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Words `b` with edges `word1 -> b` and `b -> word2`, in word1's out-edge order
    pub fn bridge_words(&self, word1: &str, word2: &str) -> Vec<String> {
        let (Some(from), Some(to)) = (self.store.find(word1), self.store.find(word2)) else {
            return Vec::new();
        };

        self.store
            .successors(from)
            .into_iter()
            .filter(|&(bridge, weight)| weight > 0 && self.store.weight_between(bridge, to) > 0)
            .map(|(bridge, _)| self.store.word(bridge).to_string())
            .collect()
    }

    /// Bridge-word query with the user-facing failure modes.
    ///
    /// Empty and unknown words share one combined message, built from the
    /// inputs exactly as given.
    pub fn query_bridge_words(&self, word1: Option<&str>, word2: Option<&str>) -> BridgeReport {
        let (Some(word1), Some(word2)) = (word1, word2) else {
            return BridgeReport::NullInput;
        };

        if word1.is_empty()
            || word2.is_empty()
            || !self.store.has_node(word1)
            || !self.store.has_node(word2)
        {
            return BridgeReport::Missing {
                word1: word1.to_string(),
                word2: word2.to_string(),
            };
        }

        let word1 = word1.to_lowercase();
        let word2 = word2.to_lowercase();
        let bridges = self.bridge_words(&word1, &word2);

        if bridges.is_empty() {
            BridgeReport::NoBridge { word1, word2 }
        } else {
            BridgeReport::Found {
                word1,
                word2,
                bridges,
            }
        }
    }

    /// Rewrite `input`, inserting one random bridge word between every
    /// consecutive pair that has any.
    pub fn generate_new_text<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> String {
        let tokens = tokenize(input);
        let Some(last) = tokens.last() else {
            return String::new();
        };

        let mut output = Vec::with_capacity(tokens.len() * 2);
        for pair in tokens.windows(2) {
            output.push(pair[0].clone());
            let bridges = self.bridge_words(&pair[0], &pair[1]);
            if let Some(bridge) = bridges.choose(rng) {
                log::debug!("Inserting '{}' between '{}' and '{}'", bridge, pair[0], pair[1]);
                output.push(bridge.clone());
            }
        }
        output.push(last.clone());

        output.join(" ")
    }
}
