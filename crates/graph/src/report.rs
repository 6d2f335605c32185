//! Query outcomes.
//!
//! Ordinary misuse (unknown words, empty input, unreachable targets) is never
//! an error: every query returns one of these values, and its `Display` impl
//! is the user-facing message.

use serde::Serialize;
use std::fmt;

/// Outcome of a bridge-word query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BridgeReport {
    /// One of the arguments was absent
    NullInput,

    /// Empty or unknown word; carries the inputs as given
    Missing { word1: String, word2: String },

    /// Both words known, nothing links them
    NoBridge { word1: String, word2: String },

    /// At least one bridge word, in word1's out-edge order
    Found {
        word1: String,
        word2: String,
        bridges: Vec<String>,
    },
}

impl fmt::Display for BridgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullInput => write!(f, "Error: Input words cannot be null."),
            Self::Missing { word1, word2 } => write!(f, "No {word1} or {word2} in the graph!"),
            Self::NoBridge { word1, word2 } => {
                write!(f, "No bridge words from {word1} to {word2}!")
            }
            Self::Found {
                word1,
                word2,
                bridges,
            } => {
                write!(f, "The bridge words from {word1} to {word2} are: ")?;
                let last = bridges.len().saturating_sub(1);
                for (i, bridge) in bridges.iter().enumerate() {
                    if i > 0 {
                        f.write_str(if i == last { " and " } else { ", " })?;
                    }
                    f.write_str(bridge)?;
                }
                f.write_str(".")
            }
        }
    }
}

/// Every tied-shortest path from one word to another
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSet {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub paths: Vec<Vec<String>>,
}

impl PathSet {
    fn write_block(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            writeln!(f, "{indent}{}. {}", i + 1, path.join(" -> "))?;
        }
        write!(f, "{indent}Path length: {:.4}", self.distance)
    }
}

/// Outcome of a shortest-path query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathReport {
    StartNotFound { word: String },
    TargetNotFound { word: String },
    NoPath { from: String, to: String },
    Paths(PathSet),
    /// One-to-all mode, targets in ascending word order. Each target block
    /// lists every tied shortest path, not just the first; blocks are
    /// separated by one blank line and the output has no trailing newline.
    AllTargets { from: String, targets: Vec<PathSet> },
    NoReachableTargets { from: String },
    NoOtherWords,
}

impl PathReport {
    /// Paths worth highlighting when the result is drawn
    pub fn highlighted_paths(&self) -> Vec<Vec<String>> {
        match self {
            Self::Paths(set) => set.paths.clone(),
            Self::AllTargets { targets, .. } => targets
                .iter()
                .filter_map(|set| set.paths.first().cloned())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Paths(_) | Self::AllTargets { .. })
    }
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartNotFound { word } => write!(f, "Error: Start word '{word}' not in graph."),
            Self::TargetNotFound { word } => {
                write!(f, "Error: Target word '{word}' not in graph.")
            }
            Self::NoPath { from, to } => write!(f, "No path exists from '{from}' to '{to}'."),
            Self::Paths(set) => {
                writeln!(f, "All shortest paths from '{}' to '{}':", set.from, set.to)?;
                set.write_block(f, "")
            }
            Self::AllTargets { from, targets } => {
                write!(f, "Shortest paths from '{from}' to all other words:")?;
                for (i, set) in targets.iter().enumerate() {
                    write!(f, "\n\n{}. To '{}':\n", i + 1, set.to)?;
                    set.write_block(f, "   ")?;
                }
                Ok(())
            }
            Self::NoReachableTargets { from } => {
                write!(f, "No paths found from '{from}' to any other word.")
            }
            Self::NoOtherWords => write!(f, "No other words in the graph to find paths to."),
        }
    }
}

/// Outcome of a random walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WalkReport {
    Empty,
    Walk { words: Vec<String> },
}

impl WalkReport {
    pub fn words(&self) -> &[String] {
        match self {
            Self::Walk { words } => words,
            Self::Empty => &[],
        }
    }
}

impl fmt::Display for WalkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Graph is empty, cannot perform random walk."),
            Self::Walk { words } => f.write_str(&words.join(" ")),
        }
    }
}
