use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use wordlink_graph::{GraphBuilder, WalkReport, WordGraph};

mod config;
mod render;
mod shell;

pub use config::CliConfig;
pub use render::Renderer;
pub use shell::Shell;

const WALK_FILE: &str = "random_walk.txt";

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "wordlink")]
#[command(about = "Word-adjacency graph queries over free text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text file the graph is built from
    #[arg(short, long)]
    input: PathBuf,

    /// TOML config file (engine parameters, output dir, renderer)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for text generation and random walks (default: entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for rendered images and walk transcripts
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Never invoke Graphviz
    #[arg(long)]
    no_render: bool,

    /// Print one JSON object instead of text (implies --quiet)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default when no command is given)
    Shell,

    /// Print the adjacency list and render graph.png
    Show,

    /// Find bridge words between two words
    Bridge { word1: String, word2: String },

    /// Insert bridge words into new text
    Generate {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Shortest paths between two words, or from one word to all others
    Path { word1: String, word2: Option<String> },

    /// PageRank of a word, or the top-ranked words when none is given
    Rank {
        word: Option<String>,

        /// How many words to list without WORD
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Random walk from a random word
    Walk,
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Commands::Shell => "shell",
            Commands::Show => "show",
            Commands::Bridge { .. } => "bridge",
            Commands::Generate { .. } => "generate",
            Commands::Path { .. } => "path",
            Commands::Rank { .. } => "rank",
            Commands::Walk => "walk",
        }
    }
}

/// Text plus structured payload of a one-shot command
struct Outcome {
    message: String,
    result: Value,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = resolve_config(&cli)?;
    let store = GraphBuilder::from_file(&cli.input).context("Failed to build word graph")?;
    let graph = WordGraph::with_config(store, config.engine)?;
    let renderer = Renderer::new(
        config.dot_binary.clone(),
        config.output_dir.clone(),
        config.render,
    );
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let command = cli.command.unwrap_or(Commands::Shell);
    let outcome = match &command {
        Commands::Shell => {
            info!("Starting interactive session");
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            return Shell::new(&graph, &renderer, rng, stdin, stdout).run();
        }
        Commands::Show => run_show(&graph, &renderer),
        Commands::Bridge { word1, word2 } => {
            let report = graph.query_bridge_words(Some(word1.as_str()), Some(word2.as_str()));
            Outcome {
                message: report.to_string(),
                result: serde_json::to_value(&report)?,
            }
        }
        Commands::Generate { text } => {
            let generated = graph.generate_new_text(&text.join(" "), &mut rng);
            Outcome {
                result: json!({ "text": generated }),
                message: generated,
            }
        }
        Commands::Path { word1, word2 } => {
            let report = graph.shortest_paths(word1, word2.as_deref().unwrap_or(""));
            if word2.is_some() && report.is_found() {
                renderer.render_paths(
                    graph.store(),
                    &report.highlighted_paths(),
                    "shortest_paths.png",
                );
            }
            Outcome {
                message: report.to_string(),
                result: serde_json::to_value(&report)?,
            }
        }
        Commands::Rank { word, top } => run_rank(&graph, word.as_deref(), *top),
        Commands::Walk => {
            let report = graph.random_walk(&mut rng);
            let saved = match &report {
                WalkReport::Walk { words } => save_walk(renderer.output_dir(), words),
                WalkReport::Empty => None,
            };
            let mut result = serde_json::to_value(&report)?;
            if let Some(path) = saved {
                result["saved_to"] = json!(path.display().to_string());
            }
            Outcome {
                message: report.to_string(),
                result,
            }
        }
    };

    if cli.json {
        let body = json!({
            "command": command.name(),
            "message": outcome.message,
            "result": outcome.result,
        });
        print_stdout(&serde_json::to_string_pretty(&body)?)
    } else {
        print_stdout(&outcome.message)
    }
}

fn resolve_config(cli: &Cli) -> Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    config.apply_env();

    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if cli.no_render {
        config.render = false;
    }
    Ok(config)
}

fn run_show(graph: &WordGraph, renderer: &Renderer) -> Outcome {
    let store = graph.store();
    if store.is_empty() {
        return Outcome {
            message: "Graph is empty, cannot display.".to_string(),
            result: json!({ "nodes": [], "edges": [] }),
        };
    }

    renderer.render_graph(store, "graph.png");
    let edges: Vec<Value> = store
        .edges()
        .into_iter()
        .map(|(from, to, weight)| json!({ "from": from, "to": to, "weight": weight }))
        .collect();

    Outcome {
        message: store.to_string().trim_end().to_string(),
        result: json!({ "nodes": store.nodes(), "edges": edges }),
    }
}

fn run_rank(graph: &WordGraph, word: Option<&str>, top: usize) -> Outcome {
    if let Some(word) = word {
        let score = graph.rank(word);
        return Outcome {
            message: format!("PageRank value for word '{word}': {score:.4}"),
            result: json!({ "word": word.to_lowercase(), "score": score }),
        };
    }

    let ranked: Vec<(String, f64)> = graph.rank_all().into_iter().take(top).collect();
    let message = ranked
        .iter()
        .enumerate()
        .map(|(i, (word, score))| format!("{}. {word} {score:.4}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    let result = ranked
        .iter()
        .map(|(word, score)| json!({ "word": word, "score": score }))
        .collect();

    Outcome {
        message,
        result: Value::Array(result),
    }
}

/// Write the walk transcript; failures are logged, never fatal
pub(crate) fn save_walk(dir: &Path, words: &[String]) -> Option<PathBuf> {
    let path = dir.join(WALK_FILE);
    let written = fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, format!("{}\n", words.join(" "))));

    match written {
        Ok(()) => {
            info!("Random walk saved to {}", path.display());
            Some(path)
        }
        Err(err) => {
            warn!("Failed to save random walk to {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["wordlink", "--input", "text.txt"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn path_target_is_optional() {
        let cli = Cli::try_parse_from(["wordlink", "-i", "t.txt", "path", "alpha"]).unwrap();
        match cli.command {
            Some(Commands::Path { word1, word2 }) => {
                assert_eq!(word1, "alpha");
                assert!(word2.is_none());
            }
            _ => panic!("expected path command"),
        }
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["wordlink", "walk"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("wordlink.toml");
        fs::write(&config_path, "render = true\noutput_dir = \"from-file\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "wordlink",
            "-i",
            "t.txt",
            "--config",
            config_path.to_str().unwrap(),
            "--no-render",
            "--output-dir",
            "from-flag",
            "walk",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();

        assert!(!config.render);
        assert_eq!(config.output_dir, PathBuf::from("from-flag"));
    }

    #[test]
    fn rank_listing_is_limited() {
        let graph = WordGraph::from_text("a b c d e a b c");
        let outcome = run_rank(&graph, None, 2);
        assert_eq!(outcome.message.lines().count(), 2);
        assert_eq!(outcome.result.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn walk_transcript_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let words = vec!["a".to_string(), "b".to_string()];
        let path = save_walk(dir.path(), &words).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "a b\n");
    }
}
