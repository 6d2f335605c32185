use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use wordlink_graph::{dot, AdjacencyStore};

/// Drives the external Graphviz `dot` binary.
///
/// Rendering is a side effect only: every failure is logged and reported as
/// `false`, never propagated into query results.
#[derive(Debug, Clone)]
pub struct Renderer {
    binary: String,
    output_dir: PathBuf,
    enabled: bool,
}

impl Renderer {
    pub fn new(binary: impl Into<String>, output_dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            binary: binary.into(),
            output_dir: output_dir.into(),
            enabled,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn render_graph(&self, store: &AdjacencyStore, file_name: &str) -> bool {
        self.render(&dot::to_dot(store), file_name)
    }

    pub fn render_paths(&self, store: &AdjacencyStore, paths: &[Vec<String>], file_name: &str) -> bool {
        self.render(&dot::to_dot_with_paths(store, paths), file_name)
    }

    fn render(&self, source: &str, file_name: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let output = self.output_dir.join(file_name);
        match self.run_dot(source, &output) {
            Ok(()) => {
                info!("Graph image saved to {}", output.display());
                true
            }
            Err(err) => {
                warn!(
                    "Graph rendering skipped ({err:#}); make sure Graphviz is installed and '{}' is on PATH",
                    self.binary
                );
                false
            }
        }
    }

    fn run_dot(&self, source: &str, output: &Path) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let mut scratch = tempfile::Builder::new()
            .prefix("graph_")
            .suffix(".dot")
            .tempfile()
            .context("Failed to create DOT scratch file")?;
        scratch.write_all(source.as_bytes())?;
        scratch.flush()?;

        let status = Command::new(&self.binary)
            .arg("-Tpng")
            .arg(scratch.path())
            .arg("-o")
            .arg(output)
            .status()
            .with_context(|| format!("Failed to launch '{}'", self.binary))?;

        if !status.success() {
            bail!("'{}' exited with {status}", self.binary);
        }
        Ok(())
    }
}
