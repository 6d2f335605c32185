use crate::render::Renderer;
use crate::save_walk;
use anyhow::Result;
use rand::Rng;
use std::io::{BufRead, Write};
use wordlink_graph::{WalkReport, WordGraph};

const MENU: &str = "\nPlease select a function:\n\
1. Query bridge words\n\
2. Generate new text with bridge words\n\
3. Calculate shortest path between words\n\
4. Calculate PageRank value\n\
5. Random walk\n\
6. Show directed graph again\n\
0. Exit program\n\
Enter option (0-6): ";

/// Line-oriented interactive menu.
///
/// Raw user strings go straight to the engine, which owns all validation.
/// End of input ends the session; a prompt answered by end of input forwards
/// an absent word.
pub struct Shell<'a, I, O, G> {
    graph: &'a WordGraph,
    renderer: &'a Renderer,
    rng: G,
    input: I,
    output: O,
}

impl<'a, I: BufRead, O: Write, G: Rng> Shell<'a, I, O, G> {
    pub fn new(graph: &'a WordGraph, renderer: &'a Renderer, rng: G, input: I, output: O) -> Self {
        Self {
            graph,
            renderer,
            rng,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let Ok(choice) = line.trim().parse::<u32>() else {
                writeln!(self.output, "Invalid input, please enter a number between 0-6.")?;
                continue;
            };

            match choice {
                0 => break,
                1 => self.bridge_words()?,
                2 => self.generate_text()?,
                3 => self.shortest_path()?,
                4 => self.page_rank()?,
                5 => self.random_walk()?,
                6 => self.show_graph()?,
                _ => writeln!(self.output, "Invalid option, please try again.")?,
            }
        }

        log::debug!("Interactive session finished");
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn bridge_words(&mut self) -> Result<()> {
        let word1 = self.prompt("Enter first word: ")?;
        let word2 = self.prompt("Enter second word: ")?;
        let report = self
            .graph
            .query_bridge_words(word1.as_deref(), word2.as_deref());
        writeln!(self.output, "{report}")?;
        Ok(())
    }

    fn generate_text(&mut self) -> Result<()> {
        let text = self.prompt("Enter text: ")?.unwrap_or_default();
        let generated = self.graph.generate_new_text(&text, &mut self.rng);
        writeln!(self.output, "Generated new text:\n{generated}")?;
        Ok(())
    }

    fn shortest_path(&mut self) -> Result<()> {
        writeln!(self.output, "Enter one word to show all paths from that word,")?;
        let line = self
            .prompt("or enter two words separated by space to find shortest path between them:\n")?
            .unwrap_or_default();
        let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();

        let report = match words.as_slice() {
            [] => {
                writeln!(self.output, "Error: Please enter at least one word.")?;
                return Ok(());
            }
            [word] => self.graph.shortest_paths(word, ""),
            [word1, word2] => self.graph.shortest_paths(word1, word2),
            _ => {
                writeln!(
                    self.output,
                    "Error: Please enter one word or two words separated by space."
                )?;
                return Ok(());
            }
        };

        writeln!(self.output, "{report}")?;
        if words.len() == 2 && report.is_found() {
            self.renderer.render_paths(
                self.graph.store(),
                &report.highlighted_paths(),
                "shortest_paths.png",
            );
        }
        Ok(())
    }

    fn page_rank(&mut self) -> Result<()> {
        let word = self
            .prompt("Enter word to calculate PageRank value: ")?
            .unwrap_or_default();
        let score = self.graph.rank(&word);
        writeln!(self.output, "PageRank value for word '{word}': {score:.4}")?;
        Ok(())
    }

    fn random_walk(&mut self) -> Result<()> {
        writeln!(self.output, "Starting random walk...")?;
        let report = self.graph.random_walk(&mut self.rng);
        if let WalkReport::Walk { words } = &report {
            if let Some(path) = save_walk(self.renderer.output_dir(), words) {
                writeln!(self.output, "Random walk result saved to {}", path.display())?;
            }
        }
        writeln!(self.output, "Random walk result:\n{report}")?;
        Ok(())
    }

    fn show_graph(&mut self) -> Result<()> {
        let store = self.graph.store();
        if store.is_empty() {
            writeln!(self.output, "Graph is empty, cannot display.")?;
            return Ok(());
        }
        write!(self.output, "{store}")?;

        let answer = self
            .prompt("Do you want to generate the graph image? (yes/no): ")?
            .unwrap_or_default();
        if answer.trim().eq_ignore_ascii_case("yes") {
            if self.renderer.render_graph(store, "graph.png") {
                writeln!(self.output, "Graph image has been generated as 'graph.png'")?;
            } else {
                writeln!(self.output, "Graph image could not be generated.")?;
            }
        } else {
            writeln!(self.output, "Graph image generation skipped.")?;
        }
        Ok(())
    }
}
