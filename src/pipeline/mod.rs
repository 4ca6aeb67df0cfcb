//! File history pipeline
//!
//! Runs the stages in order:
//! 1. Read the commits that affected the selected file
//! 2. Build the Mermaid graph text
//! 3. Hand the text to the external renderer
//!
//! An empty history stops the run before rendering; that is not an error.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::Result;
use crate::git::extract_history;
use crate::graph::{build_graph_text, GraphText};
use crate::render::Renderer;

/// How a pipeline run finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No commit touched the selector; no image was produced
    NoCommits,
    /// The renderer wrote the image
    Rendered {
        output: PathBuf,
        commits: usize,
        edges: usize,
    },
}

/// Extract the history and build its graph text, or `None` when nothing matched.
pub fn build_graph(settings: &Settings) -> Result<Option<(usize, GraphText)>> {
    let history = extract_history(
        &settings.repository_path,
        &settings.file_selector,
        settings.max_commits,
    )?;
    if history.is_empty() {
        info!("No commits found for {}", settings.file_selector);
        return Ok(None);
    }

    let graph = build_graph_text(&history);
    debug!(
        "Built graph with {} edges from {} commits",
        graph.edge_count(),
        history.len()
    );
    Ok(Some((history.len(), graph)))
}

/// Run every stage for `settings`.
pub fn run(settings: &Settings) -> Result<Outcome> {
    run_with(settings, &Renderer::new(&settings.renderer_path))
}

/// Run every stage, rendering with `renderer`.
pub fn run_with(settings: &Settings, renderer: &Renderer) -> Result<Outcome> {
    let Some((commits, graph)) = build_graph(settings)? else {
        return Ok(Outcome::NoCommits);
    };

    renderer.render(&graph, &settings.output_image_path)?;
    info!(
        "Rendered {} commits to {}",
        commits,
        settings.output_image_path.display()
    );

    Ok(Outcome::Rendered {
        output: settings.output_image_path.clone(),
        commits,
        edges: graph.edge_count(),
    })
}
