//! Default command - render the history graph described by the config file

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::config::load_settings;
use crate::error::Error;
use crate::pipeline::{self, Outcome};

pub fn run(config_path: &Path, print: bool) -> Result<()> {
    let settings = load_settings(config_path)?;

    if print {
        match pipeline::build_graph(&settings)? {
            Some((_, graph)) => print!("{}", graph),
            None => println!(
                "No commits touching {} found; nothing to render.",
                settings.file_selector
            ),
        }
        return Ok(());
    }

    match pipeline::run(&settings) {
        Ok(Outcome::Rendered { output, commits, .. }) => {
            println!(
                "{} Commit graph written to {} ({} commits)",
                style("✓").green(),
                style(output.display()).cyan(),
                commits
            );
            Ok(())
        }
        Ok(Outcome::NoCommits) => {
            println!(
                "No commits touching {} found; nothing to render.",
                settings.file_selector
            );
            Ok(())
        }
        Err(Error::Render(e)) => {
            println!("{} Failed to render commit graph: {}", style("✗").red(), e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
