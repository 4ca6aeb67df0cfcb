//! Init command - write an example config file

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::EXAMPLE_CONFIG;

/// Run the init command
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    write_example(config_path, force)?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("  Edit the [settings] table, then run `histograph`");
    Ok(())
}

fn write_example(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
