//! Doctor command - check config, repository and renderer

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::config::load_settings;
use crate::git::is_repository;
use crate::render::Renderer;

pub fn run(config_path: &Path) -> Result<()> {
    println!("🩺 histograph doctor\n");

    let settings = match load_settings(config_path) {
        Ok(settings) => {
            println!("{} Config: {}", style("✓").green(), config_path.display());
            settings
        }
        Err(e) => {
            println!("{} Config: {}", style("✗").red(), e);
            anyhow::bail!("Config check failed");
        }
    };

    let mut problems = 0;

    if is_repository(&settings.repository_path) {
        println!(
            "{} Repository: {}",
            style("✓").green(),
            settings.repository_path.display()
        );
    } else {
        problems += 1;
        println!(
            "{} Repository: {} is not a git repository root",
            style("✗").red(),
            settings.repository_path.display()
        );
    }

    let renderer = Renderer::new(&settings.renderer_path);
    match renderer.locate() {
        Some(found) => println!("{} Renderer: {}", style("✓").green(), found.display()),
        None => {
            problems += 1;
            println!(
                "{} Renderer: {} not found or not executable",
                style("✗").red(),
                renderer.program().display()
            );
            println!("  Install the Mermaid CLI with `npm install -g @mermaid-js/mermaid-cli`");
        }
    }

    println!("{} Selector: {}", style("✓").green(), settings.file_selector);

    if problems > 0 {
        anyhow::bail!("{} problem(s) found", problems);
    }
    println!("\n✅ All checks passed!");
    Ok(())
}
