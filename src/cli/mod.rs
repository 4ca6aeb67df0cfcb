//! CLI command definitions and handlers

mod doctor;
mod init;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// histograph - draw the commit history of one file
#[derive(Parser, Debug)]
#[command(name = "histograph")]
#[command(
    version,
    about = "Render the commit history of a single file as a Mermaid graph image",
    long_about = "Reads histograph.toml, collects the commits that touched the configured \
file (by path or by blob hash), builds a Mermaid flowchart of them and hands it to an \
external renderer such as the Mermaid CLI (mmdc).",
    after_help = "\
Examples:
  histograph                          Render using ./histograph.toml
  histograph --config other.toml      Use another config file
  histograph --print                  Print the Mermaid text, skip rendering
  histograph init                     Write an example histograph.toml
  histograph doctor                   Check config, repository and renderer"
)]
pub struct Cli {
    /// Path to the config file
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "HISTOGRAPH_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Print the Mermaid graph text to stdout instead of rendering an image
    #[arg(long)]
    pub print: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Check the config file, repository and renderer
    Doctor,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init { force }) => init::run(&cli.config, force),
        Some(Commands::Doctor) => doctor::run(&cli.config),
        None => render::run(&cli.config, cli.print),
    }
}
