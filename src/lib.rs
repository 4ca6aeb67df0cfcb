//! histograph - commit history graphs for a single file
//!
//! Reads a small TOML config, collects the commits that touched one file of a
//! git repository, describes them as a Mermaid flowchart and runs an external
//! renderer to turn that into an image.
//!
//! ```no_run
//! use histograph::config::load_settings;
//! use histograph::pipeline::{self, Outcome};
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("histograph.toml")).unwrap();
//! match pipeline::run(&settings).unwrap() {
//!     Outcome::Rendered { output, .. } => println!("wrote {}", output.display()),
//!     Outcome::NoCommits => println!("nothing to draw"),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod graph;
pub mod pipeline;
pub mod render;

pub use error::{Error, Result};
