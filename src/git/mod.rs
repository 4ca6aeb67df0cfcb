//! Git history module
//!
//! Finds the commits that affected a single file, either by following its
//! path or by matching the blob id it was stored under.
//!
//! # Example
//!
//! ```no_run
//! use histograph::config::FileSelector;
//! use histograph::git::extract_history;
//! use std::path::Path;
//!
//! let selector = FileSelector::Path("src/main.rs".to_string());
//! let history = extract_history(Path::new("/path/to/repo"), &selector, None).unwrap();
//! println!("{} commits", history.len());
//! ```

pub mod history;

pub use history::{extract_history, is_repository, CommitHistory, CommitRef, GitHistory};
