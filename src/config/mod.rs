//! Configuration module for histograph
//!
//! Settings live in a single `[settings]` table of a TOML file
//! (`histograph.toml` by default).

mod settings;

pub use settings::{load_settings, FileSelector, Settings, DEFAULT_CONFIG_FILE, EXAMPLE_CONFIG};
