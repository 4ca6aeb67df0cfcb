//! Error types shared by the histograph pipeline stages

use std::path::PathBuf;
use thiserror::Error;

use crate::render::RenderError;

/// Errors that can occur while loading settings, reading history, or rendering.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config file not found or unreadable: {}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is not valid TOML: {source}", path.display())]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Missing required config key `{key}` in [settings]")]
    ConfigMissingKey { key: &'static str },

    #[error("Config sets both `file_path` and `file_hash`; keep only one")]
    ConflictingSelectors,

    #[error("Invalid value for config key `{key}`: {reason}")]
    ConfigInvalidValue {
        key: &'static str,
        reason: &'static str,
    },

    #[error("Cannot read git repository at {}: {source}", path.display())]
    RepositoryAccess {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
