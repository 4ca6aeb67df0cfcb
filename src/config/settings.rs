//! Typed settings loaded from `histograph.toml`
//!
//! Every required key is checked once at load time, so the rest of the
//! pipeline never looks anything up by name.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "histograph.toml";

/// Template written by `histograph init`.
pub const EXAMPLE_CONFIG: &str = r#"# histograph configuration

[settings]
# Mermaid CLI (or any renderer accepting `-i <input> -o <output>`)
graph_tool = "mmdc"

# Root of the git repository to read
repository_path = "."

# Image written by the renderer (extension picks the format: png, svg, pdf)
output_image = "history.png"

# File to follow, relative to the repository root
file_path = "src/main.rs"

# ...or follow a blob instead of a path (use one of the two, not both)
# file_hash = "3b18e512dba79e4c8300dd08aeb37f8e728b8dad"

# Stop after this many matching commits, at least 1 (default: unlimited)
# max_commits = 500
"#;

/// Which commits to collect: those touching a path, or those introducing a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelector {
    /// Repository-relative path, matched as a git pathspec
    Path(String),
    /// Full or abbreviated blob id
    BlobHash(String),
}

impl fmt::Display for FileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSelector::Path(path) => write!(f, "file {}", path),
            FileSelector::BlobHash(hash) => write!(f, "blob {}", hash),
        }
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Renderer executable (`graph_tool`)
    pub renderer_path: PathBuf,
    /// Repository root (`repository_path`)
    pub repository_path: PathBuf,
    /// Image the renderer writes (`output_image`)
    pub output_image_path: PathBuf,
    /// `file_path` or `file_hash`
    pub file_selector: FileSelector,
    /// Optional cap on extracted commits (`max_commits`)
    pub max_commits: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    settings: Option<RawSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    graph_tool: Option<String>,
    repository_path: Option<String>,
    output_image: Option<String>,
    file_path: Option<String>,
    file_hash: Option<String>,
    max_commits: Option<usize>,
}

/// Load and validate settings from a TOML file.
///
/// Fails with [`Error::ConfigNotFound`] when the file cannot be read and with
/// [`Error::ConfigMissingKey`] when a required key is absent or empty.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&content, path)?;
    debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

fn parse_settings(content: &str, path: &Path) -> Result<Settings> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| Error::ConfigInvalid {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = file
        .settings
        .ok_or(Error::ConfigMissingKey { key: "settings" })?;

    let renderer_path = required(raw.graph_tool, "graph_tool")?;
    let repository_path = required(raw.repository_path, "repository_path")?;
    let output_image_path = required(raw.output_image, "output_image")?;

    let file_selector = match (non_empty(raw.file_path), non_empty(raw.file_hash)) {
        (Some(_), Some(_)) => return Err(Error::ConflictingSelectors),
        (Some(path), None) => FileSelector::Path(path),
        (None, Some(hash)) => FileSelector::BlobHash(hash),
        (None, None) => return Err(Error::ConfigMissingKey { key: "file_path" }),
    };

    if raw.max_commits == Some(0) {
        return Err(Error::ConfigInvalidValue {
            key: "max_commits",
            reason: "must be at least 1 (omit it for no limit)",
        });
    }

    Ok(Settings {
        renderer_path: PathBuf::from(renderer_path),
        repository_path: PathBuf::from(repository_path),
        output_image_path: PathBuf::from(output_image_path),
        file_selector,
        max_commits: raw.max_commits,
    })
}

fn required(value: Option<String>, key: &'static str) -> Result<String> {
    non_empty(value).ok_or(Error::ConfigMissingKey { key })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(content: &str) -> Result<Settings> {
        parse_settings(content, Path::new("histograph.toml"))
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let settings = parse(
            r#"
[settings]
graph_tool = 'C:\path\to\mmdc.cmd'
repository_path = 'C:\path\to\repo'
output_image = 'C:\path\to\output.png'
file_path = 'path\to\file.py'
"#,
        )
        .unwrap();
        assert_eq!(settings.renderer_path, PathBuf::from(r"C:\path\to\mmdc.cmd"));
        assert_eq!(settings.repository_path, PathBuf::from(r"C:\path\to\repo"));
        assert_eq!(
            settings.output_image_path,
            PathBuf::from(r"C:\path\to\output.png")
        );
        assert_eq!(
            settings.file_selector,
            FileSelector::Path(r"path\to\file.py".to_string())
        );
        assert_eq!(settings.max_commits, None);
    }

    #[test]
    fn test_hash_selector_and_max_commits() {
        let settings = parse(
            r#"
[settings]
graph_tool = "mmdc"
repository_path = "."
output_image = "out.svg"
file_hash = "3b18e512"
max_commits = 25
"#,
        )
        .unwrap();
        assert_eq!(
            settings.file_selector,
            FileSelector::BlobHash("3b18e512".to_string())
        );
        assert_eq!(settings.max_commits, Some(25));
    }

    #[test]
    fn test_missing_key() {
        let err = parse(
            r#"
[settings]
graph_tool = "mmdc"
output_image = "out.png"
file_path = "a.txt"
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigMissingKey {
                key: "repository_path"
            }
        ));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = parse(
            r#"
[settings]
graph_tool = ""
repository_path = "."
output_image = "out.png"
file_path = "a.txt"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigMissingKey { key: "graph_tool" }));
    }

    #[test]
    fn test_missing_selector() {
        let err = parse(
            r#"
[settings]
graph_tool = "mmdc"
repository_path = "."
output_image = "out.png"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigMissingKey { key: "file_path" }));
    }

    #[test]
    fn test_both_selectors_rejected() {
        let err = parse(
            r#"
[settings]
graph_tool = "mmdc"
repository_path = "."
output_image = "out.png"
file_path = "a.txt"
file_hash = "abc123"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConflictingSelectors));
    }

    #[test]
    fn test_zero_max_commits_rejected() {
        let err = parse(
            r#"
[settings]
graph_tool = "mmdc"
repository_path = "."
output_image = "out.png"
file_path = "a.txt"
max_commits = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigInvalidValue {
                key: "max_commits",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_section() {
        let err = parse("[other]\nkey = \"value\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigMissingKey { key: "settings" }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse("[settings\ngraph_tool = mmdc\n").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let dir = tempdir().unwrap();
        let err = load_settings(&dir.path().join("non_existent_config.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, EXAMPLE_CONFIG).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.renderer_path, PathBuf::from("mmdc"));
        assert_eq!(settings.repository_path, PathBuf::from("."));
        assert_eq!(settings.output_image_path, PathBuf::from("history.png"));
        assert_eq!(
            settings.file_selector,
            FileSelector::Path("src/main.rs".to_string())
        );
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(
            FileSelector::Path("src/lib.rs".into()).to_string(),
            "file src/lib.rs"
        );
        assert_eq!(FileSelector::BlobHash("abc".into()).to_string(), "blob abc");
    }
}
