//! Image rendering through an external Mermaid tool
//!
//! The graph text is written to a uniquely named `.mmd` file, the renderer
//! is run as `<renderer> -i <file> -o <output>`, and the file is removed
//! again whether or not the renderer succeeded.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::GraphText;

/// Errors from the rendering step
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write temporary diagram file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Failed to launch renderer {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer {} exited with {status}{}", program.display(), stderr_suffix(stderr))]
    Failed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// An external diagram renderer such as `mmdc`.
#[derive(Debug, Clone)]
pub struct Renderer {
    program: PathBuf,
    temp_dir: Option<PathBuf>,
}

impl Renderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            temp_dir: None,
        }
    }

    /// Create the temporary diagram file in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Resolve the renderer the way the OS would launch it (PATH lookup for bare names).
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }

    /// The renderer invocation for one input/output pair.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-i").arg(input).arg("-o").arg(output);
        command
    }

    /// Render `graph` into `output`.
    pub fn render(&self, graph: &GraphText, output: &Path) -> Result<(), RenderError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("histograph-").suffix(".mmd");
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(RenderError::TempFile)?;

        file.write_all(graph.as_str().as_bytes())
            .and_then(|_| file.flush())
            .map_err(RenderError::TempFile)?;
        debug!("Wrote diagram to {}", file.path().display());

        let result = self.run(file.path(), output);

        let temp_path = file.path().to_path_buf();
        if let Err(e) = file.close() {
            warn!("Failed to remove {}: {}", temp_path.display(), e);
        }
        result
    }

    fn run(&self, input: &Path, output: &Path) -> Result<(), RenderError> {
        let mut command = self.command(input, output);
        command.stdin(Stdio::null());
        debug!("Running renderer: {:?}", command);

        let result = command.output().map_err(|source| RenderError::Launch {
            program: self.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&result.stdout);
        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        if !stdout.trim().is_empty() {
            debug!("Renderer stdout: {}", stdout.trim());
        }

        if !result.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            debug!("Renderer stderr: {}", stderr);
        }
        Ok(())
    }
}

/// Render `graph_text` to `output_path` with the renderer at `renderer_path`.
pub fn render(
    graph_text: &GraphText,
    output_path: &Path,
    renderer_path: &Path,
) -> Result<(), RenderError> {
    Renderer::new(renderer_path).render(graph_text, output_path)
}
