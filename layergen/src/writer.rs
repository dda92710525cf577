//! Artifact materialization
//!
//! Writing is the only I/O in a generation. Failures are collected per path
//! and never invalidate the rendered artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::WriteError;
use crate::generator::GeneratedArtifact;

/// Destination for rendered artifacts
pub trait ArtifactWriter {
    /// Write `content` at `relative_path` under the writer's root
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the artifact cannot be written.
    fn write_artifact(&self, relative_path: &str, content: &str) -> io::Result<()>;
}

/// Writes artifacts below a root directory, creating parents as needed
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    /// Writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactWriter for FsWriter {
    fn write_artifact(&self, relative_path: &str, content: &str) -> io::Result<()> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
    }
}

/// Write every artifact, returning the failures
///
/// All artifacts are attempted even after a failure.
pub fn materialize(
    writer: &dyn ArtifactWriter,
    artifacts: &[GeneratedArtifact],
) -> Vec<WriteError> {
    let mut failures = Vec::new();
    for artifact in artifacts {
        match writer.write_artifact(&artifact.relative_path, &artifact.content) {
            Ok(()) => info!(path = %artifact.relative_path, "Wrote artifact"),
            Err(source) => {
                warn!(path = %artifact.relative_path, error = %source, "Failed to write artifact");
                failures.push(WriteError {
                    path: artifact.relative_path.clone(),
                    source,
                });
            }
        }
    }
    failures
}
