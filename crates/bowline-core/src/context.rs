//! Application context threaded through the pipeline.

use std::path::{Path, PathBuf};

/// Explicit working-directory context for one pipeline run.
///
/// The working directory anchors every path the pipeline touches: the
/// configuration documents, the install directory, and the generated loader
/// config. Frontends create this once and pass it down; tests inject a temp
/// directory instead of relying on process state.
#[derive(Debug, Clone)]
pub struct AppContext {
    working_dir: PathBuf,
}

impl AppContext {
    /// Create a context rooted at an explicit directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Create a context rooted at the process working directory.
    pub fn current() -> anyhow::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
