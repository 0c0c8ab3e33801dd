//! Directory settings (`.bowerrc`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DIR_CONF_FILE: &str = ".bowerrc";

/// Directory the package manager materializes components into, relative to
/// the working directory, when the document does not say otherwise.
pub const DEFAULT_COMPONENTS_DIR: &str = "bower_components";

/// Package-manager directory settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl DirectoryConfig {
    /// Load `.bowerrc` from the working directory. An absent document is the
    /// default document.
    pub async fn load(working_dir: &Path) -> anyhow::Result<Self> {
        let path = working_dir.join(DIR_CONF_FILE);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// The configured components directory, relative to the working
    /// directory unless the document gave an absolute path.
    pub fn components_dir(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPONENTS_DIR))
    }

    /// The components directory resolved against the working directory.
    pub fn install_dir(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(self.components_dir())
    }
}
