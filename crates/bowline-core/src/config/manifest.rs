//! The dependency manifest (`bower.json`).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "bower.json";

/// Declared dependencies of the project.
///
/// Only the fields the pipeline consumes are modeled; unrecognized fields in
/// the document are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DependencyManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl DependencyManifest {
    /// Load `bower.json` from the working directory.
    ///
    /// A missing manifest is an error: the package manager has nothing to
    /// install against without one.
    pub async fn load(working_dir: &Path) -> anyhow::Result<Self> {
        let path = working_dir.join(MANIFEST_FILE);
        let raw = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }
}
