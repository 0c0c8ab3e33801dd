//! Loader configuration generation boundary.

mod require_conf;

pub use require_conf::{GENERATED_CONF_FILE, RequireConfGenerator};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{DependencyManifest, DirectoryConfig, ToolConfig};
use crate::context::AppContext;

/// Per-component package metadata, read from the metadata document the
/// package manager leaves inside each installed component.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentMeta {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub main: Option<MainField>,
    /// Endpoint the component was installed from, as recorded by the
    /// package manager.
    #[serde(default, rename = "_source")]
    pub source: Option<String>,
    #[serde(default, rename = "_originalSource")]
    pub original_source: Option<String>,
}

/// The `main` field of a component manifest: a single entry file or a list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MainField {
    One(String),
    Many(Vec<String>),
}

impl MainField {
    /// The first entry file, when any is declared.
    pub fn first(&self) -> Option<&str> {
        match self {
            MainField::One(main) => Some(main),
            MainField::Many(mains) => mains.first().map(String::as_str),
        }
    }
}

/// Output of one generation run: package metadata plus the mapping from
/// component name to its on-disk path relative to the working directory.
///
/// Produced once per pipeline run and consumed immediately; the orchestrator
/// never persists it.
#[derive(Debug, Clone, Default)]
pub struct GeneratedConf {
    pub pkg_meta: BTreeMap<String, ComponentMeta>,
    pub components: BTreeMap<String, PathBuf>,
}

/// Boundary contract of the loader configuration generator.
///
/// Consumes the working directory and the three documents (directory and
/// tool settings post-override) and produces a coherent [`GeneratedConf`] or
/// fails. The orchestrator does not retry on failure.
pub trait ConfGenerator {
    fn generate(
        &self,
        ctx: &AppContext,
        manifest: &DependencyManifest,
        dir_conf: &DirectoryConfig,
        tool_conf: &ToolConfig,
    ) -> impl Future<Output = anyhow::Result<GeneratedConf>> + Send;
}
