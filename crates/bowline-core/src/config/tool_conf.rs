//! Tool settings (`bowline.json`) and the command-line overrides applied to
//! them.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::invocation::InstallOptions;

pub const TOOL_CONF_FILE: &str = "bowline.json";

/// Settings owned by bowline itself rather than the package manager.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Web base path the generated loader paths are prefixed with. Defaults
    /// to the components directory itself when unset.
    #[serde(default, rename = "dependenciesWebUrl")]
    pub dependencies_web_url: Option<String>,
    /// Existing loader configs to merge into the generated one, in order.
    #[serde(default, rename = "requirejsConfigs")]
    pub requirejs_configs: Vec<String>,
    /// Base URL of the catalog portal the component model is submitted to.
    #[serde(default, rename = "portalUrl")]
    pub portal_url: Option<String>,
}

impl ToolConfig {
    /// Load `bowline.json` from the working directory. An absent document is
    /// the default document.
    pub async fn load(working_dir: &Path) -> anyhow::Result<Self> {
        let path = working_dir.join(TOOL_CONF_FILE);
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

    /// Apply the recognized command-line overrides.
    ///
    /// Happens exactly once, before the loader conf generator runs. Only
    /// these two fields may be overridden from the command line.
    pub fn apply_overrides(&mut self, options: &InstallOptions) {
        if let Some(web_url) = &options.web_url {
            self.dependencies_web_url = Some(web_url.clone());
        }
        if options.require_confs.is_some() {
            self.requirejs_configs = options.require_conf_paths();
        }
    }
}
