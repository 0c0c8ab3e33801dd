//! Production loader-conf generator.
//!
//! Scans the install directory, reads each component's own metadata
//! document, and renders a RequireJS-style configuration mapping module
//! names to web paths. Existing configs listed in the tool settings are
//! merged ahead of the generated block.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::{DependencyManifest, DirectoryConfig, ToolConfig};
use crate::context::AppContext;

use super::{ComponentMeta, ConfGenerator, GeneratedConf};

/// File the generated configuration is written to, in the working directory.
pub const GENERATED_CONF_FILE: &str = "require-bower-config.js";

/// Metadata document the package manager writes inside each component, with
/// the manifest it was installed from as fallback.
const COMPONENT_META_FILES: [&str; 2] = [".bower.json", "bower.json"];

#[derive(Debug, Clone, Copy, Default)]
pub struct RequireConfGenerator;

impl ConfGenerator for RequireConfGenerator {
    async fn generate(
        &self,
        ctx: &AppContext,
        _manifest: &DependencyManifest,
        dir_conf: &DirectoryConfig,
        tool_conf: &ToolConfig,
    ) -> anyhow::Result<GeneratedConf> {
        let install_dir = dir_conf.install_dir(ctx.working_dir());
        let components_rel = dir_conf.components_dir();

        let mut generated = GeneratedConf::default();

        let mut entries = match tokio::fs::read_dir(&install_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                // Nothing installed; still render an empty configuration so
                // downstream loaders have a file to include.
                write_conf(ctx.working_dir(), tool_conf, &generated, dir_conf).await?;
                return Ok(generated);
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read install directory: {}", install_dir.display())
                });
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("Failed to scan {}", install_dir.display()))?
        {
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?;
            if !file_type.is_dir() {
                continue;
            }

            match read_component_meta(&entry.path()).await {
                Ok(Some(meta)) => {
                    let rel = components_rel.join(entry.file_name());
                    debug!(component = %meta.name, path = %rel.display(), "collected component");
                    generated.components.insert(meta.name.clone(), rel);
                    generated.pkg_meta.insert(meta.name.clone(), meta);
                }
                Ok(None) => {
                    warn!(
                        "Skipping {}: no component metadata found",
                        entry.path().display()
                    );
                }
                Err(err) => {
                    warn!(
                        "Skipping {}: {:#}",
                        entry.path().display(),
                        err
                    );
                }
            }
        }

        write_conf(ctx.working_dir(), tool_conf, &generated, dir_conf).await?;
        Ok(generated)
    }
}

/// Read a component's metadata document, trying `.bower.json` first.
async fn read_component_meta(component_dir: &Path) -> anyhow::Result<Option<ComponentMeta>> {
    for file in COMPONENT_META_FILES {
        let path = component_dir.join(file);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        let meta = serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        return Ok(Some(meta));
    }
    Ok(None)
}

/// Render and write the loader configuration.
async fn write_conf(
    working_dir: &Path,
    tool_conf: &ToolConfig,
    generated: &GeneratedConf,
    dir_conf: &DirectoryConfig,
) -> anyhow::Result<()> {
    let web_base = tool_conf
        .dependencies_web_url
        .clone()
        .unwrap_or_else(|| dir_conf.components_dir().to_string_lossy().into_owned());
    let web_base = web_base.trim_end_matches('/').to_string();

    let mut paths = BTreeMap::new();
    for (name, meta) in &generated.pkg_meta {
        paths.insert(name.clone(), loader_path(&web_base, meta));
    }

    let mut out = String::new();
    for conf_path in &tool_conf.requirejs_configs {
        let path = working_dir.join(conf_path);
        let existing = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read loader config: {}", path.display()))?;
        out.push_str(&existing);
        if !existing.ends_with('\n') {
            out.push('\n');
        }
    }

    let rendered = serde_json::to_string_pretty(&json!({ "paths": paths }))
        .context("Failed to render loader paths")?;
    out.push_str("require.config(");
    out.push_str(&rendered);
    out.push_str(");\n");

    let target = working_dir.join(GENERATED_CONF_FILE);
    tokio::fs::write(&target, out)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;
    debug!(file = %target.display(), "wrote loader configuration");
    Ok(())
}

/// Web path a component's module name resolves to: the component directory,
/// plus the main entry file with its `.js` suffix stripped when declared.
fn loader_path(web_base: &str, meta: &ComponentMeta) -> String {
    let main = meta
        .main
        .as_ref()
        .and_then(|m| m.first())
        .map(|m| m.trim_start_matches("./"));
    match main {
        Some(main) => {
            let main = main.strip_suffix(".js").unwrap_or(main);
            format!("{}/{}/{}", web_base, meta.name, main)
        }
        None => format!("{}/{}", web_base, meta.name),
    }
}
