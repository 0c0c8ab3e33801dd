//! The three configuration documents read before install begins.

mod dir_conf;
mod manifest;
mod tool_conf;

pub use dir_conf::{DEFAULT_COMPONENTS_DIR, DirectoryConfig};
pub use manifest::DependencyManifest;
pub use tool_conf::ToolConfig;

use anyhow::Context;

use crate::context::AppContext;

/// The configuration bundle: dependency manifest, directory settings and
/// tool settings, loaded independently of each other.
#[derive(Debug, Clone)]
pub struct ConfigBundle {
    pub manifest: DependencyManifest,
    pub dir_conf: DirectoryConfig,
    pub tool_conf: ToolConfig,
}

/// Load all three documents concurrently; any single failure fails the
/// bundle as a whole.
pub async fn load_bundle(ctx: &AppContext) -> anyhow::Result<ConfigBundle> {
    let dir = ctx.working_dir();
    let (manifest, dir_conf, tool_conf) = tokio::try_join!(
        DependencyManifest::load(dir),
        DirectoryConfig::load(dir),
        ToolConfig::load(dir),
    )
    .context("Failed to read configuration")?;

    Ok(ConfigBundle {
        manifest,
        dir_conf,
        tool_conf,
    })
}
