//! Stale local component cleanup.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

/// Remove a previously materialized copy of a local component before the
/// install spawns.
///
/// A local re-install must not merge with or be shadowed by a stale prior
/// copy, so removal completes (or fails the pipeline) before the package
/// manager starts. No prior copy is a no-op.
pub fn clean_local_component(install_dir: &Path, endpoint: &str) -> anyhow::Result<()> {
    let Some(dir_name) = component_dir_name(endpoint) else {
        anyhow::bail!("Cannot derive a component directory from endpoint: {}", endpoint);
    };
    let target = install_dir.join(dir_name);
    if !target.exists() {
        return Ok(());
    }
    debug!(path = %target.display(), "removing stale local component");
    std::fs::remove_dir_all(&target)
        .with_context(|| format!("Failed to remove stale component: {}", target.display()))
}

/// Directory name a local endpoint materializes under: its last path segment.
fn component_dir_name(endpoint: &str) -> Option<&str> {
    endpoint
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && *s != ".")
}
