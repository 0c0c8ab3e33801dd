//! Component path resolution from generated package metadata.

use std::path::PathBuf;

use crate::context::AppContext;
use crate::endpoint::Endpoint;
use crate::generate::GeneratedConf;

/// Derive the canonical component name for an endpoint.
///
/// The package metadata is the source of truth, not the raw endpoint string:
/// a target may be a URL, shorthand or local path that does not equal its
/// package name. Tried in order: direct name match, recorded install source,
/// trailing path segment.
pub fn component_name<'a>(endpoint: &Endpoint, generated: &'a GeneratedConf) -> Option<&'a str> {
    let raw = endpoint.as_str();

    if let Some((name, _)) = generated.pkg_meta.get_key_value(raw) {
        return Some(name.as_str());
    }

    for (name, meta) in &generated.pkg_meta {
        if meta.source.as_deref() == Some(raw) || meta.original_source.as_deref() == Some(raw) {
            return Some(name.as_str());
        }
    }

    let segment = trailing_segment(raw)?;
    generated
        .pkg_meta
        .get_key_value(segment)
        .map(|(name, _)| name.as_str())
}

/// Absolute on-disk path of the endpoint's component, when the generated
/// mapping knows it. Absence is "no single-component path", never an error.
pub fn component_path(
    ctx: &AppContext,
    endpoint: &Endpoint,
    generated: &GeneratedConf,
) -> Option<PathBuf> {
    let name = component_name(endpoint, generated)?;
    generated
        .components
        .get(name)
        .map(|rel| ctx.working_dir().join(rel))
}

/// Last non-empty path segment, with any `.git` suffix stripped.
fn trailing_segment(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().filter(|s| !s.is_empty())?;
    Some(segment.strip_suffix(".git").unwrap_or(segment))
}
