//! Catalog portal submission.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::config::ToolConfig;
use crate::context::AppContext;

/// Seam to the remote catalog service.
///
/// Consumes the working directory, the full component-path mapping and an
/// optional single-component path; when the single path is given only that
/// component is published.
pub trait PortalClient {
    fn submit(
        &self,
        ctx: &AppContext,
        tool_conf: &ToolConfig,
        components: &BTreeMap<String, PathBuf>,
        component_path: Option<&Path>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Production portal client: POSTs one JSON component manifest per
/// published component to `<portal_url>/catalog/components`.
#[derive(Debug, Clone)]
pub struct RestPortalClient {
    http: reqwest::Client,
}

impl RestPortalClient {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bowline/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

impl PortalClient for RestPortalClient {
    async fn submit(
        &self,
        ctx: &AppContext,
        tool_conf: &ToolConfig,
        components: &BTreeMap<String, PathBuf>,
        component_path: Option<&Path>,
    ) -> anyhow::Result<()> {
        let base = tool_conf
            .portal_url
            .as_deref()
            .context("portalUrl is not configured in bowline.json")?;
        let base = Url::parse(base).with_context(|| format!("Invalid portal URL: {}", base))?;
        // Url::join would drop a trailing path segment of the base; the
        // catalog endpoint always nests under the configured URL as given.
        let endpoint = format!("{}/catalog/components", base.as_str().trim_end_matches('/'));

        for (name, rel) in components {
            let absolute = ctx.working_dir().join(rel);
            if let Some(only) = component_path
                && absolute != only
            {
                continue;
            }

            debug!(component = %name, url = %endpoint, "submitting component");
            let body = json!({
                "name": name,
                "path": rel.to_string_lossy(),
            });
            let response = self
                .http
                .post(endpoint.as_str())
                .json(&body)
                .send()
                .await
                .with_context(|| format!("Failed to submit component '{}'", name))?;
            if !response.status().is_success() {
                anyhow::bail!(
                    "Portal rejected component '{}': HTTP {}",
                    name,
                    response.status()
                );
            }
        }
        Ok(())
    }
}
