//! The install orchestration pipeline.
//!
//! Stages run in strict sequence: the three configuration documents load
//! concurrently and join all-or-nothing, then (for a local endpoint) the
//! stale prior copy is removed, then the package manager runs to completion,
//! then the loader configuration is generated, then the endpoint's component
//! path is resolved and the component model is submitted when the catalog
//! flag was given. No stage is retried and nothing is rolled back.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config;
use crate::context::AppContext;
use crate::generate::ConfGenerator;
use crate::invocation::InvocationContext;
use crate::portal::PortalClient;
use crate::resolve;

use super::invoker::PackageManager;
use super::local::clean_local_component;

/// Terminal failure channels of one pipeline run.
///
/// Each variant names the stage that failed, so callers can distinguish
/// "nothing happened" from the intentional partial-success state where
/// dependencies are installed but generation (or submission) did not
/// complete. Package-manager exit status is never a channel of its own: a
/// non-zero exit is logged and the pipeline proceeds.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One of the three configuration documents failed to load; the install
    /// was never invoked.
    #[error("configuration read failed")]
    ConfigRead(#[source] anyhow::Error),
    /// The stale prior copy of a local component could not be removed; the
    /// install was never invoked.
    #[error("local component cleanup failed")]
    LocalClean(#[source] anyhow::Error),
    /// The package manager could not be spawned.
    #[error("package manager invocation failed")]
    Install(#[source] anyhow::Error),
    /// Loader configuration generation failed. Dependencies installed by the
    /// preceding stage remain installed.
    #[error("loader configuration generation failed")]
    ConfGeneration(#[source] anyhow::Error),
    /// Catalog submission failed. Installed dependencies and the generated
    /// configuration remain in place.
    #[error("catalog submission failed")]
    Submit(#[source] anyhow::Error),
}

/// What one completed run did.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The primary endpoint, when one was named.
    pub endpoint: Option<String>,
    /// Component name → path relative to the working directory.
    pub components: BTreeMap<String, PathBuf>,
    /// Absolute path of the named endpoint's component, when resolvable.
    pub component_path: Option<PathBuf>,
    /// Whether the component model was submitted to the portal.
    pub submitted: bool,
}

/// Orchestrates one install run over its three collaborators.
#[derive(Debug)]
pub struct InstallPipeline<M, G, P> {
    ctx: AppContext,
    manager: M,
    generator: G,
    portal: P,
}

impl<M, G, P> InstallPipeline<M, G, P>
where
    M: PackageManager,
    G: ConfGenerator,
    P: PortalClient,
{
    pub fn new(ctx: AppContext, manager: M, generator: G, portal: P) -> Self {
        Self {
            ctx,
            manager,
            generator,
            portal,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Run the pipeline for one invocation.
    pub async fn run(
        &self,
        invocation: &InvocationContext,
    ) -> Result<PipelineOutcome, PipelineError> {
        debug!("loading configuration");
        let bundle = config::load_bundle(&self.ctx)
            .await
            .map_err(PipelineError::ConfigRead)?;

        let mut tool_conf = bundle.tool_conf;
        tool_conf.apply_overrides(invocation.options());

        if let Some(endpoint) = invocation.endpoint()
            && endpoint.is_local()
        {
            let install_dir = bundle.dir_conf.install_dir(self.ctx.working_dir());
            clean_local_component(&install_dir, endpoint.as_str())
                .map_err(PipelineError::LocalClean)?;
        }

        let forwarded = invocation.forwarded_args();
        debug!(?forwarded, "invoking install");
        let exit_code = self
            .manager
            .install(&forwarded)
            .await
            .map_err(PipelineError::Install)?;
        if exit_code != Some(0) {
            // Completion, not success, advances the pipeline; the exit
            // status is surfaced to the operator and otherwise ignored.
            warn!(?exit_code, "package manager exited abnormally, continuing");
        }

        debug!("generating loader configuration");
        let generated = self
            .generator
            .generate(&self.ctx, &bundle.manifest, &bundle.dir_conf, &tool_conf)
            .await
            .map_err(PipelineError::ConfGeneration)?;

        let component_path = invocation
            .endpoint()
            .and_then(|endpoint| resolve::component_path(&self.ctx, endpoint, &generated));

        let submitted = invocation.catalog_requested();
        if submitted {
            debug!("submitting component model to portal");
            self.portal
                .submit(
                    &self.ctx,
                    &tool_conf,
                    &generated.components,
                    component_path.as_deref(),
                )
                .await
                .map_err(PipelineError::Submit)?;
        }

        Ok(PipelineOutcome {
            endpoint: invocation.endpoint().map(|e| e.as_str().to_string()),
            components: generated.components,
            component_path,
            submitted,
        })
    }
}
