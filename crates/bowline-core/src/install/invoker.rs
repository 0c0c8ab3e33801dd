//! Package manager invocation.

use std::process::Stdio;

use anyhow::Context;
use tracing::debug;

/// Binary invoked when the tool settings do not name one.
pub const DEFAULT_PACKAGE_MANAGER: &str = "bower";

/// Seam to the external package manager.
///
/// Exposes one install invocation as a single completion: the returned value
/// is the child's exit code, with `None` when the process was terminated by
/// a signal. The orchestrator never interprets partial output.
pub trait PackageManager {
    fn install(&self, args: &[String]) -> impl Future<Output = anyhow::Result<Option<i32>>> + Send;
}

/// Production invoker: spawns the package manager binary with the filtered
/// argument list and the controlling terminal attached, so interactive
/// prompts (version conflict resolution and the like) reach the operator.
#[derive(Debug, Clone)]
pub struct BowerProcess {
    binary: String,
}

impl BowerProcess {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for BowerProcess {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_MANAGER)
    }
}

impl PackageManager for BowerProcess {
    async fn install(&self, args: &[String]) -> anyhow::Result<Option<i32>> {
        debug!(binary = %self.binary, ?args, "spawning package manager");
        let status = tokio::process::Command::new(&self.binary)
            .arg("install")
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to run {} install", self.binary))?;
        Ok(status.code())
    }
}
