//! Bowline core library.
//!
//! Domain logic for the install orchestration pipeline: configuration
//! documents, argument filtering, endpoint classification, package-manager
//! invocation, loader configuration generation and catalog submission.

pub mod config;
pub mod context;
pub mod endpoint;
pub mod generate;
pub mod install;
pub mod invocation;
pub mod portal;
pub mod resolve;

/// Re-exports of commonly used types.
pub mod prelude {
    pub use crate::config::{ConfigBundle, DependencyManifest, DirectoryConfig, ToolConfig};
    pub use crate::context::AppContext;
    pub use crate::endpoint::Endpoint;
    pub use crate::generate::{ConfGenerator, GeneratedConf, RequireConfGenerator};
    pub use crate::install::{
        BowerProcess, InstallPipeline, PackageManager, PipelineError, PipelineOutcome,
    };
    pub use crate::invocation::{InstallOptions, InvocationContext};
    pub use crate::portal::{PortalClient, RestPortalClient};
}
