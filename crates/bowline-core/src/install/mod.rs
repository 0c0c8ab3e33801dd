//! Install invocation, local component cleanup and the pipeline itself.

mod invoker;
mod local;
mod pipeline;

pub use invoker::{BowerProcess, DEFAULT_PACKAGE_MANAGER, PackageManager};
pub use local::clean_local_component;
pub use pipeline::{InstallPipeline, PipelineError, PipelineOutcome};
