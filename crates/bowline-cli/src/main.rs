//! Bowline - front-end install wrapper
//!
//! Usage:
//!   bowline install                    # Install all declared dependencies
//!   bowline install jquery             # Install one component
//!   bowline install widget-feed -C     # Install and publish to the catalog

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bowline_core::context::AppContext;
use bowline_core::generate::RequireConfGenerator;
use bowline_core::install::{BowerProcess, InstallPipeline, PipelineOutcome};
use bowline_core::invocation::InvocationContext;
use bowline_core::portal::RestPortalClient;

#[derive(Parser)]
#[command(name = "bowline")]
#[command(about = "Package manager wrapper with loader config generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install dependencies and regenerate the loader configuration
    ///
    /// Installs all or the named dependencies through the wrapped package
    /// manager, regenerates the RequireJS-style configuration from the
    /// installed components, and uploads the component model to the catalog
    /// portal when asked to.
    ///
    /// Tool options (everything else is forwarded to the package manager,
    /// e.g. --save, --save-dev, --production):
    ///   -C, --catalog              Upload the component model to the portal after install
    ///       --web-url <string>     Web path to the components directory (default: the directory itself)
    ///       --require-confs <paths> Comma separated relative paths to existing loader configs to merge
    ///
    /// Examples:
    ///   bowline install                 Install everything, regenerate the loader config
    ///   bowline install jquery          Install jquery, regenerate the loader config
    ///   bowline install widget-feed -C  Install, regenerate, publish to the catalog
    #[command(verbatim_doc_comment)]
    Install {
        /// Endpoints, tool options and package-manager arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bowline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Install { args } => run_install(args).await,
    }
}

async fn run_install(args: Vec<String>) -> Result<()> {
    let ctx = AppContext::current()?;
    let invocation = InvocationContext::parse(args);

    let pipeline = InstallPipeline::new(
        ctx,
        BowerProcess::default(),
        RequireConfGenerator,
        RestPortalClient::new()?,
    );

    println!("{}", style("Running bower install...").dim());

    match pipeline.run(&invocation).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            Ok(())
        }
        Err(err) => {
            let err = anyhow::Error::new(err);
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            std::process::exit(1);
        }
    }
}

fn print_outcome(outcome: &PipelineOutcome) {
    match &outcome.endpoint {
        Some(endpoint) => println!(
            "{}",
            style(format!("Component \"{}\" install done.", endpoint)).dim()
        ),
        None => println!("{}", style("Install done.").dim()),
    }
    println!(
        "Loader configuration generated for {} component(s).",
        outcome.components.len()
    );
    if outcome.submitted {
        println!("{}", style("Component model submitted to the portal.").green());
    }
}
