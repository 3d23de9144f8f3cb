//! The CLI can do a few things. This provides a central point where those things are routed
//! and then done, making it easier to test this crate deterministically.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use odata_sql_cli::{run, Command, Context};

/// The release version specified at build time.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "odata-sql", version = VERSION)]
pub struct Args {
    /// The command to invoke.
    #[command(subcommand)]
    pub subcommand: Command,
}

/// The application entrypoint. It pulls information from the environment and then calls the
/// [run] function.
#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let context = Context {
        output: Box::new(std::io::stdout()),
    };
    run(args.subcommand, context).await?;
    Ok(())
}
