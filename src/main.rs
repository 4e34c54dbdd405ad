//! CLI entry point for shape-constrained collage generation

use clap::Parser;
use shapecollage::io::cli::{Cli, CollageCommand};
use tracing_subscriber::EnvFilter;

fn main() -> shapecollage::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    CollageCommand::new(cli).run()
}
