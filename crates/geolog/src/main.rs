//! geolog - Location database CLI
//!
//! Applies the locations schema and inspects the resulting database.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("geolog=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load()?;

    // Execute command
    match cli.command {
        Commands::Migrate(cmd) => commands::migrate::execute(cmd, &config),
        Commands::Record(cmd) => commands::record::execute(cmd, &config),
        Commands::Doctor(cmd) => commands::doctor::execute(cmd, &config),
        Commands::Version => {
            println!("geolog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
