//! CLI argument definitions using clap derive macros.
//!
//! Command structure for the location database tooling.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Location database CLI
///
/// Applies the locations schema migration and inspects the database.
#[derive(Parser, Debug)]
#[command(name = "geolog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply schema migrations to the location database
    Migrate(MigrateCommand),

    /// Record a single location fix
    Record(RecordCommand),

    /// Run diagnostics
    Doctor(DoctorCommand),

    /// Show version
    Version,
}

#[derive(Args, Debug)]
pub struct MigrateCommand {
    /// Database file to migrate (defaults to the configured path)
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RecordCommand {
    /// Provenance label for the fix (e.g. an ingesting subsystem or device name)
    #[arg(short, long)]
    pub source: String,

    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: f64,

    /// Database file to write to (defaults to the configured path)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Output the stored row as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DoctorCommand {
    /// Database file to check (defaults to the configured path)
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}
