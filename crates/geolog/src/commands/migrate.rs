//! Schema migration command.

use anyhow::{Context, Result};
use colored::Colorize;
use geolog_core::Database;
use tracing::info;

use crate::cli::MigrateCommand;
use crate::config::Config;

pub fn execute(cmd: MigrateCommand, config: &Config) -> Result<()> {
    let path = config.resolve_database(cmd.database);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {:?}", parent))?;
        }
    }

    let db = Database::open_path(&path)
        .with_context(|| format!("Failed to open database at {:?}", path))?;
    db.migrate()
        .with_context(|| format!("Failed to migrate database at {:?}", path))?;

    info!("locations schema applied to {}", path.display());
    println!("{} {}", "Migrated".green().bold(), path.display());
    Ok(())
}
