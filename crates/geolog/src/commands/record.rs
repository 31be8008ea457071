//! Record a single location fix.

use anyhow::{Context, Result};
use colored::Colorize;
use geolog_core::{Database, NewLocation};
use tracing::info;

use crate::cli::RecordCommand;
use crate::config::Config;

pub fn execute(cmd: RecordCommand, config: &Config) -> Result<()> {
    let path = config.resolve_database(cmd.database);
    let db = Database::open_path(&path)
        .with_context(|| format!("Failed to open database at {:?}", path))?;

    let stored = db
        .insert_location(&NewLocation {
            source: cmd.source,
            latitude: cmd.latitude,
            longitude: cmd.longitude,
        })
        .context("Failed to record location fix (is the database migrated?)")?;

    info!("recorded location fix: {:?}", stored);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    } else {
        println!(
            "{} #{} {} ({}, {}) at {}",
            "Recorded".green().bold(),
            stored.id,
            stored.source,
            stored.latitude,
            stored.longitude,
            stored.created_at,
        );
    }

    Ok(())
}
