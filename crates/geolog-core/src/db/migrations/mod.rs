//! Location database migrations
//!
//! SQL migrations are embedded as strings and executed when the schema is
//! applied, either by the geolog CLI or by an embedding application.

use rusqlite::Connection;

use crate::error::Result;

/// Locations table SQL (001)
pub const LOCATIONS_TABLE_SQL: &str = include_str!("001_locations.sql");

/// Run all schema migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(LOCATIONS_TABLE_SQL)?;
    Ok(())
}
