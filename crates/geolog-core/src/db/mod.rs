//! Direct SQLite database access for geolog.
//!
//! This module provides read/write access to the geolog location database.
//!
//! Database location priority:
//! 1. GEOLOG_DATABASE_PATH env var
//! 2. Walk up directory tree looking for geolog.db
//! 3. ~/.geolog/geolog.db

pub mod migrations;
pub mod types;

pub use types::*;

use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Database connection wrapper.
///
/// Thread-safe via internal Mutex. All database operations acquire the lock.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open database connection, auto-detecting location
    pub fn open() -> Result<Self> {
        let path = Self::find_database()?;
        Self::open_path(&path)
    }

    /// Open database at specific path, creating the file if it does not exist
    pub fn open_path(path: &Path) -> Result<Self> {
        debug!("opening location database at {}", path.display());
        let conn = Connection::open(path).map_err(Error::Database)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::Database)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Find database file location
    fn find_database() -> Result<PathBuf> {
        // 1. Environment variable
        if let Ok(path) = std::env::var("GEOLOG_DATABASE_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        // 2. Walk up directory tree from current dir
        if let Ok(mut current) = std::env::current_dir() {
            loop {
                let db_path = current.join("geolog.db");
                if db_path.exists() {
                    return Ok(db_path);
                }
                if !current.pop() {
                    break;
                }
            }
        }

        // 3. Check common locations
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let candidates = [
            home.join(".geolog/geolog.db"),
            PathBuf::from("./geolog.db"),
        ];

        for candidate in &candidates {
            if candidate.exists() {
                return Ok(candidate.clone());
            }
        }

        Err(Error::DatabaseNotFound)
    }

    /// Check database connectivity
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute_batch("SELECT 1").map_err(Error::Database)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Schema Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply the embedded schema migrations.
    ///
    /// Table creation is conditional on absence, so re-running produces no
    /// error and no structural change. Storage-engine failures (unreachable
    /// file, permissions, incompatible object with the same name) are
    /// surfaced verbatim.
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        migrations::run_migrations(&conn)?;
        info!("schema migrations applied");
        Ok(())
    }

    /// Check whether the locations table exists
    pub fn has_locations_table(&self) -> Result<bool> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'locations'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Column layout of the locations table, in declaration order
    pub fn locations_columns(&self) -> Result<Vec<ColumnInfo>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare("PRAGMA table_info(locations)")?;

        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get(1)?,
                    not_null: row.get(3)?,
                    primary_key: row.get::<_, i32>(5)? > 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(columns)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Location Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a new location fix, returning the stored row.
    ///
    /// `id` is assigned by the storage engine and `created_at` defaults to
    /// the insertion timestamp.
    pub fn insert_location(&self, location: &NewLocation) -> Result<Location> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "INSERT INTO locations (source, latitude, longitude)
             VALUES (?1, ?2, ?3)
             RETURNING id, source, latitude, longitude, created_at",
        )?;

        let stored = stmt.query_row(
            params![location.source, location.latitude, location.longitude],
            Self::map_location,
        )?;

        Ok(stored)
    }

    /// Get location fix by ID
    pub fn location(&self, id: i64) -> Result<Option<Location>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, source, latitude, longitude, created_at
             FROM locations WHERE id = ?1",
        )?;

        Ok(stmt
            .query_row(params![id], Self::map_location)
            .optional()?)
    }

    /// Count stored location fixes
    pub fn count_locations(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
        Ok(count)
    }

    fn map_location(row: &rusqlite::Row) -> rusqlite::Result<Location> {
        Ok(Location {
            id: row.get(0)?,
            source: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::tempdir;

    fn migrated_db() -> Database {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        db.migrate().expect("Failed to migrate database");
        db
    }

    #[test]
    fn test_open_path_creates_database() {
        let temp = tempdir().expect("Failed to create temp dir");
        let db_path = temp.path().join("test.db");

        // Database shouldn't exist yet
        assert!(!db_path.exists());

        // Opening should create it
        let result = Database::open_path(&db_path);
        assert!(result.is_ok(), "Failed to open database: {:?}", result.err());

        // Path should exist after creation
        assert!(db_path.exists());
    }

    #[test]
    fn test_open_path_with_nonexistent_parent() {
        let temp = tempdir().expect("Failed to create temp dir");
        let db_path = temp.path().join("nested").join("path").join("test.db");

        // This should fail because parent directories don't exist
        let result = Database::open_path(&db_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_open_uses_env_override() {
        let temp = tempdir().expect("Failed to create temp dir");
        let db_path = temp.path().join("geolog.db");

        // Auto-detection only accepts paths that exist
        Database::open_path(&db_path).unwrap();

        unsafe { std::env::set_var("GEOLOG_DATABASE_PATH", &db_path) };
        let result = Database::open();
        unsafe { std::env::remove_var("GEOLOG_DATABASE_PATH") };

        assert!(result.is_ok(), "Failed to open database: {:?}", result.err());
    }

    #[test]
    fn test_migrate_creates_locations_table() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.has_locations_table().unwrap());

        db.migrate().unwrap();
        assert!(db.has_locations_table().unwrap());

        let columns = db.locations_columns().unwrap();
        let expected = [
            ("id", true, true),
            ("source", true, false),
            ("latitude", true, false),
            ("longitude", true, false),
            ("created_at", true, false),
        ];
        assert_eq!(columns.len(), expected.len());
        for (column, (name, not_null, primary_key)) in columns.iter().zip(expected) {
            assert_eq!(column.name, name);
            assert_eq!(column.not_null, not_null, "nullability of {}", name);
            assert_eq!(column.primary_key, primary_key, "primary key flag of {}", name);
        }
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let db = migrated_db();
        let columns = db.locations_columns().unwrap();

        // Second run: no error, no structural change, existing rows untouched
        db.insert_location(&NewLocation {
            source: "gps-1".into(),
            latitude: 1.0,
            longitude: 2.0,
        })
        .unwrap();
        db.migrate().unwrap();

        assert_eq!(db.locations_columns().unwrap(), columns);
        assert_eq!(db.count_locations().unwrap(), 1);
    }

    #[test]
    fn test_migrate_on_disk_database() {
        let temp = tempdir().expect("Failed to create temp dir");
        let db_path = temp.path().join("geolog.db");

        let db = Database::open_path(&db_path).unwrap();
        db.migrate().unwrap();

        // Reopening sees the persisted schema
        drop(db);
        let db = Database::open_path(&db_path).unwrap();
        assert!(db.has_locations_table().unwrap());
    }

    #[test]
    fn test_insert_returns_stored_row() {
        let db = migrated_db();

        let stored = db
            .insert_location(&NewLocation {
                source: "gps-1".into(),
                latitude: 37.7749,
                longitude: -122.4194,
            })
            .unwrap();

        assert!(stored.id > 0);
        assert_eq!(stored.source, "gps-1");
        assert_eq!(stored.latitude, 37.7749);
        assert_eq!(stored.longitude, -122.4194);

        let fetched = db.location(stored.id).unwrap().expect("row not found");
        assert_eq!(fetched.id, stored.id);
        assert_eq!(fetched.source, "gps-1");
        assert_eq!(fetched.latitude, 37.7749);
        assert_eq!(fetched.longitude, -122.4194);
        assert_eq!(fetched.created_at, stored.created_at);
    }

    #[test]
    fn test_insert_defaults_created_at_to_now() {
        let db = migrated_db();

        // CURRENT_TIMESTAMP has one-second resolution, so compare with slack
        let before = Utc::now().naive_utc() - Duration::seconds(5);
        let stored = db
            .insert_location(&NewLocation {
                source: "gps-1".into(),
                latitude: 0.0,
                longitude: 0.0,
            })
            .unwrap();
        let after = Utc::now().naive_utc() + Duration::seconds(5);

        assert!(stored.created_at >= before, "created_at too old: {}", stored.created_at);
        assert!(stored.created_at <= after, "created_at in the future: {}", stored.created_at);
    }

    #[test]
    fn test_sequential_inserts_get_increasing_ids() {
        let db = migrated_db();

        let first = db
            .insert_location(&NewLocation {
                source: "gps-1".into(),
                latitude: 1.0,
                longitude: 2.0,
            })
            .unwrap();
        let second = db
            .insert_location(&NewLocation {
                source: "gps-2".into(),
                latitude: 3.0,
                longitude: 4.0,
            })
            .unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_null_columns_are_rejected() {
        let db = migrated_db();
        let conn = db.conn.lock().unwrap();

        let inserts = [
            "INSERT INTO locations (source, latitude, longitude) VALUES (NULL, 1.0, 2.0)",
            "INSERT INTO locations (source, latitude, longitude) VALUES ('gps-1', NULL, 2.0)",
            "INSERT INTO locations (source, latitude, longitude) VALUES ('gps-1', 1.0, NULL)",
        ];
        for sql in inserts {
            let err = conn.execute(sql, []).unwrap_err();
            match err {
                rusqlite::Error::SqliteFailure(e, _) => {
                    assert_eq!(e.code, rusqlite::ErrorCode::ConstraintViolation)
                }
                other => panic!("unexpected error for {:?}: {:?}", sql, other),
            }
        }
    }

    #[test]
    fn test_location_returns_none_for_missing_id() {
        let db = migrated_db();
        assert!(db.location(42).unwrap().is_none());
    }

    #[test]
    fn test_count_locations() {
        let db = migrated_db();
        assert_eq!(db.count_locations().unwrap(), 0);

        for i in 0..3 {
            db.insert_location(&NewLocation {
                source: format!("gps-{}", i),
                latitude: i as f64,
                longitude: -(i as f64),
            })
            .unwrap();
        }

        assert_eq!(db.count_locations().unwrap(), 3);
    }

    #[test]
    fn test_insert_without_migration_fails() {
        let db = Database::open_in_memory().unwrap();

        let result = db.insert_location(&NewLocation {
            source: "gps-1".into(),
            latitude: 1.0,
            longitude: 2.0,
        });
        assert!(result.is_err());
    }
}
