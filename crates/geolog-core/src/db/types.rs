//! Database types for geolog-core.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Entity Types
// ─────────────────────────────────────────────────────────────────────────────

/// A stored location fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub source: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: NaiveDateTime,
}

/// Column metadata reported by the schema inspection helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub not_null: bool,
    pub primary_key: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Types (for creating entities)
// ─────────────────────────────────────────────────────────────────────────────

/// Input for recording a new location fix
#[derive(Debug, Clone)]
pub struct NewLocation {
    /// Provenance label, e.g. an ingesting subsystem or device name
    pub source: String,
    pub latitude: f64,
    pub longitude: f64,
}
