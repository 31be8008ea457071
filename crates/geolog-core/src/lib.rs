//! geolog-core - Core library for geolog
//!
//! This crate provides the persistent schema and storage access shared by the
//! geolog CLI and any embedding application:
//!
//! - **db**: SQLite database access and the embedded schema migration
//! - **error**: error types

pub mod db;
pub mod error;

// Re-export commonly used types
pub use db::{ColumnInfo, Database, Location, NewLocation};
pub use error::{Error, Result};
