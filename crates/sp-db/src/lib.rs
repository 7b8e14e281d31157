//! sp-db - Database abstraction layer for sqlproof
//!
//! This crate provides the `Database` trait used to execute rendered SQL
//! inside a transaction, with SQLite and DuckDB implementations. MySQL and
//! Postgres are recognized by [`connect`] but report
//! [`DbError::NotImplemented`].

pub mod duckdb;
pub mod error;
pub mod sqlite;
pub mod statements;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use sqlite::SqliteBackend;
pub use statements::split_statements;
pub use traits::{Database, TransactionMode};

use sp_core::{DbType, ResolvedConnection};

/// Open a backend for a resolved connection
pub fn connect(connection: &ResolvedConnection) -> DbResult<Box<dyn Database>> {
    match connection.db_type {
        DbType::Sqlite => Ok(Box::new(SqliteBackend::new(&connection.dsn)?)),
        DbType::DuckDb => Ok(Box::new(DuckDbBackend::new(&connection.dsn)?)),
        other => Err(DbError::NotImplemented {
            backend: other.to_string(),
            feature: "connections".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
