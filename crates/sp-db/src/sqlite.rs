//! SQLite database backend implementation

use crate::error::{DbError, DbResult};
use crate::statements::split_statements;
use crate::traits::{Database, TransactionMode};
use async_trait::async_trait;
use rusqlite::{Connection, InterruptHandle};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// SQLite database backend
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
    interrupt: Arc<InterruptHandle>,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Open (or create) a SQLite database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from a DSN; empty and `:memory:` open an in-memory database
    pub fn new(dsn: &str) -> DbResult<Self> {
        if dsn.is_empty() || dsn == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(dsn))
        }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            interrupt: Arc::new(conn.get_interrupt_handle()),
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_connection<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Connection) -> DbResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| DbError::Internal(e.to_string()))?
    }
}

/// Step a statement to completion, draining any rows it returns
fn run_statement(conn: &Connection, sql: &str) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    while rows.next()?.is_some() {}
    Ok(())
}

fn execute_batch_sync(conn: &Connection, sql: &str) -> DbResult<()> {
    for statement in split_statements(sql) {
        run_statement(conn, statement)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, statement)))?;
    }
    Ok(())
}

/// `PRAGMA query_only` is connection-wide, so it is switched off again
/// whatever the transaction's outcome.
fn transaction_sync(
    conn: &mut Connection,
    seeds: &[String],
    sql: &str,
    mode: TransactionMode,
) -> DbResult<()> {
    if mode.read_only {
        conn.execute_batch("PRAGMA query_only = ON")
            .map_err(|e| DbError::TransactionError {
                action: "set read-only".to_string(),
                message: e.to_string(),
            })?;
    }

    let result = run_transaction(conn, seeds, sql, mode);

    if mode.read_only {
        if let Err(e) = conn.execute_batch("PRAGMA query_only = OFF") {
            log::warn!("sqlite: could not reset query_only: {}", e);
        }
    }
    result
}

fn run_transaction(
    conn: &mut Connection,
    seeds: &[String],
    sql: &str,
    mode: TransactionMode,
) -> DbResult<()> {
    let tx = conn.transaction().map_err(|e| DbError::TransactionError {
        action: "begin".to_string(),
        message: e.to_string(),
    })?;

    let seed_batch = seeds.join(";\n");
    for statement in split_statements(&seed_batch) {
        run_statement(&tx, statement)
            .map_err(|e| DbError::SeedError(format!("{}: {}", e, statement)))?;
    }
    for statement in split_statements(sql) {
        run_statement(&tx, statement)?;
    }

    let (action, result) = if mode.commit {
        ("commit", tx.commit())
    } else {
        ("rollback", tx.rollback())
    };
    result.map_err(|e| DbError::TransactionError {
        action: action.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl Database for SqliteBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let sql = sql.to_string();
        self.with_connection(move |conn| execute_batch_sync(conn, &sql))
            .await
    }

    async fn execute_in_transaction(
        &self,
        seeds: &[String],
        sql: &str,
        mode: TransactionMode,
    ) -> DbResult<()> {
        let seeds = seeds.to_vec();
        let sql = sql.to_string();
        self.with_connection(move |conn| transaction_sync(conn, &seeds, &sql, mode))
            .await
    }

    fn interrupt(&self) {
        self.interrupt.interrupt();
    }

    fn db_type(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
