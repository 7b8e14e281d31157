//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::statements::split_statements;
use crate::traits::{Database, TransactionMode};
use async_trait::async_trait;
use duckdb::{Connection, InterruptHandle};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Arc<Mutex<Connection>>,
    interrupt: Arc<InterruptHandle>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path.is_empty() || path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            interrupt: conn.interrupt_handle(),
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the connection on the blocking pool, so callers can
    /// put a timeout around it.
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

/// Execute batch SQL synchronously, one statement at a time
fn execute_batch_sync(conn: &Connection, sql: &str) -> DbResult<()> {
    for statement in split_statements(sql) {
        conn.execute_batch(statement)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, statement)))?;
    }
    Ok(())
}

fn transaction_sync(
    conn: &mut Connection,
    seeds: &[String],
    sql: &str,
    mode: TransactionMode,
) -> DbResult<()> {
    // DuckDB only honours access_mode at startup; a live connection
    // refuses the setting.
    if mode.read_only {
        if let Err(e) = conn.execute_batch("SET access_mode = 'READ_ONLY'") {
            log::warn!("duckdb: read-only mode not enforced: {}", e);
        }
    }

    let tx = conn.transaction().map_err(|e| DbError::TransactionError {
        action: "begin".to_string(),
        message: e.to_string(),
    })?;

    let seed_batch = seeds.join(";\n");
    for statement in split_statements(&seed_batch) {
        tx.execute_batch(statement)
            .map_err(|e| DbError::SeedError(format!("{}: {}", e, statement)))?;
    }
    for statement in split_statements(sql) {
        tx.execute_batch(statement)
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
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
impl Database for DuckDbBackend {
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
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
