//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// How a test's SQL transaction ends, and what it may do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionMode {
    /// Commit instead of rolling back
    pub commit: bool,
    /// Ask the backend to refuse writes, where it supports that
    pub read_only: bool,
}

/// Database abstraction trait for sqlproof
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute multiple `;`-separated statements outside a transaction
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run `seeds` then `sql` inside one transaction.
    ///
    /// Seeds are joined with `;` and split back into statements, so each
    /// seed may hold several. The transaction is rolled back unless
    /// `mode.commit` is set, and always rolled back on error.
    async fn execute_in_transaction(
        &self,
        seeds: &[String],
        sql: &str,
        mode: TransactionMode,
    ) -> DbResult<()>;

    /// Ask the running statement, if any, to stop.
    ///
    /// Called when a caller gives up waiting, so the connection is freed
    /// for the next test. The interrupted call returns an error.
    fn interrupt(&self);

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
