//! Transaction management utilities.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::Result;

use super::connection::Database;

impl Database {
    /// Runs `f` inside an immediate transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back if it
    /// returns `Err` or panics.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a database error if the transaction
    /// cannot be started or committed.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::database::Database;
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let rows = db
    ///     .with_transaction(|tx| {
    ///         tx.execute(
    ///             "INSERT INTO env_backups (project, path) VALUES (?1, ?2)",
    ///             ["arc", ".env"],
    ///         )?;
    ///         Ok(tx.query_row("SELECT COUNT(*) FROM env_backups", [], |row| row.get::<_, i64>(0))?)
    ///     })
    ///     .unwrap();
    /// assert_eq!(rows, 1);
    /// ```
    pub fn with_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        // Dropping an uncommitted transaction rolls it back.
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
