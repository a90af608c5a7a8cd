//! Domain service for the stock ledger and its history log.
//!
//! Every mutating operation loads one record, applies a bounded change and
//! appends exactly one history entry, or none when the change was a no-op.

use thiserror::Error;

use crate::db::{HistoryEntry, StockRecord};
use crate::domain::{DashboardSummary, StockId};

/// Errors specific to stock operations.
#[derive(Debug, Error)]
pub enum StockError {
    #[error("Stock record {0} not found")]
    NotFound(StockId),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for StockError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StockError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Result of a mutating operation on an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The record changed and this entry was appended to the history log.
    Applied(HistoryEntry),
    /// Nothing changed (decrement at zero), nothing was logged.
    Skipped,
}

impl ActionResult {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Domain service trait for the ledger.
#[async_trait::async_trait]
pub trait StockService: Send + Sync {
    /// All records ordered by sector.
    async fn list(&self) -> Result<Vec<StockRecord>, StockError>;

    /// # Errors
    ///
    /// Returns [`StockError::NotFound`] if the record does not exist.
    async fn get(&self, id: StockId) -> Result<StockRecord, StockError>;

    /// Adds one unit and clears the awaiting flag.
    async fn increment(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError>;

    /// Removes one unit; a record already at zero is left untouched.
    async fn decrement(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError>;

    /// Flags the record as awaiting the supplier.
    async fn request(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError>;

    /// Books a delivery: one more unit, awaiting cleared.
    async fn receive(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError>;

    /// Replaces the note with the trimmed input, which may be empty.
    async fn set_note(
        &self,
        id: StockId,
        actor: &str,
        note: &str,
    ) -> Result<ActionResult, StockError>;

    /// Stores the clamped ink reading, or clears it when the input is not a
    /// number. `None` means the field was absent from the form.
    async fn set_ink_level(
        &self,
        id: StockId,
        actor: &str,
        raw: Option<&str>,
    ) -> Result<ActionResult, StockError>;

    /// Most recent history entries first.
    async fn history(&self, limit: u64) -> Result<Vec<HistoryEntry>, StockError>;

    /// Deletes the whole history log and returns how many entries were removed.
    async fn clear_history(&self) -> Result<u64, StockError>;

    async fn dashboard(&self) -> Result<DashboardSummary, StockError>;
}
