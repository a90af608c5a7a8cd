//! `SeaORM` implementation of the `StockService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{ApplyOutcome, HistoryEntry, StockRecord, Store};
use crate::domain::{DashboardSummary, StockAction, StockId};
use crate::services::stock_service::{ActionResult, StockError, StockService};

pub struct SeaOrmStockService {
    store: Store,
}

impl SeaOrmStockService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn apply(
        &self,
        id: StockId,
        action: StockAction,
        actor: &str,
    ) -> Result<ActionResult, StockError> {
        let outcome = self.store.apply_stock_action(id, &action, actor).await?;

        match outcome {
            ApplyOutcome::NotFound => Err(StockError::NotFound(id)),
            ApplyOutcome::Unchanged => {
                info!(stock_id = %id, action = action.kind(), actor, "Stock action skipped");
                Ok(ActionResult::Skipped)
            }
            ApplyOutcome::Applied(entry) => {
                metrics::counter!("stock_actions_total", "action" => action.kind()).increment(1);
                info!(
                    stock_id = %id,
                    action = action.kind(),
                    actor,
                    detail = %entry.detail,
                    "Stock action applied"
                );
                Ok(ActionResult::Applied(entry))
            }
        }
    }
}

#[async_trait]
impl StockService for SeaOrmStockService {
    async fn list(&self) -> Result<Vec<StockRecord>, StockError> {
        Ok(self.store.list_stock_records().await?)
    }

    async fn get(&self, id: StockId) -> Result<StockRecord, StockError> {
        self.store
            .get_stock_record(id)
            .await?
            .ok_or(StockError::NotFound(id))
    }

    async fn increment(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError> {
        self.apply(id, StockAction::Increment, actor).await
    }

    async fn decrement(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError> {
        self.apply(id, StockAction::Decrement, actor).await
    }

    async fn request(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError> {
        self.apply(id, StockAction::Request, actor).await
    }

    async fn receive(&self, id: StockId, actor: &str) -> Result<ActionResult, StockError> {
        self.apply(id, StockAction::Receive, actor).await
    }

    async fn set_note(
        &self,
        id: StockId,
        actor: &str,
        note: &str,
    ) -> Result<ActionResult, StockError> {
        self.apply(id, StockAction::note(note), actor).await
    }

    async fn set_ink_level(
        &self,
        id: StockId,
        actor: &str,
        raw: Option<&str>,
    ) -> Result<ActionResult, StockError> {
        self.apply(id, StockAction::ink_level(raw), actor).await
    }

    async fn history(&self, limit: u64) -> Result<Vec<HistoryEntry>, StockError> {
        Ok(self.store.recent_history(limit).await?)
    }

    async fn clear_history(&self) -> Result<u64, StockError> {
        let removed = self.store.clear_history().await?;
        info!(removed, "History log cleared");
        Ok(removed)
    }

    async fn dashboard(&self) -> Result<DashboardSummary, StockError> {
        let records = self.store.list_stock_records().await?;
        Ok(DashboardSummary::from_records(&records))
    }
}
