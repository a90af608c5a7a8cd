use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::{StockAction, StockId};
use crate::entities::{history_entries, stock_records};

/// What happened when an action was applied to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    NotFound,
    /// The guard rejected the change (decrement at zero); nothing was logged.
    Unchanged,
    Applied(history_entries::Model),
}

pub struct StockRepository {
    conn: DatabaseConnection,
}

impl StockRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: StockId) -> Result<Option<stock_records::Model>> {
        stock_records::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query stock record")
    }

    /// All records ordered by sector
    pub async fn list_by_sector(&self) -> Result<Vec<stock_records::Model>> {
        stock_records::Entity::find()
            .order_by_asc(stock_records::Column::Sector)
            .order_by_asc(stock_records::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list stock records")
    }

    /// Reads the record, runs one conditional `UPDATE` and appends the
    /// history row, all in a single transaction. The history row is only
    /// written when the update touched the record.
    pub async fn apply(
        &self,
        id: StockId,
        action: &StockAction,
        actor: &str,
    ) -> Result<ApplyOutcome> {
        let txn = self.conn.begin().await?;

        let Some(record) = stock_records::Entity::find_by_id(id.value())
            .one(&txn)
            .await
            .context("Failed to load stock record")?
        else {
            return Ok(ApplyOutcome::NotFound);
        };

        let update = stock_records::Entity::update_many()
            .filter(stock_records::Column::Id.eq(id.value()));

        let update = match action {
            StockAction::Increment | StockAction::Receive => update
                .col_expr(
                    stock_records::Column::Quantity,
                    Expr::col(stock_records::Column::Quantity).add(1),
                )
                .col_expr(stock_records::Column::Awaiting, Expr::value(false)),
            StockAction::Decrement => update
                .col_expr(
                    stock_records::Column::Quantity,
                    Expr::col(stock_records::Column::Quantity).sub(1),
                )
                .filter(stock_records::Column::Quantity.gt(0)),
            StockAction::Request => {
                update.col_expr(stock_records::Column::Awaiting, Expr::value(true))
            }
            StockAction::SetNote(note) => {
                update.col_expr(stock_records::Column::Note, Expr::value(note.clone()))
            }
            StockAction::SetInkLevel(percent) => {
                update.col_expr(stock_records::Column::InkPercent, Expr::value(*percent))
            }
        };

        let result = update
            .exec(&txn)
            .await
            .context("Failed to update stock record")?;

        if result.rows_affected == 0 {
            return Ok(ApplyOutcome::Unchanged);
        }

        let entry = history_entries::ActiveModel {
            stock_record_id: Set(record.id),
            actor: Set(actor.to_string()),
            action: Set(action.label().to_string()),
            detail: Set(action.detail(&record.sector)),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to append history entry")?;

        txn.commit().await?;

        Ok(ApplyOutcome::Applied(entry))
    }
}
