use crate::entities::{history_entries, prelude::*};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Most recent entries first, by insertion order
    pub async fn recent(&self, limit: u64) -> Result<Vec<history_entries::Model>> {
        let items = HistoryEntries::find()
            .order_by_desc(history_entries::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;
        Ok(items)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(HistoryEntries::find().count(&self.conn).await?)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = HistoryEntries::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
