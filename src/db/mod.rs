use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::{StockAction, StockId};

pub mod migrator;
pub mod repositories;

pub use crate::entities::history_entries::Model as HistoryEntry;
pub use crate::entities::stock_records::Model as StockRecord;
pub use repositories::account::{Account, CreateOutcome, NewAccount};
pub use repositories::stock::ApplyOutcome;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,

    /// Serializes ledger writes. SQLite answers two read-then-write
    /// transactions racing for the write lock with `SQLITE_BUSY` instead of
    /// waiting, so concurrent actions queue here.
    write_gate: Arc<Mutex<()>>,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to an in-memory database is its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn stock_repo(&self) -> repositories::stock::StockRepository {
        repositories::stock::StockRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    // ========== Stock Ledger ==========

    pub async fn get_stock_record(&self, id: StockId) -> Result<Option<StockRecord>> {
        self.stock_repo().get(id).await
    }

    pub async fn list_stock_records(&self) -> Result<Vec<StockRecord>> {
        self.stock_repo().list_by_sector().await
    }

    pub async fn apply_stock_action(
        &self,
        id: StockId,
        action: &StockAction,
        actor: &str,
    ) -> Result<ApplyOutcome> {
        let _guard = self.write_gate.lock().await;
        self.stock_repo().apply(id, action, actor).await
    }

    // ========== History Log ==========

    pub async fn recent_history(&self, limit: u64) -> Result<Vec<HistoryEntry>> {
        self.history_repo().recent(limit).await
    }

    pub async fn history_count(&self) -> Result<u64> {
        self.history_repo().count().await
    }

    pub async fn clear_history(&self) -> Result<u64> {
        let _guard = self.write_gate.lock().await;
        self.history_repo().clear().await
    }

    // ========== Accounts ==========

    pub async fn get_account(&self, id: i32) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_username(username).await
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.account_repo().list().await
    }

    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>> {
        self.account_repo()
            .verify_credentials(username, password)
            .await
    }

    pub async fn create_account(
        &self,
        account: NewAccount,
        security: &SecurityConfig,
    ) -> Result<CreateOutcome> {
        self.account_repo().create(account, security).await
    }

    pub async fn delete_account(&self, id: i32) -> Result<bool> {
        self.account_repo().delete(id).await
    }
}
