use crate::config::Config;
use crate::db::Store;
use crate::domain::{SYSTEM_ACTOR, StockId, StockStatus};
use crate::services::{ActionResult, SeaOrmStockService, StockError, StockService};

pub async fn cmd_stock_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let records = store.list_stock_records().await?;

    if records.is_empty() {
        println!("The ledger is empty.");
        return Ok(());
    }

    println!("Toner ledger ({} records)", records.len());
    println!("{:-<70}", "");

    for record in records {
        let status = StockStatus::derive(record.quantity, record.awaiting);
        let ink = record
            .ink_percent
            .map_or_else(|| "-".to_string(), |p| format!("{p}%"));

        println!(
            "{:>3}  {:<24} qty {:>2}  ink {:>4}  {}",
            record.id, record.sector, record.quantity, ink, status
        );
        if !record.note.is_empty() {
            println!("     note: {}", record.note);
        }
    }

    Ok(())
}

pub async fn cmd_stock_receive(config: &Config, id: i32) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let service = SeaOrmStockService::new(store);

    let id = StockId::new(id);
    match service.receive(id, SYSTEM_ACTOR).await {
        Ok(ActionResult::Applied(entry)) => {
            let record = service.get(id).await?;
            println!("✓ {} ({} on hand)", entry.detail, record.quantity);
        }
        Ok(ActionResult::Skipped) => println!("Nothing changed."),
        Err(StockError::NotFound(id)) => println!("Stock record {id} not found."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
