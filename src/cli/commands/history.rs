use crate::config::Config;
use crate::db::Store;
use crate::views::format_timestamp;

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let entries = store.recent_history(limit).await?;

    if entries.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }

    let total = store.history_count().await?;
    println!("Recent movements ({} of {}):", entries.len(), total);
    println!("{:-<70}", "");

    for entry in entries {
        println!("• [{}] {}", entry.action, entry.detail);
        println!(
            "  {} | {}",
            entry.actor,
            format_timestamp(&entry.created_at)
        );
    }

    Ok(())
}
