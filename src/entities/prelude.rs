pub use super::accounts::Entity as Accounts;
pub use super::history_entries::Entity as HistoryEntries;
pub use super::stock_records::Entity as StockRecords;
