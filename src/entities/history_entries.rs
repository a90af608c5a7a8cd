use sea_orm::entity::prelude::*;

/// Append-only audit row.
///
/// `stock_record_id` is a plain id with no foreign key: entries outlive the
/// record they describe, and `detail` keeps a snapshot of the sector name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "history_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub stock_record_id: i32,

    pub actor: String,

    pub action: String,

    pub detail: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
