use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stock_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Printer or cartridge code, "-" when unknown
    pub code: String,

    pub sector: String,

    pub model: String,

    /// Cartridges on hand, never negative
    pub quantity: i32,

    /// A replacement was requested from the supplier and has not arrived
    pub awaiting: bool,

    pub note: String,

    /// Estimated remaining ink, 0..=100
    pub ink_percent: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
