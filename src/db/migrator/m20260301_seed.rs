use crate::entities::{accounts, stock_records};
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (code, sector, model, quantity, awaiting, ink percent)
const STOCK_SEED: &[(&str, &str, &str, i32, bool, i32)] = &[
    ("2IO9", "Almoxarifado", "-", 1, false, 72),
    ("2IA6", "Aquiraz", "-", 1, false, 45),
    ("2IO8", "Aracati", "-", 1, false, 15),
    ("IYA8", "Doc. Ambiental", "-", 0, true, 8),
    ("2GS1", "MTR", "-", 0, true, 5),
    ("2IP4", "Operacional", "-", 1, false, 88),
    ("2IP7", "Solda", "-", 1, false, 60),
    ("2IP3", "Comercial", "-", 1, false, 33),
    ("2IP8", "Compras", "-", 1, false, 91),
    ("2IP9", "Diretoria", "-", 1, false, 19),
    ("2IP5", "Licitação", "-", 1, false, 54),
    ("2IQ1", "Manutenção", "-", 1, false, 12),
    ("2IP2", "QSMS", "-", 1, false, 77),
    ("2MS6", "Setor Pessoal", "-", 1, false, 40),
    ("-", "Braslimp", "LaserJet", 1, false, 25),
    ("2IO7", "-", "Color CMYK", 0, false, 3),
    ("9I55", "GP (New Printer)", "CMYK", 0, false, 68),
    ("MQW5", "Pecém", "-", 3, false, 82),
];

/// (username, password, display name, admin)
const ACCOUNT_SEED: &[(&str, &str, &str, bool)] = &[
    ("admin", "admin123", "Administrator", true),
    ("ti", "ti2024", "IT Team", false),
];

fn hash_seed_password(password: &str) -> Result<String, DbErr> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DbErr::Custom(format!("Failed to hash seed password: {e}")))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut stock = Query::insert()
            .into_table(StockRecords)
            .columns([
                stock_records::Column::Code,
                stock_records::Column::Sector,
                stock_records::Column::Model,
                stock_records::Column::Quantity,
                stock_records::Column::Awaiting,
                stock_records::Column::Note,
                stock_records::Column::InkPercent,
            ])
            .to_owned();

        for &(code, sector, model, quantity, awaiting, ink) in STOCK_SEED {
            stock.values_panic([
                code.into(),
                sector.into(),
                model.into(),
                quantity.into(),
                awaiting.into(),
                "".into(),
                ink.into(),
            ]);
        }

        manager.exec_stmt(stock).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let mut accounts = Query::insert()
            .into_table(Accounts)
            .columns([
                accounts::Column::Username,
                accounts::Column::PasswordHash,
                accounts::Column::DisplayName,
                accounts::Column::IsAdmin,
                accounts::Column::CreatedAt,
            ])
            .to_owned();

        for &(username, password, display_name, is_admin) in ACCOUNT_SEED {
            accounts.values_panic([
                username.into(),
                hash_seed_password(password)?.into(),
                display_name.into(),
                is_admin.into(),
                now.clone().into(),
            ]);
        }

        manager.exec_stmt(accounts).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(HistoryEntries).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(StockRecords).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Accounts).to_owned())
            .await
    }
}
