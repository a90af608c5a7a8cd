use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::error::PageError;
use super::flash;
use super::{ApiError, AppState, INVENTORY_PATH, observability, path_id};
use crate::db::Account;
use crate::domain::{DashboardSummary, StockId};
use crate::services::ActionResult;
use crate::views::{self, Chrome, NavItem};

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub observacao: String,
}

#[derive(Debug, Deserialize)]
pub struct InkForm {
    pub tinta_pct: Option<String>,
}

fn record_id(raw: &str) -> Result<StockId, ApiError> {
    path_id("Stock record", raw).map(StockId::new)
}

fn log_result(action: &'static str, result: &ActionResult) {
    observability::record_stock_action(action, result.is_applied());
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let records = state.stock().list().await?;
    let summary = DashboardSummary::from_records(&records);
    let flashes = flash::take(&session).await;

    let chrome = Chrome {
        title: "Toner Inventory",
        active: NavItem::Inventory,
        account: &account,
        flashes: &flashes,
    };

    Ok(Html(views::inventory::render(&chrome, &records, &summary)))
}

/// GET /mais/{id}
pub async fn increment(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let result = state
        .stock()
        .increment(record_id(&id)?, &account.display_name)
        .await?;
    log_result("increment", &result);
    Ok(Redirect::to(INVENTORY_PATH))
}

/// GET /menos/{id}
///
/// At zero the record is left alone and the user lands back on the list
/// without a message.
pub async fn decrement(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let result = state
        .stock()
        .decrement(record_id(&id)?, &account.display_name)
        .await?;
    log_result("decrement", &result);
    Ok(Redirect::to(INVENTORY_PATH))
}

/// GET /solicitar/{id}
///
/// Flags the record, then sends the browser to the supplier's site.
pub async fn request(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let result = state
        .stock()
        .request(record_id(&id)?, &account.display_name)
        .await?;
    log_result("request", &result);
    Ok(Redirect::to(&state.config().inventory.supplier_url))
}

/// GET /recebido/{id}
pub async fn receive(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let result = state
        .stock()
        .receive(record_id(&id)?, &account.display_name)
        .await?;
    log_result("receive", &result);
    Ok(Redirect::to(INVENTORY_PATH))
}

/// POST /observacao/{id}
pub async fn set_note(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, ApiError> {
    let result = state
        .stock()
        .set_note(record_id(&id)?, &account.display_name, &form.observacao)
        .await?;
    log_result("set_note", &result);
    Ok(Redirect::to(INVENTORY_PATH))
}

/// POST /tinta/{id}
pub async fn set_ink_level(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
    Form(form): Form<InkForm>,
) -> Result<Redirect, ApiError> {
    let result = state
        .stock()
        .set_ink_level(
            record_id(&id)?,
            &account.display_name,
            form.tinta_pct.as_deref(),
        )
        .await?;
    log_result("set_ink_level", &result);
    Ok(Redirect::to(INVENTORY_PATH))
}
