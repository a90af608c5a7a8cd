use axum::{
    Extension,
    extract::State,
    response::{Html, Redirect},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::error::PageError;
use super::flash::{self, Flash};
use super::{ApiError, AppState, HISTORY_PATH};
use crate::db::Account;
use crate::views::{self, Chrome, NavItem};

/// GET /historico
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let limit = state.config().inventory.history_limit;
    let entries = state.stock().history(limit).await?;
    let flashes = flash::take(&session).await;

    let chrome = Chrome {
        title: "Movement History",
        active: NavItem::History,
        account: &account,
        flashes: &flashes,
    };

    Ok(Html(views::history::render(&chrome, &entries)))
}

/// GET /historico/limpar
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    session: Session,
) -> Result<Redirect, ApiError> {
    let removed = state.stock().clear_history().await?;

    tracing::info!(
        username = %account.username,
        removed = removed,
        "History log cleared"
    );
    flash::push(&session, Flash::success("History cleared.")).await;
    Ok(Redirect::to(HISTORY_PATH))
}
