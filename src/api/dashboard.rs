use axum::{Extension, extract::State, response::Html};
use std::sync::Arc;
use tower_sessions::Session;

use super::AppState;
use super::error::PageError;
use super::flash;
use crate::db::Account;
use crate::views::{self, Chrome, NavItem};

/// GET /dashboard
pub async fn show(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let summary = state.stock().dashboard().await?;
    let flashes = flash::take(&session).await;

    let chrome = Chrome {
        title: "Dashboard",
        active: NavItem::Dashboard,
        account: &account,
        flashes: &flashes,
    };

    Ok(Html(views::dashboard::render(&chrome, &summary)))
}
