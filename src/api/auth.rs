use axum::{
    Extension, Form,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::{self, Flash};
use super::{ApiError, AppState, INVENTORY_PATH, LOGIN_PATH, observability};
use crate::db::Account;
use crate::services::AuthError;
use crate::views;

/// Session key holding the id of the logged-in account.
pub const SESSION_ACCOUNT_KEY: &str = "account_id";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the session to an [`Account`] and stores it in the request
/// extensions. Anonymous requests are sent to the login page.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let account_id = match session.get::<i32>(SESSION_ACCOUNT_KEY).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Failed to read session: {e}");
            None
        }
    };

    let account = match account_id {
        Some(id) => match state.auth().account(id).await {
            Ok(account) => account,
            Err(e) => {
                tracing::error!("Failed to load session account {id}: {e}");
                return (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable").into_response();
            }
        },
        None => None,
    };

    let Some(account) = account else {
        if account_id.is_some() {
            // The account was deleted while the session was alive.
            let _ = session.remove::<i32>(SESSION_ACCOUNT_KEY).await;
        }
        // No cookie means no stored session; writing a flash would create one.
        if session.id().is_some() {
            flash::push(&session, Flash::warning("Please log in to continue.")).await;
        }
        return Redirect::to(LOGIN_PATH).into_response();
    };

    observability::record_account(&account.username);
    request.extensions_mut().insert(account);
    next.run(request).await
}

/// Must be layered inside [`require_login`].
pub async fn require_admin(
    Extension(account): Extension<Account>,
    request: Request,
    next: Next,
) -> Response {
    if account.is_admin {
        return next.run(request).await;
    }

    tracing::warn!(
        username = %account.username,
        path = %request.uri().path(),
        "Non-admin account blocked from admin route"
    );
    ApiError::forbidden("Access restricted to administrators.").into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(session: Session) -> Response {
    if let Ok(Some(_)) = session.get::<i32>(SESSION_ACCOUNT_KEY).await {
        return Redirect::to(INVENTORY_PATH).into_response();
    }

    let flashes = flash::take(&session).await;
    Html(views::login::render(&flashes)).into_response()
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiError> {
    let username = form.username.trim();

    let account = match state.auth().login(username, &form.password).await {
        Ok(account) => account,
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %username, "Failed login attempt");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => return Err(e.into()),
    };

    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to rotate session: {e}")))?;
    session
        .insert(SESSION_ACCOUNT_KEY, account.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!(username = %account.username, "Logged in");
    Ok(Redirect::to(INVENTORY_PATH))
}

/// GET /logout
pub async fn logout(session: Session, Extension(account): Extension<Account>) -> Redirect {
    if let Err(e) = session.flush().await {
        tracing::warn!("Failed to clear session: {e}");
    }

    tracing::info!(username = %account.username, "Logged out");
    Redirect::to(LOGIN_PATH)
}
