use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::error::{PageError, Redirected};
use super::flash::{self, Flash};
use super::{ApiError, AppState, USERS_PATH, path_id};
use crate::db::{Account, CreateOutcome, NewAccount};
use crate::views::{self, Chrome, NavItem};

#[derive(Debug, Deserialize)]
pub struct CreateAccountForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub password: String,
    pub is_admin: Option<String>,
}

impl From<CreateAccountForm> for NewAccount {
    fn from(form: CreateAccountForm) -> Self {
        Self {
            username: form.username,
            display_name: form.nome,
            password: form.password,
            is_admin: form.is_admin.as_deref() == Some("1"),
        }
    }
}

/// GET /usuarios
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let accounts = state.auth().list_accounts().await?;
    let flashes = flash::take(&session).await;

    let chrome = Chrome {
        title: "Users",
        active: NavItem::Users,
        account: &account,
        flashes: &flashes,
    };

    let min_password_length = state.config().inventory.min_password_length;
    Ok(Html(views::users::render(
        &chrome,
        &accounts,
        min_password_length,
    )))
}

/// POST /usuarios/criar
///
/// A taken username is skipped without telling the user.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    session: Session,
    Form(form): Form<CreateAccountForm>,
) -> Result<Redirect, Redirected> {
    let outcome = state
        .auth()
        .create_account(form.into())
        .await
        .map_err(|e| ApiError::from(e).redirect_to(USERS_PATH))?;

    if let CreateOutcome::Created(created) = outcome {
        tracing::info!(
            by = %account.username,
            username = %created.username,
            "Account created from admin page"
        );
        flash::push(
            &session,
            Flash::success(format!("User {} created.", created.username)),
        )
        .await;
    }

    Ok(Redirect::to(USERS_PATH))
}

/// GET /usuarios/excluir/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(account): Extension<Account>,
    Path(id): Path<String>,
) -> Result<Redirect, Redirected> {
    let id = path_id("Account", &id).map_err(|e| e.redirect_to(USERS_PATH))?;

    state
        .auth()
        .delete_account(&account, id)
        .await
        .map_err(|e| ApiError::from(e).redirect_to(USERS_PATH))?;

    Ok(Redirect::to(USERS_PATH))
}
