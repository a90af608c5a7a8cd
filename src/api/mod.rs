use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod dashboard;
mod error;
pub mod flash;
mod history;
mod inventory;
mod observability;
mod users;

pub use error::{ApiError, PageError, Redirected};

use crate::services::{AuthService, StockService};
use metrics_exporter_prometheus::PrometheusHandle;

pub const INVENTORY_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const HISTORY_PATH: &str = "/historico";
pub const USERS_PATH: &str = "/usuarios";

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        self.shared.config()
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn stock(&self) -> &Arc<dyn StockService> {
        &self.shared.stock_service
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Parses an `{id}` path segment. Anything that is not an `i32`, including
/// overflowing numbers, is reported as a missing `resource`.
pub(crate) fn path_id(resource: &str, raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(resource, raw))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let protected_routes = create_protected_router(state.clone());

    Router::new()
        .merge(protected_routes)
        .route(LOGIN_PATH, get(auth::login_page).post(auth::login))
        .route("/health", get(observability::health))
        .layer(middleware::from_fn(flash::deliver))
        .layer(session_layer)
        .with_state(state)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin_routes = Router::new()
        .route("/historico/limpar", get(history::clear))
        .route(USERS_PATH, get(users::list))
        .route("/usuarios/criar", post(users::create))
        .route("/usuarios/excluir/{id}", get(users::delete))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::require_admin));

    Router::new()
        .route(INVENTORY_PATH, get(inventory::index))
        .route("/mais/{id}", get(inventory::increment))
        .route("/menos/{id}", get(inventory::decrement))
        .route("/solicitar/{id}", get(inventory::request))
        .route("/recebido/{id}", get(inventory::receive))
        .route("/observacao/{id}", post(inventory::set_note))
        .route("/tinta/{id}", post(inventory::set_ink_level))
        .route(HISTORY_PATH, get(history::list))
        .route("/dashboard", get(dashboard::show))
        .route("/logout", get(auth::logout))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state, auth::require_login))
}
