use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;

use super::flash::Flash;
use super::{INVENTORY_PATH, LOGIN_PATH};
use crate::services::{AuthError, StockError};

/// Failure of a form post or action link.
///
/// Renders as a `303` redirect; the message travels to the next page as a
/// flash. Nothing here is fatal to the process.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    Forbidden(String),

    InvalidCredentials,

    ValidationError(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found.", resource, id))
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }

    /// Sends the browser to `target` instead of the default page.
    #[must_use]
    pub fn redirect_to(self, target: &'static str) -> Redirected {
        Redirected {
            error: self,
            target,
        }
    }

    const fn default_target(&self) -> &'static str {
        match self {
            ApiError::InvalidCredentials => LOGIN_PATH,
            _ => INVENTORY_PATH,
        }
    }

    /// The user-facing message. Storage and internal details are logged here
    /// and replaced by a generic text.
    fn to_flash(&self) -> Flash {
        match self {
            ApiError::NotFound(msg) | ApiError::ValidationError(msg) => Flash::error(msg.clone()),
            ApiError::Forbidden(msg) => Flash::warning(msg.clone()),
            ApiError::InvalidCredentials => Flash::error("Invalid username or password."),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                Flash::error("A database error occurred. Please try again.")
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                Flash::error("An internal error occurred. Please try again.")
            }
        }
    }
}

/// An [`ApiError`] bound to the page it sends the user back to.
#[derive(Debug)]
pub struct Redirected {
    error: ApiError,
    target: &'static str,
}

impl From<ApiError> for Redirected {
    fn from(error: ApiError) -> Self {
        let target = error.default_target();
        error.redirect_to(target)
    }
}

impl IntoResponse for Redirected {
    fn into_response(self) -> Response {
        let flash = self.error.to_flash();
        let mut response = Redirect::to(self.target).into_response();
        response.extensions_mut().insert(flash);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Redirected::from(self).into_response()
    }
}

impl From<StockError> for ApiError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::NotFound(id) => ApiError::not_found("Stock record", id),
            StockError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::NotFound(id) => ApiError::not_found("Account", id),
            AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
            AuthError::Validation(msg) => ApiError::ValidationError(msg),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
            AuthError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(format!("{err:#}"))
    }
}

/// Failure while rendering a read view.
///
/// Read views cannot redirect to themselves on error, so this renders a
/// plain status page instead.
#[derive(Debug)]
pub struct PageError(ApiError);

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<StockError> for PageError {
    fn from(err: StockError) -> Self {
        Self(err.into())
    }
}

impl From<AuthError> for PageError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password.".to_string())
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred.".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
            }
        };

        (status, Html(crate::views::error_page(status, &message))).into_response()
    }
}
