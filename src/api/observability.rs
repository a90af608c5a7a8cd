use crate::api::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::{
        HeaderName, HeaderValue, StatusCode,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, field, info, info_span};
use uuid::Uuid;

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    state.prometheus_handle.as_ref().map_or_else(
        || (StatusCode::NOT_FOUND, "Metrics not enabled").into_response(),
        |handle| handle.render().into_response(),
    )
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.store().ping().await {
        Ok(()) => "ok".into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response()
        }
    }
}

/// Metrics label shared by every request that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (REFERRER_POLICY, "same-origin"),
    (
        CONTENT_SECURITY_POLICY,
        "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; \
         form-action 'self' https:; frame-ancestors 'none'; base-uri 'none'",
    ),
];

/// Records which ledger mutation the current request performed. Shows up on
/// the "Request finished" event of [`logging_middleware`].
pub fn record_stock_action(action: &'static str, applied: bool) {
    let span = Span::current();
    span.record("stock_action", action);
    span.record("stock_applied", applied);
}

/// Records the logged-in account on the request span.
pub fn record_account(username: &str) {
    Span::current().record("account", username);
}

/// How a response reads in the request log.
fn classify(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "rejected"
    } else if status.is_redirection() {
        "redirect"
    } else {
        "page"
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();

    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
        .to_string();

    let span = info_span!(
        "request",
        id = %Uuid::new_v4().simple(),
        %method,
        path = %req.uri().path(),
        account = field::Empty,
        stock_action = field::Empty,
        stock_applied = field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let elapsed = started.elapsed();
        let status = response.status();

        let labels = [
            ("method", method.to_string()),
            ("route", route),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        info!(
            status = status.as_u16(),
            outcome = classify(status),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_treats_redirects_as_their_own_outcome() {
        assert_eq!(classify(StatusCode::OK), "page");
        assert_eq!(classify(StatusCode::SEE_OTHER), "redirect");
        assert_eq!(classify(StatusCode::NOT_FOUND), "rejected");
        assert_eq!(classify(StatusCode::SERVICE_UNAVAILABLE), "error");
    }

    #[test]
    fn every_security_header_value_is_valid() {
        for (name, value) in SECURITY_HEADERS {
            assert!(HeaderValue::from_str(value).is_ok(), "{name}");
        }
    }
}
