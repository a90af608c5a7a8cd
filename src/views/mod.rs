//! Server-rendered HTML pages.
//!
//! Each page module exposes a `render` function taking plain data and
//! returning the complete document. All interpolated text goes through
//! [`text`] or [`attr`].

pub mod dashboard;
pub mod history;
pub mod inventory;
mod layout;
pub mod login;
pub mod users;

pub use layout::{Chrome, NavItem};

use axum::http::StatusCode;
use chrono::{DateTime, Local};
use std::borrow::Cow;

const STYLESHEET: &str = include_str!("style.css");

/// Escapes text placed between tags.
pub(crate) fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escapes text placed inside a double-quoted attribute.
pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Formats a stored RFC 3339 timestamp as `dd/mm/YYYY HH:MM` local time.
/// Values that fail to parse are shown as stored.
#[must_use]
pub fn format_timestamp(stored: &str) -> String {
    DateTime::parse_from_rfc3339(stored).map_or_else(
        |_| stored.to_string(),
        |ts| ts.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string(),
    )
}

/// Bare page for failures of the read views.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<main class="narrow">
  <div class="card">
    <h1>{code} {title}</h1>
    <p>{message}</p>
    <p><a class="btn" href="/">Back to inventory</a></p>
  </div>
</main>"#,
        code = status.as_u16(),
        title = text(title),
        message = text(message),
    );
    layout::document(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(text("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert_eq!(attr(r#"a"b"#), "a&quot;b");
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn timestamp_uses_day_first_format() {
        let formatted = format_timestamp("2026-03-01T12:30:00+00:00");
        assert_eq!(formatted.len(), "01/03/2026 12:30".len());
        assert!(formatted.contains("/2026 "));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = error_page(StatusCode::NOT_FOUND, "<script>");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
