use std::fmt::Write;

use super::{Chrome, format_timestamp, text};
use crate::db::HistoryEntry;

fn action_class(action: &str) -> &'static str {
    match action {
        "Addition" => "hist-add",
        "Removal" => "hist-remove",
        "Request" => "hist-request",
        "Receipt" => "hist-receive",
        _ => "hist-edit",
    }
}

#[must_use]
pub fn render(chrome: &Chrome<'_>, entries: &[HistoryEntry]) -> String {
    let mut body = String::new();

    let clear = if chrome.account.is_admin {
        r#"<a href="/historico/limpar" class="btn btn-danger" onclick="return confirm('Clear the entire history?')">Clear history</a>"#
    } else {
        ""
    };

    let _ = writeln!(
        body,
        r#"<div class="card">
  <div class="card-header"><div class="card-title">Latest movements</div>{clear}</div>"#
    );

    if entries.is_empty() {
        body.push_str("  <p class=\"empty\">No entries yet.</p>\n");
    } else {
        body.push_str("  <ul class=\"history\">\n");
        for entry in entries {
            let _ = writeln!(
                body,
                r#"    <li class="{class}"><span class="hist-action">{action}</span> <span class="hist-detail">{detail}</span><span class="hist-meta">{actor} &middot; {when}</span></li>"#,
                class = action_class(&entry.action),
                action = text(&entry.action),
                detail = text(&entry.detail),
                actor = text(&entry.actor),
                when = format_timestamp(&entry.created_at),
            );
        }
        body.push_str("  </ul>\n");
    }

    body.push_str("</div>\n");
    chrome.wrap(&body)
}
