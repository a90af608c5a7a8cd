use std::fmt::Write;

use super::{Chrome, text};
use crate::domain::{AttentionKind, DashboardSummary};

#[must_use]
pub fn render(chrome: &Chrome<'_>, summary: &DashboardSummary) -> String {
    let mut body = String::new();
    let health = summary.health();

    let _ = writeln!(
        body,
        r#"<div class="stats-row">
  <div class="stat"><div class="stat-label">Total units</div><div class="stat-number c-primary">{total}</div><div class="stat-hint">{records} records</div></div>
  <div class="stat"><div class="stat-label">Sectors OK</div><div class="stat-number c-ok">{ok}</div><div class="stat-hint">{percent_ok}% of records</div></div>
  <div class="stat"><div class="stat-label">Awaiting</div><div class="stat-number c-warn">{awaiting}</div><div class="stat-hint">orders in transit</div></div>
  <div class="stat"><div class="stat-label">Zeroed</div><div class="stat-number c-danger">{zeroed}</div><div class="stat-hint">{percent_problem}% with a problem</div></div>
</div>
<div class="card gauge">
  <div class="card-title">Overall health</div>
  <div class="gauge-track"><div class="gauge-fill" style="width:{percent_ok}%;background:var(--{tone})"></div></div>
  <div class="gauge-label c-{tone}">{percent_ok}% &middot; {label}</div>
</div>"#,
        total = summary.total_units,
        records = summary.record_count,
        ok = summary.ok_count,
        percent_ok = summary.percent_ok,
        awaiting = summary.awaiting_count,
        zeroed = summary.zeroed_count,
        percent_problem = summary.percent_problem,
        tone = health.tone(),
        label = health.label(),
    );

    body.push_str("<div class=\"grid-2\">\n<div class=\"card\">\n  <div class=\"card-title\">Needs attention</div>\n");
    if summary.attention.is_empty() {
        body.push_str("  <p class=\"empty\">No problems found</p>\n");
    } else {
        body.push_str("  <ul class=\"attention\">\n");
        for item in &summary.attention {
            let (tone, reason) = describe(item.kind);
            let _ = writeln!(
                body,
                r#"    <li class="c-{tone}"><strong>{sector}</strong> <span>{reason}</span></li>"#,
                sector = text(&item.sector),
            );
        }
        body.push_str("  </ul>\n");
    }
    body.push_str("</div>\n");

    body.push_str("<div class=\"card\">\n  <div class=\"card-title\">Ink levels</div>\n");
    if summary.ink_levels.is_empty() {
        body.push_str("  <p class=\"empty\">No ink readings recorded.</p>\n");
    } else {
        for reading in &summary.ink_levels {
            let _ = writeln!(
                body,
                r#"  <div class="ink-line"><span>{sector}</span><div class="ink-track"><div class="ink-fill" style="width:{percent}%;background:var(--{tone})"></div></div><span class="c-{tone}">{percent}%</span></div>"#,
                sector = text(&reading.sector),
                percent = reading.percent,
                tone = reading.band.tone(),
            );
        }
    }
    body.push_str("</div>\n</div>\n");

    chrome.wrap(&body)
}

fn describe(kind: AttentionKind) -> (&'static str, String) {
    match kind {
        AttentionKind::OutOfStock => ("danger", "Out of stock".to_string()),
        AttentionKind::CriticalInk(p) => ("danger", format!("Critical ink: {p}%")),
        AttentionKind::SingleUnit => ("warn", "Only 1 unit left".to_string()),
        AttentionKind::LowInk(p) => ("warn", format!("Low ink: {p}%")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Account, StockRecord};
    use crate::views::NavItem;

    fn render_for(records: &[StockRecord]) -> String {
        let account = Account {
            id: 1,
            username: "u".to_string(),
            display_name: "U".to_string(),
            is_admin: false,
            created_at: String::new(),
        };
        let chrome = Chrome {
            title: "Dashboard",
            active: NavItem::Dashboard,
            account: &account,
            flashes: &[],
        };
        render(&chrome, &DashboardSummary::from_records(records))
    }

    #[test]
    fn healthy_ledger_shows_no_problems() {
        let records = vec![StockRecord {
            id: 1,
            code: "A".to_string(),
            sector: "QSMS".to_string(),
            model: "M".to_string(),
            quantity: 3,
            awaiting: false,
            note: String::new(),
            ink_percent: Some(90),
        }];
        let html = render_for(&records);
        assert!(html.contains("No problems found"));
        assert!(html.contains("All good"));
        assert!(html.contains("90%"));
    }

    #[test]
    fn problems_are_listed() {
        let records = vec![StockRecord {
            id: 1,
            code: "A".to_string(),
            sector: "Solda".to_string(),
            model: "M".to_string(),
            quantity: 0,
            awaiting: false,
            note: String::new(),
            ink_percent: Some(10),
        }];
        let html = render_for(&records);
        assert!(html.contains("Out of stock"));
        assert!(html.contains("Critical ink: 10%"));
        assert!(html.contains("Critical"));
        assert!(!html.contains("No problems found"));
    }
}
