use std::fmt::Write;

use super::{Chrome, attr, text};
use crate::db::StockRecord;
use crate::domain::{DashboardSummary, InkBand, StockStatus};

#[must_use]
pub fn render(chrome: &Chrome<'_>, records: &[StockRecord], summary: &DashboardSummary) -> String {
    let mut body = String::new();

    if summary.zeroed_count > 0 {
        let _ = writeln!(
            body,
            r#"<div class="alert alert-danger"><strong>Attention:</strong> {} toner(s) out of stock with no open request.</div>"#,
            summary.zeroed_count
        );
    }

    let out_of_stock = records.iter().filter(|r| r.quantity == 0).count();
    let _ = writeln!(
        body,
        r#"<div class="stats-row">
  <div class="stat"><div class="stat-label">Total in stock</div><div class="stat-number c-primary">{}</div><div class="stat-hint">units</div></div>
  <div class="stat"><div class="stat-label">Sectors OK</div><div class="stat-number c-ok">{}</div><div class="stat-hint">normal stock</div></div>
  <div class="stat"><div class="stat-label">Awaiting</div><div class="stat-number c-warn">{}</div><div class="stat-hint">orders in transit</div></div>
  <div class="stat"><div class="stat-label">Zeroed</div><div class="stat-number c-danger">{}</div><div class="stat-hint">action needed</div></div>
</div>"#,
        summary.total_units, summary.ok_count, summary.awaiting_count, out_of_stock
    );

    let _ = writeln!(
        body,
        r#"<div class="card">
  <div class="card-header"><div class="card-title">Toner inventory</div><div class="card-sub">{} items registered</div></div>
  <div class="table-wrap">
  <table>
    <thead><tr><th>Code</th><th>Sector</th><th>Model</th><th>Qty</th><th>Status</th><th>Ink level</th><th>Note</th><th>Actions</th></tr></thead>
    <tbody>"#,
        records.len()
    );

    for record in records {
        render_row(&mut body, record);
    }

    body.push_str("    </tbody>\n  </table>\n  </div>\n</div>\n");

    chrome.wrap(&body)
}

fn render_row(out: &mut String, record: &StockRecord) {
    let qty_class = match record.quantity {
        0 => "qty-0",
        1 => "qty-1",
        _ => "qty-ok",
    };

    let status = StockStatus::derive(record.quantity, record.awaiting);
    let badge = match status {
        StockStatus::Ok => "badge-ok",
        StockStatus::AwaitingSupplier => "badge-warn",
        StockStatus::Problem => "badge-danger",
    };

    let note = if record.note.is_empty() {
        r#"<span class="muted">-</span>"#.to_string()
    } else {
        format!(
            r#"<span class="note" title="{}">{}</span>"#,
            attr(&record.note),
            text(&record.note)
        )
    };

    let ink_value = record.ink_percent.map(|p| p.to_string()).unwrap_or_default();
    let id = record.id;

    let _ = writeln!(
        out,
        r#"    <tr>
      <td><span class="code">{code}</span></td>
      <td><strong>{sector}</strong></td>
      <td class="muted">{model}</td>
      <td><span class="qty {qty_class}">{quantity}</span></td>
      <td><span class="badge {badge}">{status}</span></td>
      <td>{ink}</td>
      <td>{note}</td>
      <td>
        <div class="action-row">
          <a href="/mais/{id}" class="act act-plus">+ Add</a>
          <a href="/menos/{id}" class="act act-minus">- Remove</a>
          <a href="/solicitar/{id}" class="act act-req">Request</a>
          <a href="/recebido/{id}" class="act act-recv">Received</a>
          <details class="inline-edit">
            <summary class="act act-edit">Note</summary>
            <form method="post" action="/observacao/{id}">
              <textarea name="observacao" placeholder="e.g. reserved, compatible with model X">{note_value}</textarea>
              <button type="submit" class="btn btn-primary">Save</button>
            </form>
          </details>
          <details class="inline-edit">
            <summary class="act act-edit">Ink</summary>
            <form method="post" action="/tinta/{id}">
              <input type="number" name="tinta_pct" min="0" max="100" value="{ink_value}" placeholder="blank clears">
              <button type="submit" class="btn btn-primary">Save</button>
            </form>
          </details>
        </div>
      </td>
    </tr>"#,
        code = text(&record.code),
        sector = text(&record.sector),
        model = text(&record.model),
        quantity = record.quantity,
        ink = ink_bar(record.ink_percent),
        note_value = text(&record.note),
    );
}

fn ink_bar(percent: Option<i32>) -> String {
    let Some(percent) = percent else {
        return r#"<span class="muted">-</span>"#.to_string();
    };

    let band = InkBand::classify(percent);
    let marker = if band == InkBand::Critical {
        r#"<span class="ink-critical" title="Critical">!</span>"#
    } else {
        ""
    };

    format!(
        r#"<div class="ink"><div class="ink-track"><div class="ink-fill" style="width:{percent}%;background:var(--{tone})"></div></div><span class="ink-value c-{tone}">{percent}%</span>{marker}</div>"#,
        tone = band.tone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ink_bar_marks_critical_levels() {
        let html = ink_bar(Some(15));
        assert!(html.contains("width:15%"));
        assert!(html.contains("var(--danger)"));
        assert!(html.contains("ink-critical"));

        let html = ink_bar(Some(45));
        assert!(html.contains("var(--warn)"));
        assert!(!html.contains("ink-critical"));

        assert!(!ink_bar(None).contains("ink-fill"));
    }

    #[test]
    fn row_escapes_user_text() {
        let record = StockRecord {
            id: 7,
            code: "TN-1".to_string(),
            sector: "R&D".to_string(),
            model: "M".to_string(),
            quantity: 0,
            awaiting: true,
            note: "<b>spare</b>".to_string(),
            ink_percent: None,
        };
        let mut out = String::new();
        render_row(&mut out, &record);

        assert!(out.contains("R&amp;D"));
        assert!(out.contains("&lt;b&gt;spare&lt;/b&gt;"));
        assert!(out.contains("Awaiting Supplier"));
        assert!(out.contains(r#"action="/tinta/7""#));
        assert!(out.contains("qty-0"));
    }
}
