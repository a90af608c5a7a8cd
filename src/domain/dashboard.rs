//! Read-time aggregates over the whole ledger.

use super::{InkBand, StockStatus};
use crate::entities::stock_records;

/// Why a record shows up in the needs-attention list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionKind {
    OutOfStock,
    CriticalInk(i32),
    SingleUnit,
    LowInk(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attention {
    pub record_id: i32,
    pub sector: String,
    pub kind: AttentionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkReading {
    pub record_id: i32,
    pub sector: String,
    pub percent: i32,
    pub band: InkBand,
}

/// Overall health bucket for the percent-ok gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Good,
    NeedsAttention,
    Critical,
}

impl Health {
    #[must_use]
    pub const fn from_percent_ok(percent_ok: u32) -> Self {
        if percent_ok >= 80 {
            Self::Good
        } else if percent_ok >= 50 {
            Self::NeedsAttention
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "All good",
            Self::NeedsAttention => "Needs attention",
            Self::Critical => "Critical",
        }
    }

    #[must_use]
    pub const fn tone(self) -> &'static str {
        match self {
            Self::Good => "ok",
            Self::NeedsAttention => "warn",
            Self::Critical => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub total_units: i64,
    pub record_count: usize,
    pub ok_count: usize,
    pub awaiting_count: usize,
    /// Quantity zero with no pending request.
    pub zeroed_count: usize,
    pub percent_ok: u32,
    pub percent_problem: u32,
    /// Zeroed, critical ink, single unit, low ink, in that order.
    /// A record can appear in several categories.
    pub attention: Vec<Attention>,
    /// Records with an ink reading, lowest first.
    pub ink_levels: Vec<InkReading>,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_records(records: &[stock_records::Model]) -> Self {
        let record_count = records.len();
        let total_units = records.iter().map(|r| i64::from(r.quantity)).sum();
        let ok_count = records
            .iter()
            .filter(|r| StockStatus::derive(r.quantity, r.awaiting) == StockStatus::Ok)
            .count();
        let awaiting_count = records.iter().filter(|r| r.awaiting).count();
        let zeroed_count = records
            .iter()
            .filter(|r| r.quantity == 0 && !r.awaiting)
            .count();

        let mut ordered: Vec<&stock_records::Model> = records.iter().collect();
        ordered.sort_by(|a, b| {
            a.quantity
                .cmp(&b.quantity)
                .then_with(|| a.sector.cmp(&b.sector))
        });

        let mut attention = Vec::new();
        collect_attention(&ordered, &mut attention, |r| {
            (r.quantity == 0 && !r.awaiting).then_some(AttentionKind::OutOfStock)
        });
        collect_attention(&ordered, &mut attention, |r| {
            r.ink_percent
                .filter(|p| InkBand::classify(*p) == InkBand::Critical)
                .map(AttentionKind::CriticalInk)
        });
        collect_attention(&ordered, &mut attention, |r| {
            (r.quantity == 1).then_some(AttentionKind::SingleUnit)
        });
        collect_attention(&ordered, &mut attention, |r| {
            r.ink_percent
                .filter(|p| InkBand::classify(*p) == InkBand::Warning)
                .map(AttentionKind::LowInk)
        });

        let mut ink_levels: Vec<InkReading> = ordered
            .iter()
            .filter_map(|r| {
                r.ink_percent.map(|percent| InkReading {
                    record_id: r.id,
                    sector: r.sector.clone(),
                    percent,
                    band: InkBand::classify(percent),
                })
            })
            .collect();
        ink_levels.sort_by_key(|reading| reading.percent);

        Self {
            total_units,
            record_count,
            ok_count,
            awaiting_count,
            zeroed_count,
            percent_ok: percent(ok_count, record_count),
            percent_problem: percent(zeroed_count, record_count),
            attention,
            ink_levels,
        }
    }

    #[must_use]
    pub const fn health(&self) -> Health {
        Health::from_percent_ok(self.percent_ok)
    }
}

fn collect_attention(
    ordered: &[&stock_records::Model],
    attention: &mut Vec<Attention>,
    kind_of: impl Fn(&stock_records::Model) -> Option<AttentionKind>,
) {
    for record in ordered {
        if let Some(kind) = kind_of(record) {
            attention.push(Attention {
                record_id: record.id,
                sector: record.sector.clone(),
                kind,
            });
        }
    }
}

/// `part / whole` as a whole percentage, rounding half to even. Zero when
/// `whole` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round_ties_even() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: i32,
        sector: &str,
        quantity: i32,
        awaiting: bool,
        ink: Option<i32>,
    ) -> stock_records::Model {
        stock_records::Model {
            id,
            code: "-".to_string(),
            sector: sector.to_string(),
            model: "-".to_string(),
            quantity,
            awaiting,
            note: String::new(),
            ink_percent: ink,
        }
    }

    #[test]
    fn empty_ledger_has_zero_percentages() {
        let summary = DashboardSummary::from_records(&[]);
        assert_eq!(summary.percent_ok, 0);
        assert_eq!(summary.percent_problem, 0);
        assert_eq!(summary.total_units, 0);
        assert!(summary.attention.is_empty());
    }

    #[test]
    fn counts() {
        let records = vec![
            record(1, "A", 3, false, None),
            record(2, "B", 0, true, None),
            record(3, "C", 0, false, None),
            record(4, "D", 1, true, None),
        ];
        let summary = DashboardSummary::from_records(&records);
        assert_eq!(summary.total_units, 4);
        assert_eq!(summary.record_count, 4);
        assert_eq!(summary.ok_count, 2);
        assert_eq!(summary.awaiting_count, 2);
        assert_eq!(summary.zeroed_count, 1);
        assert_eq!(summary.percent_ok, 50);
        assert_eq!(summary.percent_problem, 25);
        assert_eq!(summary.health(), Health::NeedsAttention);
    }

    #[test]
    fn percent_rounds_half_to_even() {
        assert_eq!(percent(1, 8), 12);
        assert_eq!(percent(5, 8), 62);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
    }

    #[test]
    fn attention_keeps_every_category_without_dedup() {
        let records = vec![
            record(1, "Zeta", 0, false, Some(10)),
            record(2, "Alpha", 1, false, Some(40)),
            record(3, "Beta", 5, false, Some(90)),
        ];
        let summary = DashboardSummary::from_records(&records);
        let kinds: Vec<(i32, AttentionKind)> = summary
            .attention
            .iter()
            .map(|a| (a.record_id, a.kind))
            .collect();

        assert_eq!(
            kinds,
            vec![
                (1, AttentionKind::OutOfStock),
                (1, AttentionKind::CriticalInk(10)),
                (2, AttentionKind::SingleUnit),
                (2, AttentionKind::LowInk(40)),
            ]
        );
    }

    #[test]
    fn attention_skips_records_already_on_order() {
        let records = vec![
            record(1, "Waiting", 0, true, None),
            record(2, "Empty", 0, false, None),
        ];
        let summary = DashboardSummary::from_records(&records);
        assert_eq!(summary.zeroed_count, 1);

        let listed: Vec<(i32, AttentionKind)> = summary
            .attention
            .iter()
            .map(|a| (a.record_id, a.kind))
            .collect();
        assert_eq!(listed, vec![(2, AttentionKind::OutOfStock)]);
    }

    #[test]
    fn ink_levels_are_sorted_lowest_first() {
        let records = vec![
            record(1, "A", 2, false, Some(70)),
            record(2, "B", 2, false, None),
            record(3, "C", 2, false, Some(0)),
            record(4, "D", 2, false, Some(35)),
        ];
        let summary = DashboardSummary::from_records(&records);
        let order: Vec<i32> = summary.ink_levels.iter().map(|r| r.percent).collect();
        assert_eq!(order, vec![0, 35, 70]);
        assert_eq!(summary.ink_levels[0].band, InkBand::Critical);
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(Health::from_percent_ok(80), Health::Good);
        assert_eq!(Health::from_percent_ok(79), Health::NeedsAttention);
        assert_eq!(Health::from_percent_ok(50), Health::NeedsAttention);
        assert_eq!(Health::from_percent_ok(49), Health::Critical);
    }
}
