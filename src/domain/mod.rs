//! Stock rules shared by the services and the views.
//!
//! Nothing in here touches the database: status and ink bands are derived on
//! every read, and [`StockAction`] describes a mutation before the repository
//! turns it into a conditional `UPDATE`.

pub mod dashboard;

pub use dashboard::{Attention, AttentionKind, DashboardSummary, Health, InkReading};

use std::fmt;
use std::num::IntErrorKind;

/// Highest ink percentage still classified as critical.
pub const INK_CRITICAL_MAX: i32 = 20;

/// Highest ink percentage still classified as a warning.
pub const INK_WARNING_MAX: i32 = 50;

/// Actor recorded for writes that do not come from a logged-in account.
pub const SYSTEM_ACTOR: &str = "System";

/// Value stored when the ink form is posted without its field.
const INK_MISSING_DEFAULT: i32 = 100;

/// Identifier of a stock ledger record.
///
/// Keeps ledger ids apart from account ids in service signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StockId(i32);

impl StockId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for StockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// Derived availability of a record. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Ok,
    AwaitingSupplier,
    Problem,
}

impl StockStatus {
    #[must_use]
    pub const fn derive(quantity: i32, awaiting: bool) -> Self {
        if quantity >= 1 {
            Self::Ok
        } else if awaiting {
            Self::AwaitingSupplier
        } else {
            Self::Problem
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::AwaitingSupplier => "Awaiting Supplier",
            Self::Problem => "Problem",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity band of an ink reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkBand {
    Critical,
    Warning,
    Healthy,
}

impl InkBand {
    #[must_use]
    pub const fn classify(percent: i32) -> Self {
        if percent <= INK_CRITICAL_MAX {
            Self::Critical
        } else if percent <= INK_WARNING_MAX {
            Self::Warning
        } else {
            Self::Healthy
        }
    }

    /// CSS variable suffix used by the views.
    #[must_use]
    pub const fn tone(self) -> &'static str {
        match self {
            Self::Critical => "danger",
            Self::Warning => "warn",
            Self::Healthy => "ok",
        }
    }
}

/// Interprets the raw `tinta_pct` form field.
///
/// A missing field counts as full. Numbers are clamped to `0..=100`, including
/// ones too large for an integer; anything else clears the reading.
#[must_use]
pub fn parse_ink_level(raw: Option<&str>) -> Option<i32> {
    let Some(raw) = raw else {
        return Some(INK_MISSING_DEFAULT);
    };

    match raw.trim().parse::<i64>() {
        Ok(value) => i32::try_from(value.clamp(0, 100)).ok(),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(100),
            IntErrorKind::NegOverflow => Some(0),
            _ => None,
        },
    }
}

/// One of the six ledger mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAction {
    Increment,
    Decrement,
    Request,
    Receive,
    SetNote(String),
    SetInkLevel(Option<i32>),
}

impl StockAction {
    /// Builds a note update from raw form input.
    #[must_use]
    pub fn note(raw: &str) -> Self {
        Self::SetNote(raw.trim().to_string())
    }

    /// Builds an ink update from the raw form field, see [`parse_ink_level`].
    #[must_use]
    pub fn ink_level(raw: Option<&str>) -> Self {
        Self::SetInkLevel(parse_ink_level(raw))
    }

    /// Label written to the history log.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Increment => "Addition",
            Self::Decrement => "Removal",
            Self::Request => "Request",
            Self::Receive => "Receipt",
            Self::SetNote(_) => "Note",
            Self::SetInkLevel(_) => "Ink Level",
        }
    }

    /// Stable lowercase name for metrics and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Request => "request",
            Self::Receive => "receive",
            Self::SetNote(_) => "set_note",
            Self::SetInkLevel(_) => "set_ink_level",
        }
    }

    /// Human-readable history detail with a snapshot of the sector name.
    #[must_use]
    pub fn detail(&self, sector: &str) -> String {
        match self {
            Self::Increment => format!("+1 unit - {sector}"),
            Self::Decrement => format!("-1 unit - {sector}"),
            Self::Request => format!("Replacement requested from supplier - {sector}"),
            Self::Receive => format!("Toner received +1 - {sector}"),
            Self::SetNote(note) => format!("Note updated - {sector}: \"{note}\""),
            Self::SetInkLevel(Some(percent)) => format!("Ink level set to {percent}% - {sector}"),
            Self::SetInkLevel(None) => format!("Ink level cleared - {sector}"),
        }
    }
}
