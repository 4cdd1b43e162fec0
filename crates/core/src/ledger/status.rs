//! Effective status derivation.
//!
//! The stored status only knows pending/paid/canceled. Reports also need to
//! tell overdue entries apart, which depends on the day the report runs.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::entry::{EntryStatus, LedgerEntry};

/// Display/classification status; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    /// Settled.
    Paid,
    /// Not settled, due today or later (or no readable due date).
    Pending,
    /// Not settled and past its due date.
    Overdue,
    /// Canceled.
    Canceled,
}

impl EffectiveStatus {
    /// Returns true for statuses that still expect a settlement.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }

    /// Portuguese label used in printed reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Pago",
            Self::Pending => "Pendente",
            Self::Overdue => "Vencido",
            Self::Canceled => "Cancelado",
        }
    }
}

/// Classifies entries against a single reference day.
///
/// One classifier is built per computation so every entry in it sees the
/// same "today", even when the run crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    today: NaiveDate,
}

impl Classifier {
    /// Pins the reference day to the local calendar date.
    #[must_use]
    pub fn today() -> Self {
        Self::as_of(Local::now().date_naive())
    }

    /// Pins the reference day to `today`.
    #[must_use]
    pub const fn as_of(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The reference day.
    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.today
    }

    /// Derives the effective status of one entry.
    ///
    /// Precedence: canceled, paid, overdue, pending. An unreadable due date
    /// classifies as pending.
    #[must_use]
    pub fn classify(&self, entry: &LedgerEntry) -> EffectiveStatus {
        match entry.status {
            EntryStatus::Canceled => EffectiveStatus::Canceled,
            EntryStatus::Paid => EffectiveStatus::Paid,
            EntryStatus::Pending => match entry.due_date() {
                Some(due) if due < self.today => EffectiveStatus::Overdue,
                _ => EffectiveStatus::Pending,
            },
        }
    }

    /// Classifies every entry, preserving input order.
    #[must_use]
    pub fn classify_all(&self, entries: &[LedgerEntry]) -> Vec<EffectiveStatus> {
        entries.iter().map(|entry| self.classify(entry)).collect()
    }

    /// Whole days an entry is past due, or `None` if it is not overdue.
    #[must_use]
    pub fn days_overdue(&self, entry: &LedgerEntry) -> Option<i64> {
        if self.classify(entry) != EffectiveStatus::Overdue {
            return None;
        }
        entry
            .due_date()
            .map(|due| self.today.signed_duration_since(due).num_days())
    }
}
