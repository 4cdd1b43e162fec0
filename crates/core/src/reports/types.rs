//! Report data types.

use chrono::NaiveDate;
use lodge_shared::types::{CategoryId, EntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{CategoryTotal, EffectiveStatus, EntryType, LedgerTotals, PeriodSelector};

/// Totals plus the figures derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    /// Bucket totals.
    #[serde(flatten)]
    pub totals: LedgerTotals,
    /// Paid revenue minus paid expense.
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    /// Balance once every open entry settles.
    #[serde(with = "rust_decimal::serde::str")]
    pub projected_balance: Decimal,
}

impl From<LedgerTotals> for StatementTotals {
    fn from(totals: LedgerTotals) -> Self {
        Self {
            balance: totals.balance(),
            projected_balance: totals.projected_balance(),
            totals,
        }
    }
}

/// One printed entry line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Store identifier.
    pub id: Option<EntryId>,
    /// Effective date.
    pub date: Option<NaiveDate>,
    /// Revenue or expense.
    pub entry_type: EntryType,
    /// Effective status on the statement date.
    pub status: EffectiveStatus,
    /// Amount, zero when unreadable.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Category.
    pub category_id: Option<CategoryId>,
    /// Description.
    pub description: String,
}

/// Entries of one `"MM/YYYY"` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSection {
    /// `"MM/YYYY"`, or the undated key.
    pub key: String,
    /// Totals of this bucket.
    pub totals: StatementTotals,
    /// Lines, most recent first.
    pub lines: Vec<StatementLine>,
}

/// An overdue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueItem {
    /// Store identifier.
    pub id: Option<EntryId>,
    /// Revenue or expense.
    pub entry_type: EntryType,
    /// Due date.
    pub due_date: NaiveDate,
    /// Whole days past due.
    pub days_overdue: i64,
    /// Amount, zero when unreadable.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Description.
    pub description: String,
}

/// Counters for rows the tolerant readers had to paper over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Amounts stored but not numeric; counted as zero.
    pub unreadable_amounts: usize,
    /// Amounts not stored at all; counted as zero.
    pub missing_amounts: usize,
    /// Due or settlement dates stored but not parseable.
    pub unreadable_dates: usize,
    /// Entries with no effective date at all.
    pub undated: usize,
    /// Amounts left out of a total because the sum would overflow.
    pub overflowed_amounts: usize,
    /// Snapshot rows that could not be read as entries at all. These belong
    /// to no period, so the count covers the whole snapshot.
    pub rejected_rows: usize,
}

impl DataQuality {
    /// Returns true when nothing needed a fallback.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Financial statement for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStatement {
    /// Report type identifier.
    pub report_type: String,
    /// Lodge name for the header.
    pub lodge_name: String,
    /// Selected period.
    pub period: PeriodSelector,
    /// Human-readable period.
    pub period_label: String,
    /// Day statuses were computed against.
    pub as_of: NaiveDate,
    /// Totals of every selected entry.
    pub totals: StatementTotals,
    /// Per-month sections, most recent first, undated last.
    pub sections: Vec<PeriodSection>,
    /// Overdue entries, longest overdue first.
    pub overdue: Vec<OverdueItem>,
    /// Totals per category and direction.
    pub categories: Vec<CategoryTotal>,
    /// Fallback counters over the selected entries.
    pub data_quality: DataQuality,
}
