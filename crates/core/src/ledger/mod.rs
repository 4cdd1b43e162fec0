//! Treasury ledger logic.
//!
//! This module implements the core ledger functionality:
//! - Ledger entries as stored, with tolerant amount/date readers
//! - Effective status classification (paid, pending, overdue, canceled)
//! - Totals and category breakdowns
//! - Period filtering, grouping and ordering
//! - Draft entries and their validation rules
//! - Reading an export row by row

pub mod draft;
pub mod entry;
pub mod error;
pub mod period;
pub mod snapshot;
pub mod status;
pub mod totals;
pub mod validation;

#[cfg(test)]
mod period_props;
#[cfg(test)]
mod totals_props;
#[cfg(test)]
mod validation_props;

pub use draft::LedgerDraft;
pub use entry::{EntryStatus, EntryType, LedgerEntry, OriginType, StoredAmount, StoredDate};
pub use error::{DraftError, UnknownValue};
pub use period::{
    PeriodGroups, PeriodSelector, UNDATED_KEY, effective_date, filter_by_period, group_by_period,
    period_key, sort_by_date,
};
pub use snapshot::{RejectedRow, Snapshot};
pub use status::{Classifier, EffectiveStatus};
pub use totals::{BucketCounts, CategoryTotal, LedgerTotals, category_breakdown};
pub use validation::validate_draft;
