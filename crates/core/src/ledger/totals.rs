//! Ledger totals.
//!
//! Every entry lands in exactly one bucket chosen by its type and effective
//! status. Canceled entries land in none. Unreadable amounts, and amounts
//! that would overflow a running sum, count as zero and never stop the fold.

use std::collections::HashMap;

use lodge_shared::types::CategoryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{EntryType, LedgerEntry};
use super::status::{Classifier, EffectiveStatus};

/// Aggregated totals for a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Settled revenue.
    #[serde(with = "rust_decimal::serde::str")]
    pub paid_revenue: Decimal,
    /// Settled expense.
    #[serde(with = "rust_decimal::serde::str")]
    pub paid_expense: Decimal,
    /// Unsettled revenue, overdue included.
    #[serde(with = "rust_decimal::serde::str")]
    pub pending_revenue: Decimal,
    /// Unsettled expense, overdue included.
    #[serde(with = "rust_decimal::serde::str")]
    pub pending_expense: Decimal,
    /// Overdue part of `pending_revenue`.
    #[serde(with = "rust_decimal::serde::str")]
    pub overdue_revenue: Decimal,
    /// Overdue part of `pending_expense`.
    #[serde(with = "rust_decimal::serde::str")]
    pub overdue_expense: Decimal,
    /// Entries counted in each bucket.
    pub counts: BucketCounts,
    /// Entries whose amount would have overflowed a sum; counted as zero.
    pub overflowed: usize,
}

/// Number of entries per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    /// Entries in `paid_revenue`.
    pub paid_revenue: usize,
    /// Entries in `paid_expense`.
    pub paid_expense: usize,
    /// Entries in `pending_revenue`.
    pub pending_revenue: usize,
    /// Entries in `pending_expense`.
    pub pending_expense: usize,
    /// Canceled entries, counted but not summed.
    pub canceled: usize,
}

impl LedgerTotals {
    /// Folds a sequence of entries into totals.
    #[must_use]
    pub fn from_entries(entries: &[LedgerEntry], classifier: &Classifier) -> Self {
        entries.iter().fold(Self::default(), |mut totals, entry| {
            totals.add(entry, classifier.classify(entry));
            totals
        })
    }

    /// Adds one already classified entry.
    ///
    /// The amount goes into its bucket (and the overdue sub-total, if any)
    /// only when every sum stays representable; otherwise it counts as zero
    /// and `overflowed` goes up.
    pub fn add(&mut self, entry: &LedgerEntry, status: EffectiveStatus) {
        let overdue = status == EffectiveStatus::Overdue;
        let (bucket, sub_total) = match (entry.entry_type, status) {
            (_, EffectiveStatus::Canceled) => {
                self.counts.canceled += 1;
                return;
            }
            (EntryType::Revenue, EffectiveStatus::Paid) => {
                self.counts.paid_revenue += 1;
                (&mut self.paid_revenue, None)
            }
            (EntryType::Expense, EffectiveStatus::Paid) => {
                self.counts.paid_expense += 1;
                (&mut self.paid_expense, None)
            }
            (EntryType::Revenue, _) => {
                self.counts.pending_revenue += 1;
                (&mut self.pending_revenue, overdue.then_some(&mut self.overdue_revenue))
            }
            (EntryType::Expense, _) => {
                self.counts.pending_expense += 1;
                (&mut self.pending_expense, overdue.then_some(&mut self.overdue_expense))
            }
        };

        if !add_to_all(bucket, sub_total, entry.amount()) {
            self.overflowed += 1;
        }
    }

    /// Cash balance: settled revenue minus settled expense.
    ///
    /// Saturates at the `Decimal` bounds.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.paid_revenue.saturating_sub(self.paid_expense)
    }

    /// Balance once every open entry settles.
    #[must_use]
    pub fn projected_balance(&self) -> Decimal {
        self.balance()
            .saturating_add(self.pending_revenue)
            .saturating_sub(self.pending_expense)
    }

    /// Sum of the four exclusive buckets.
    #[must_use]
    pub fn accounted(&self) -> Decimal {
        self.paid_revenue
            .saturating_add(self.paid_expense)
            .saturating_add(self.pending_revenue)
            .saturating_add(self.pending_expense)
    }
}

/// Adds `amount` to `total` and `sub_total`, or to neither if either sum
/// overflows.
fn add_to_all(total: &mut Decimal, sub_total: Option<&mut Decimal>, amount: Decimal) -> bool {
    let Some(next_total) = total.checked_add(amount) else {
        return false;
    };
    if let Some(sub_total) = sub_total {
        let Some(next_sub_total) = sub_total.checked_add(amount) else {
            return false;
        };
        *sub_total = next_sub_total;
    }
    *total = next_total;
    true
}

/// Totals for one category and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category, `None` for uncategorized entries.
    pub category_id: Option<CategoryId>,
    /// Revenue or expense.
    pub entry_type: EntryType,
    /// Settled amount.
    #[serde(with = "rust_decimal::serde::str")]
    pub paid: Decimal,
    /// Unsettled amount, overdue included.
    #[serde(with = "rust_decimal::serde::str")]
    pub pending: Decimal,
    /// Entries counted.
    pub count: usize,
}

/// Totals per `(category, type)` over non-canceled entries, in
/// first-occurrence order.
///
/// An amount that would overflow its row counts as zero, as in
/// [`LedgerTotals::add`].
#[must_use]
pub fn category_breakdown(entries: &[LedgerEntry], classifier: &Classifier) -> Vec<CategoryTotal> {
    let mut index: HashMap<(Option<CategoryId>, EntryType), usize> = HashMap::new();
    let mut rows: Vec<CategoryTotal> = Vec::new();

    for entry in entries {
        let status = classifier.classify(entry);
        if status == EffectiveStatus::Canceled {
            continue;
        }

        let position = *index
            .entry((entry.category_id, entry.entry_type))
            .or_insert_with(|| {
                rows.push(CategoryTotal {
                    category_id: entry.category_id,
                    entry_type: entry.entry_type,
                    paid: Decimal::ZERO,
                    pending: Decimal::ZERO,
                    count: 0,
                });
                rows.len() - 1
            });
        let row = &mut rows[position];

        let target = if status == EffectiveStatus::Paid {
            &mut row.paid
        } else {
            &mut row.pending
        };
        add_to_all(target, None, entry.amount());
        row.count += 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::{EntryStatus, StoredAmount};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    fn yesterday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 9).unwrap()
    }

    #[test]
    fn test_paid_revenue_and_overdue_expense() {
        let entries = vec![
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Paid, dec!(100), today())
                .with_settlement_date(today()),
            LedgerEntry::new(EntryType::Expense, EntryStatus::Pending, dec!(40), yesterday()),
        ];

        let totals = LedgerTotals::from_entries(&entries, &Classifier::as_of(today()));

        assert_eq!(totals.paid_revenue, dec!(100));
        assert_eq!(totals.paid_expense, dec!(0));
        assert_eq!(totals.pending_revenue, dec!(0));
        assert_eq!(totals.pending_expense, dec!(40));
        assert_eq!(totals.overdue_expense, dec!(40));
        assert_eq!(totals.balance(), dec!(100));
        assert_eq!(totals.projected_balance(), dec!(60));
    }

    #[test]
    fn test_canceled_contributes_nothing() {
        let entries = vec![
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Canceled, dec!(500), today()),
            LedgerEntry::new(EntryType::Expense, EntryStatus::Canceled, dec!(70), yesterday()),
        ];

        let totals = LedgerTotals::from_entries(&entries, &Classifier::as_of(today()));

        assert_eq!(totals.accounted(), Decimal::ZERO);
        assert_eq!(totals.counts.canceled, 2);
    }

    #[test]
    fn test_unreadable_amount_counts_as_zero() {
        let mut broken = LedgerEntry::new(EntryType::Revenue, EntryStatus::Paid, dec!(1), today());
        broken.amount = StoredAmount::Text("cem reais".into());
        let entries = vec![
            broken,
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Paid, dec!(25.50), today()),
        ];

        let totals = LedgerTotals::from_entries(&entries, &Classifier::as_of(today()));

        assert_eq!(totals.paid_revenue, dec!(25.50));
        assert_eq!(totals.counts.paid_revenue, 2);
    }

    #[test]
    fn test_overflowing_amount_counts_as_zero() {
        let mut huge = LedgerEntry::new(EntryType::Revenue, EntryStatus::Paid, dec!(1), today());
        huge.amount = StoredAmount::Text("79228162514264337593543950335".into());
        let entries = vec![
            huge,
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Paid, dec!(1), today()),
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Pending, dec!(5), yesterday()),
        ];

        let totals = LedgerTotals::from_entries(&entries, &Classifier::as_of(today()));

        assert_eq!(totals.paid_revenue, Decimal::MAX);
        assert_eq!(totals.counts.paid_revenue, 2);
        assert_eq!(totals.overflowed, 1);
        assert_eq!(totals.pending_revenue, dec!(5));
        assert_eq!(totals.overdue_revenue, dec!(5));
        assert_eq!(totals.projected_balance(), Decimal::MAX);
        assert_eq!(totals.accounted(), Decimal::MAX);

        let rows = category_breakdown(&entries, &Classifier::as_of(today()));
        assert_eq!(rows[0].paid, Decimal::MAX);
        assert_eq!(rows[0].count, 3);
    }

    #[test]
    fn test_overdue_overflow_leaves_both_sums_untouched() {
        let mut totals = LedgerTotals {
            pending_expense: dec!(10),
            overdue_expense: Decimal::MAX,
            ..LedgerTotals::default()
        };
        let late = LedgerEntry::new(EntryType::Expense, EntryStatus::Pending, dec!(1), yesterday());

        totals.add(&late, EffectiveStatus::Overdue);

        assert_eq!(totals.pending_expense, dec!(10));
        assert_eq!(totals.overdue_expense, Decimal::MAX);
        assert_eq!(totals.counts.pending_expense, 1);
        assert_eq!(totals.overflowed, 1);
    }

    #[test]
    fn test_balance_saturates() {
        let totals = LedgerTotals {
            paid_revenue: Decimal::MAX,
            paid_expense: dec!(-1),
            ..LedgerTotals::default()
        };
        assert_eq!(totals.balance(), Decimal::MAX);

        let totals = LedgerTotals {
            paid_revenue: Decimal::MIN,
            paid_expense: dec!(1),
            pending_expense: Decimal::MAX,
            ..LedgerTotals::default()
        };
        assert_eq!(totals.balance(), Decimal::MIN);
        assert_eq!(totals.projected_balance(), Decimal::MIN);
    }

    #[test]
    fn test_totals_serialize_amounts_as_strings() {
        let totals = LedgerTotals {
            paid_revenue: dec!(12.50),
            ..LedgerTotals::default()
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["paid_revenue"], "12.50");
        assert_eq!(json["overflowed"], 0);
    }

    #[test]
    fn test_empty_input() {
        let totals = LedgerTotals::from_entries(&[], &Classifier::as_of(today()));
        assert_eq!(totals, LedgerTotals::default());
        assert_eq!(totals.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_category_breakdown() {
        let dues = CategoryId::new(1);
        let rent = CategoryId::new(2);
        let entries = vec![
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Paid, dec!(100), today())
                .with_category(dues),
            LedgerEntry::new(EntryType::Expense, EntryStatus::Pending, dec!(800), yesterday())
                .with_category(rent),
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Pending, dec!(100), today())
                .with_category(dues),
            LedgerEntry::new(EntryType::Revenue, EntryStatus::Canceled, dec!(100), today())
                .with_category(dues),
            LedgerEntry::new(EntryType::Expense, EntryStatus::Paid, dec!(15), today()),
        ];

        let rows = category_breakdown(&entries, &Classifier::as_of(today()));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].category_id, Some(dues));
        assert_eq!(rows[0].paid, dec!(100));
        assert_eq!(rows[0].pending, dec!(100));
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].category_id, Some(rent));
        assert_eq!(rows[1].pending, dec!(800));
        assert_eq!(rows[2].category_id, None);
        assert_eq!(rows[2].entry_type, EntryType::Expense);
        assert_eq!(rows[2].paid, dec!(15));
    }
}
