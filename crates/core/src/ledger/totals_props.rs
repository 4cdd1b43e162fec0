//! Property-based tests for ledger totals.
//!
//! Feature: treasury-ledger
//! - Bucket partition: every non-canceled amount is counted exactly once
//! - Balance is paid revenue minus paid expense
//! - Overflowing amounts are counted, never fatal

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{EntryStatus, EntryType, LedgerEntry, StoredAmount};
use super::status::Classifier;
use super::totals::{LedgerTotals, category_breakdown};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 10).unwrap_or_default()
}

fn status_strategy() -> impl Strategy<Value = EntryStatus> {
    prop_oneof![
        Just(EntryStatus::Pending),
        Just(EntryStatus::Paid),
        Just(EntryStatus::Canceled),
    ]
}

fn amount_strategy() -> impl Strategy<Value = StoredAmount> {
    prop_oneof![
        8 => (0i64..10_000_000i64).prop_map(|cents| StoredAmount::Number(Decimal::new(cents, 2))),
        1 => "[a-z]{1,8}".prop_map(StoredAmount::Text),
        1 => Just(StoredAmount::Missing),
    ]
}

fn entry_strategy() -> impl Strategy<Value = LedgerEntry> {
    (
        prop_oneof![Just(EntryType::Revenue), Just(EntryType::Expense)],
        status_strategy(),
        amount_strategy(),
        -400i64..400,
    )
        .prop_map(|(entry_type, status, amount, offset)| {
            let mut entry =
                LedgerEntry::new(entry_type, status, Decimal::ZERO, today() + Duration::days(offset));
            entry.amount = amount;
            entry
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The four buckets add up to the amounts of the non-canceled entries.
    #[test]
    fn prop_buckets_partition_non_canceled(entries in prop::collection::vec(entry_strategy(), 0..60)) {
        let classifier = Classifier::as_of(today());
        let totals = LedgerTotals::from_entries(&entries, &classifier);

        let expected: Decimal = entries
            .iter()
            .filter(|e| e.status != EntryStatus::Canceled)
            .map(LedgerEntry::amount)
            .sum();
        prop_assert_eq!(totals.accounted(), expected);

        let counted = totals.counts.paid_revenue
            + totals.counts.paid_expense
            + totals.counts.pending_revenue
            + totals.counts.pending_expense
            + totals.counts.canceled;
        prop_assert_eq!(counted, entries.len());
    }

    /// Balance is exactly paid revenue minus paid expense.
    #[test]
    fn prop_balance_identity(entries in prop::collection::vec(entry_strategy(), 0..60)) {
        let totals = LedgerTotals::from_entries(&entries, &Classifier::as_of(today()));
        prop_assert_eq!(totals.balance(), totals.paid_revenue - totals.paid_expense);
        prop_assert!(totals.overdue_revenue <= totals.pending_revenue);
        prop_assert!(totals.overdue_expense <= totals.pending_expense);
    }

    /// The category breakdown sums to the same figures as the totals.
    #[test]
    fn prop_breakdown_matches_totals(entries in prop::collection::vec(entry_strategy(), 0..60)) {
        let classifier = Classifier::as_of(today());
        let totals = LedgerTotals::from_entries(&entries, &classifier);
        let rows = category_breakdown(&entries, &classifier);

        let revenue: Decimal = rows
            .iter()
            .filter(|r| r.entry_type == EntryType::Revenue)
            .map(|r| r.paid + r.pending)
            .sum();
        prop_assert_eq!(revenue, totals.paid_revenue + totals.pending_revenue);
    }

    /// Amounts near the decimal bounds never abort the fold; each one that
    /// cannot be added is counted instead.
    #[test]
    fn prop_extreme_amounts_never_abort(
        amounts in prop::collection::vec(
            prop_oneof![
                Just(Decimal::MAX),
                Just(Decimal::MIN),
                (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2)),
            ],
            0..40,
        ),
    ) {
        let entries: Vec<LedgerEntry> = amounts
            .iter()
            .map(|amount| LedgerEntry::new(EntryType::Revenue, EntryStatus::Paid, *amount, today()))
            .collect();

        let totals = LedgerTotals::from_entries(&entries, &Classifier::as_of(today()));

        let mut expected = Decimal::ZERO;
        let mut skipped = 0;
        for amount in &amounts {
            match expected.checked_add(*amount) {
                Some(sum) => expected = sum,
                None => skipped += 1,
            }
        }
        prop_assert_eq!(totals.paid_revenue, expected);
        prop_assert_eq!(totals.overflowed, skipped);
        prop_assert_eq!(totals.counts.paid_revenue, entries.len());
        prop_assert_eq!(totals.projected_balance(), totals.balance());
    }
}
