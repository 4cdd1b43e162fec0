//! Property-based tests for period filtering and ordering.

use chrono::{Duration, NaiveDate};
use lodge_shared::types::EntryId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{EntryStatus, EntryType, LedgerEntry, StoredDate};
use super::period::{effective_date, filter_by_period, group_by_period, sort_by_date};

fn entry_strategy() -> impl Strategy<Value = LedgerEntry> {
    (
        prop_oneof![
            Just(EntryStatus::Pending),
            Just(EntryStatus::Paid),
            Just(EntryStatus::Canceled),
        ],
        0i64..1_500,
        prop::option::of(0i64..60),
        prop::bool::weighted(0.05),
    )
        .prop_map(|(status, offset, settle_after, undated)| {
            let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
            let due = base + Duration::days(offset);
            let mut entry = LedgerEntry::new(EntryType::Revenue, status, Decimal::ONE, due);
            if let Some(days) = settle_after {
                entry = entry.with_settlement_date(due + Duration::days(days));
            }
            if undated {
                entry.due_date = StoredDate::none();
                entry.settlement_date = StoredDate::none();
            }
            entry
        })
}

fn numbered(entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
    entries
        .into_iter()
        .zip(0i64..)
        .map(|(entry, id)| entry.with_id(EntryId::new(id)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// The unconstrained selector returns the input unchanged.
    #[test]
    fn prop_unconstrained_filter_is_identity(entries in prop::collection::vec(entry_strategy(), 0..50)) {
        prop_assert_eq!(filter_by_period(&entries, 0, 0), entries);
    }

    /// Filtering keeps input order and only matching entries.
    #[test]
    fn prop_filter_keeps_order(
        entries in prop::collection::vec(entry_strategy(), 0..50),
        month in 0u32..=12,
        year in prop_oneof![Just(0u32), 2023u32..2028],
    ) {
        let entries = numbered(entries);
        let filtered = filter_by_period(&entries, month, year);
        let ids: Vec<_> = filtered.iter().filter_map(|e| e.id).collect();
        let mut sorted_ids = ids.clone();
        sorted_ids.sort();
        prop_assert_eq!(&ids, &sorted_ids);
        for entry in &filtered {
            if month != 0 || year != 0 {
                prop_assert!(effective_date(entry).is_some());
            }
        }
    }

    /// Sorting is idempotent and most-recent first.
    #[test]
    fn prop_sort_idempotent(entries in prop::collection::vec(entry_strategy(), 0..50)) {
        let once = sort_by_date(&numbered(entries));
        let twice = sort_by_date(&once);
        prop_assert_eq!(&once, &twice);
        for pair in once.windows(2) {
            prop_assert!(effective_date(&pair[0]) >= effective_date(&pair[1]));
        }
    }

    /// Grouping loses nothing and never splits a key.
    #[test]
    fn prop_grouping_is_a_partition(entries in prop::collection::vec(entry_strategy(), 0..50)) {
        let groups = group_by_period(&entries);
        let total: usize = groups.iter().map(|(_, bucket)| bucket.len()).sum();
        prop_assert_eq!(total, entries.len());
        let mut keys: Vec<&str> = groups.keys().collect();
        let before = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }
}
