//! Period filtering, grouping and ordering.
//!
//! All of these work on the effective date of an entry: the settlement date
//! when the entry is paid and has one, the due date otherwise.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::entry::{EntryStatus, LedgerEntry};

/// Group key used for entries without a readable effective date.
pub const UNDATED_KEY: &str = "sem data";

/// Resolves the date an entry is reported under.
#[must_use]
pub fn effective_date(entry: &LedgerEntry) -> Option<NaiveDate> {
    entry
        .settlement_date()
        .filter(|_| entry.status == EntryStatus::Paid)
        .or_else(|| entry.due_date())
}

/// A `(month, year)` selector; `0` leaves a field unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodSelector {
    /// Month 1-12, or 0 for any month.
    pub month: u32,
    /// Calendar year, or 0 for any year.
    pub year: u32,
}

impl PeriodSelector {
    /// Selects every entry.
    pub const ALL: Self = Self { month: 0, year: 0 };

    /// Creates a selector.
    #[must_use]
    pub const fn new(month: u32, year: u32) -> Self {
        Self { month, year }
    }

    /// Returns true when neither field constrains anything.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.month == 0 && self.year == 0
    }

    /// Returns true if `date` falls in the selected period.
    #[must_use]
    pub fn matches(&self, date: NaiveDate) -> bool {
        let month_ok = self.month == 0 || date.month() == self.month;
        let year_ok = self.year == 0 || i64::from(date.year()) == i64::from(self.year);
        month_ok && year_ok
    }

    /// Returns true if the entry belongs to the selected period.
    ///
    /// Undated entries only belong to the unconstrained selector.
    #[must_use]
    pub fn contains(&self, entry: &LedgerEntry) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        effective_date(entry).is_some_and(|date| self.matches(date))
    }
}

/// Keeps the entries of the given period, in input order.
#[must_use]
pub fn filter_by_period(entries: &[LedgerEntry], month: u32, year: u32) -> Vec<LedgerEntry> {
    let selector = PeriodSelector::new(month, year);
    entries
        .iter()
        .filter(|entry| selector.contains(entry))
        .cloned()
        .collect()
}

/// `"MM/YYYY"` key of a date.
#[must_use]
pub fn period_key(date: NaiveDate) -> String {
    format!("{:02}/{:04}", date.month(), date.year())
}

/// Entries bucketed by `"MM/YYYY"` of their effective date.
///
/// Buckets keep the order in which their key first appeared in the input.
/// This is not calendar order; use [`PeriodGroups::chronological_keys`] when
/// that is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodGroups {
    groups: Vec<(String, Vec<LedgerEntry>)>,
}

impl PeriodGroups {
    /// Keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    /// Entries under `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[LedgerEntry]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Iterates `(key, entries)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LedgerEntry])> {
        self.groups
            .iter()
            .map(|(key, entries)| (key.as_str(), entries.as_slice()))
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keys sorted oldest first, with the undated bucket last.
    #[must_use]
    pub fn chronological_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_by_key(|key| parse_period_key(key).map_or((1, 0, 0), |(m, y)| (0, y, m)));
        keys
    }

    /// Consumes the groups.
    #[must_use]
    pub fn into_inner(self) -> Vec<(String, Vec<LedgerEntry>)> {
        self.groups
    }
}

/// Splits an `"MM/YYYY"` key into `(month, year)`.
#[must_use]
pub fn parse_period_key(key: &str) -> Option<(u32, i32)> {
    let (month, year) = key.split_once('/')?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

/// Partitions entries by the month of their effective date.
#[must_use]
pub fn group_by_period(entries: &[LedgerEntry]) -> PeriodGroups {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<LedgerEntry>)> = Vec::new();

    for entry in entries {
        let key = effective_date(entry).map_or_else(|| UNDATED_KEY.to_string(), period_key);
        if let Some(&position) = index.get(&key) {
            groups[position].1.push(entry.clone());
        } else {
            index.insert(key.clone(), groups.len());
            groups.push((key, vec![entry.clone()]));
        }
    }

    PeriodGroups { groups }
}

/// Returns the entries ordered by effective date, most recent first.
///
/// The sort is stable: entries on the same date keep their input order.
/// Undated entries go last.
#[must_use]
pub fn sort_by_date(entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| std::cmp::Reverse(effective_date(entry)));
    sorted
}
