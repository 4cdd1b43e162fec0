//! Property-based tests for draft validation.
//!
//! Feature: treasury-ledger
//! - First failing rule wins
//! - Amounts must be strictly positive

use chrono::NaiveDate;
use lodge_shared::types::{CategoryId, PersonId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::draft::LedgerDraft;
use super::entry::{EntryStatus, EntryType, OriginType};
use super::error::DraftError;
use super::validation::validate_draft;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a zero or negative amount.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Revenue), Just(EntryType::Expense)]
}

fn origin_strategy() -> impl Strategy<Value = OriginType> {
    prop_oneof![
        Just(OriginType::Person),
        Just(OriginType::Lodge),
        Just(OriginType::Supplier),
        Just(OriginType::Other),
    ]
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

/// Strategy to generate a draft that passes every rule.
fn valid_draft() -> impl Strategy<Value = LedgerDraft> {
    (
        entry_type_strategy(),
        1i64..500,
        "[A-Za-z][A-Za-z ]{0,30}",
        positive_amount(),
        date_strategy(),
        date_strategy(),
        prop::bool::ANY,
        origin_strategy(),
        1i64..2_000,
    )
        .prop_map(
            |(entry_type, category, description, amount, created, due, paid, origin, person)| {
                LedgerDraft {
                    entry_type: Some(entry_type),
                    category_id: Some(CategoryId::new(category)),
                    description,
                    amount: Some(amount),
                    created_on: Some(created),
                    due_date: Some(due),
                    status: if paid { EntryStatus::Paid } else { EntryStatus::Pending },
                    settlement_date: paid.then_some(due),
                    origin_type: Some(origin),
                    origin_person_id: Some(PersonId::new(person)),
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Well-formed drafts are accepted.
    #[test]
    fn prop_valid_drafts_accepted(draft in valid_draft()) {
        prop_assert_eq!(validate_draft(&draft), Ok(()));
    }

    /// Zero and negative amounts are rejected whatever else the draft holds.
    #[test]
    fn prop_non_positive_amount_rejected(draft in valid_draft(), amount in non_positive_amount()) {
        let draft = LedgerDraft { amount: Some(amount), ..draft };
        prop_assert_eq!(validate_draft(&draft), Err(DraftError::AmountNotPositive));
    }

    /// A missing type hides every later failure.
    #[test]
    fn prop_type_checked_before_everything(draft in valid_draft(), amount in non_positive_amount()) {
        let draft = LedgerDraft {
            entry_type: None,
            category_id: None,
            description: String::new(),
            amount: Some(amount),
            due_date: None,
            ..draft
        };
        prop_assert_eq!(validate_draft(&draft), Err(DraftError::TypeRequired));
    }

    /// Paid drafts need a settlement date; pending drafts do not.
    #[test]
    fn prop_settlement_required_only_when_paid(draft in valid_draft()) {
        let without = LedgerDraft { settlement_date: None, ..draft };
        let result = validate_draft(&without);
        if without.status == EntryStatus::Paid {
            prop_assert_eq!(result, Err(DraftError::SettlementDateRequired));
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }
}
