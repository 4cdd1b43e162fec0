//! Business rule validation for draft entries.

use rust_decimal::Decimal;

use super::draft::LedgerDraft;
use super::entry::{EntryStatus, OriginType};
use super::error::DraftError;

/// Checks a draft against the required-field rules.
///
/// Rules run in a fixed order and only the first failure is reported; the
/// form re-validates after each correction.
///
/// # Errors
///
/// Returns the first rule the draft breaks.
pub fn validate_draft(draft: &LedgerDraft) -> Result<(), DraftError> {
    // Destructured so a new draft field has to be placed in the order below.
    let LedgerDraft {
        entry_type,
        category_id,
        description,
        amount,
        created_on,
        due_date,
        status,
        settlement_date,
        origin_type,
        origin_person_id,
    } = draft;

    if entry_type.is_none() {
        return Err(DraftError::TypeRequired);
    }
    if category_id.is_none() {
        return Err(DraftError::CategoryRequired);
    }
    if description.trim().is_empty() {
        return Err(DraftError::DescriptionRequired);
    }
    if !amount.is_some_and(|value| value > Decimal::ZERO) {
        return Err(DraftError::AmountNotPositive);
    }
    if created_on.is_none() {
        return Err(DraftError::CreationDateRequired);
    }
    if due_date.is_none() {
        return Err(DraftError::DueDateRequired);
    }
    if *status == EntryStatus::Paid && settlement_date.is_none() {
        return Err(DraftError::SettlementDateRequired);
    }
    match origin_type {
        None => Err(DraftError::OriginTypeRequired),
        Some(OriginType::Person) if origin_person_id.is_none() => {
            Err(DraftError::OriginPersonRequired)
        }
        Some(_) => Ok(()),
    }
}
