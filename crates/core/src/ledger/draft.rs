//! Draft entries submitted from the ledger form.

use chrono::NaiveDate;
use lodge_shared::types::{CategoryId, PersonId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, NoneAsEmptyString, PickFirst, serde_as};

use super::entry::{EntryStatus, EntryType, LedgerEntry, OriginType, StoredAmount, StoredDate};
use super::error::DraftError;
use super::validation::validate_draft;

/// A ledger entry as typed into the form, before validation.
///
/// Every field the form can leave blank is optional here; `validate_draft`
/// decides which blanks are acceptable. Form submissions send blanks as
/// `""` and numbers as text, so both read as on the stored row.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerDraft {
    /// Revenue or expense.
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    /// Financial category.
    #[serde_as(deserialize_as = "PickFirst<(_, NoneAsEmptyString)>")]
    pub category_id: Option<CategoryId>,
    /// Free-text description.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub description: String,
    /// Amount; must be positive.
    #[serde_as(deserialize_as = "PickFirst<(_, NoneAsEmptyString)>")]
    pub amount: Option<Decimal>,
    /// Date the entry is recorded.
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    pub created_on: Option<NaiveDate>,
    /// Due date.
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    pub due_date: Option<NaiveDate>,
    /// Stored status; blank reads as pending.
    pub status: EntryStatus,
    /// Settlement date; required when paid.
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    pub settlement_date: Option<NaiveDate>,
    /// Origin kind.
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    pub origin_type: Option<OriginType>,
    /// Originating member; required when `origin_type` is `Person`.
    #[serde_as(deserialize_as = "PickFirst<(_, NoneAsEmptyString)>")]
    pub origin_person_id: Option<PersonId>,
}

impl LedgerDraft {
    /// Validates the draft and converts it into the record written to the
    /// store.
    ///
    /// # Errors
    ///
    /// Returns the first rule the draft breaks, see [`validate_draft`].
    pub fn into_entry(self) -> Result<LedgerEntry, DraftError> {
        validate_draft(&self)?;
        let entry_type = self.entry_type.ok_or(DraftError::TypeRequired)?;

        Ok(LedgerEntry {
            id: None,
            entry_type,
            status: self.status,
            amount: self.amount.map_or(StoredAmount::Missing, StoredAmount::Number),
            due_date: StoredDate::from(self.due_date),
            settlement_date: StoredDate::from(self.settlement_date),
            created_on: StoredDate::from(self.created_on),
            category_id: self.category_id,
            origin_type: self.origin_type,
            origin_person_id: self.origin_person_id,
            description: Some(self.description.trim().to_string()),
        })
    }
}

impl From<&LedgerEntry> for LedgerDraft {
    /// Loads a stored entry back into the form for a full-record update.
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            entry_type: Some(entry.entry_type),
            category_id: entry.category_id,
            description: entry.description.clone().unwrap_or_default(),
            amount: entry.amount.value(),
            created_on: entry.created_on.date(),
            due_date: entry.due_date(),
            status: entry.status,
            settlement_date: entry.settlement_date(),
            origin_type: entry.origin_type,
            origin_person_id: entry.origin_person_id,
        }
    }
}
