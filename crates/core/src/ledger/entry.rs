//! Ledger entry domain types.
//!
//! `LedgerEntry` mirrors a row of the hosted `lancamentos` table as it comes
//! back from a fetch. Historical rows are not uniformly populated, so the
//! amount and date columns are kept in their stored form and read through
//! tolerant accessors.

use std::str::FromStr;

use chrono::NaiveDate;
use lodge_shared::types::{CategoryId, EntryId, PersonId, parse_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DefaultOnError, NoneAsEmptyString, PickFirst, serde_as};

use super::error::UnknownValue;

/// Lower-cased, trimmed form used to match stored and typed labels.
fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Direction of a ledger entry.
///
/// Reads `revenue`/`receita` and `expense`/`despesa` in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Money coming in (receita).
    Revenue,
    /// Money going out (despesa).
    Expense,
}

impl EntryType {
    /// Portuguese label used in printed reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Receita",
            Self::Expense => "Despesa",
        }
    }
}

impl FromStr for EntryType {
    type Err = UnknownValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match fold(raw).as_str() {
            "revenue" | "receita" => Ok(Self::Revenue),
            "expense" | "despesa" => Ok(Self::Expense),
            _ => Err(UnknownValue {
                kind: "entry type",
                value: raw.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for EntryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Stored status of a ledger entry.
///
/// Only paid and canceled have to be recognized; anything else (blank,
/// null, an unknown label) is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Not settled yet.
    #[default]
    Pending,
    /// Settled.
    Paid,
    /// Canceled; excluded from every total.
    Canceled,
}

impl EntryStatus {
    /// Reads a stored or typed status label, in any case.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        match fold(raw).as_str() {
            "paid" | "pago" | "paga" => Self::Paid,
            "canceled" | "cancelled" | "cancelado" | "cancelada" => Self::Canceled,
            _ => Self::Pending,
        }
    }
}

impl<'de> Deserialize<'de> for EntryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Pending, Self::from_stored))
    }
}

/// Who an entry originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OriginType {
    /// A lodge member (irmão). Requires `origin_person_id`.
    Person,
    /// The lodge itself.
    Lodge,
    /// An external supplier.
    Supplier,
    /// Anything else.
    Other,
}

impl FromStr for OriginType {
    type Err = UnknownValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match fold(raw).as_str() {
            "person" | "irmão" | "irmao" => Ok(Self::Person),
            "lodge" | "loja" => Ok(Self::Lodge),
            "supplier" | "fornecedor" => Ok(Self::Supplier),
            "other" | "outro" => Ok(Self::Other),
            _ => Err(UnknownValue {
                kind: "origin type",
                value: raw.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for OriginType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An amount column as stored.
///
/// Older clients wrote numbers, numeric strings in either decimal notation, or
/// nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAmount {
    /// A number (or a string the decimal parser accepted directly).
    Number(Decimal),
    /// Free text that still has to be parsed.
    Text(String),
    /// Null or absent.
    #[default]
    Missing,
    /// Any other JSON shape.
    Other(serde_json::Value),
}

impl StoredAmount {
    /// Returns the amount if it can be read as a number.
    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Number(amount) => Some(*amount),
            Self::Text(raw) => parse_amount(raw),
            Self::Missing | Self::Other(_) => None,
        }
    }

    /// Returns the amount, or zero when it cannot be read.
    #[must_use]
    pub fn or_zero(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    /// Returns true when something was stored but it is not a number.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::Missing) && self.value().is_none()
    }
}

impl From<Decimal> for StoredAmount {
    fn from(amount: Decimal) -> Self {
        Self::Number(amount)
    }
}

/// A date column as stored.
///
/// Accepts `YYYY-MM-DD`, ISO timestamps (the date part is used) and
/// `DD/MM/YYYY`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredDate(Option<String>);

impl StoredDate {
    /// An absent date.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Wraps raw stored text.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(Some(raw.into()))
    }

    /// Returns the stored text, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns the calendar date, or `None` when absent or unreadable.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.0.as_deref()?.trim();
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(head, "%d/%m/%Y"))
            .ok()
    }

    /// Returns true when text was stored but it is not a date.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.0.as_deref().is_some_and(|raw| !raw.trim().is_empty()) && self.date().is_none()
    }
}

impl From<NaiveDate> for StoredDate {
    fn from(date: NaiveDate) -> Self {
        Self(Some(date.format("%Y-%m-%d").to_string()))
    }
}

impl From<Option<NaiveDate>> for StoredDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or_else(Self::none, Self::from)
    }
}

/// A financial record (lançamento) as fetched from the store.
///
/// Only `type` has to be readable. Ids may come as numbers or numeric
/// strings; an unreadable id, status or origin falls back to its default
/// instead of rejecting the row.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Store identifier.
    #[serde_as(deserialize_as = "DefaultOnError<PickFirst<(_, NoneAsEmptyString)>>")]
    #[serde(default)]
    pub id: Option<EntryId>,
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Stored status.
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub status: EntryStatus,
    /// Amount as stored.
    #[serde(default)]
    pub amount: StoredAmount,
    /// Due date (vencimento).
    #[serde(default)]
    pub due_date: StoredDate,
    /// Settlement date (pagamento); only meaningful when paid.
    #[serde(default)]
    pub settlement_date: StoredDate,
    /// Date the entry was recorded.
    #[serde(default)]
    pub created_on: StoredDate,
    /// Financial category.
    #[serde_as(deserialize_as = "DefaultOnError<PickFirst<(_, NoneAsEmptyString)>>")]
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Origin kind.
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub origin_type: Option<OriginType>,
    /// Member the entry originates from, when `origin_type` is `Person`.
    #[serde_as(deserialize_as = "DefaultOnError<PickFirst<(_, NoneAsEmptyString)>>")]
    #[serde(default)]
    pub origin_person_id: Option<PersonId>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl LedgerEntry {
    /// Creates an entry with the fields every report needs.
    #[must_use]
    pub fn new(
        entry_type: EntryType,
        status: EntryStatus,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            entry_type,
            status,
            amount: StoredAmount::Number(amount),
            due_date: due_date.into(),
            settlement_date: StoredDate::none(),
            created_on: StoredDate::none(),
            category_id: None,
            origin_type: None,
            origin_person_id: None,
            description: None,
        }
    }

    /// Sets the settlement date.
    #[must_use]
    pub fn with_settlement_date(mut self, date: NaiveDate) -> Self {
        self.settlement_date = date.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the store identifier.
    #[must_use]
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Amount with the tolerant-zero policy applied.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount.or_zero()
    }

    /// Parsed due date, if readable.
    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date.date()
    }

    /// Parsed settlement date, if readable.
    #[must_use]
    pub fn settlement_date(&self) -> Option<NaiveDate> {
        self.settlement_date.date()
    }
}
