//! Ledger errors.
//!
//! Draft messages are the ones shown to the treasurer in the ledger form.

use thiserror::Error;

/// The first rule a draft entry breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    /// No entry type chosen.
    #[error("Tipo é obrigatório")]
    TypeRequired,

    /// No category chosen.
    #[error("Categoria é obrigatória")]
    CategoryRequired,

    /// Description empty after trimming.
    #[error("Descrição é obrigatória")]
    DescriptionRequired,

    /// Amount missing, zero or negative.
    #[error("Valor deve ser maior que zero")]
    AmountNotPositive,

    /// No creation date.
    #[error("Data de lançamento é obrigatória")]
    CreationDateRequired,

    /// No due date.
    #[error("Data de vencimento é obrigatória")]
    DueDateRequired,

    /// Paid without a settlement date.
    #[error("Data de pagamento é obrigatória para lançamentos pagos")]
    SettlementDateRequired,

    /// No origin type chosen.
    #[error("Origem é obrigatória")]
    OriginTypeRequired,

    /// Person origin without a member.
    #[error("Irmão de origem é obrigatório")]
    OriginPersonRequired,
}

impl DraftError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TypeRequired => "TYPE_REQUIRED",
            Self::CategoryRequired => "CATEGORY_REQUIRED",
            Self::DescriptionRequired => "DESCRIPTION_REQUIRED",
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::CreationDateRequired => "CREATION_DATE_REQUIRED",
            Self::DueDateRequired => "DUE_DATE_REQUIRED",
            Self::SettlementDateRequired => "SETTLEMENT_DATE_REQUIRED",
            Self::OriginTypeRequired => "ORIGIN_TYPE_REQUIRED",
            Self::OriginPersonRequired => "ORIGIN_PERSON_REQUIRED",
        }
    }

    /// Returns the form field the error points at.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::TypeRequired => "type",
            Self::CategoryRequired => "categoryId",
            Self::DescriptionRequired => "description",
            Self::AmountNotPositive => "amount",
            Self::CreationDateRequired => "createdOn",
            Self::DueDateRequired => "dueDate",
            Self::SettlementDateRequired => "settlementDate",
            Self::OriginTypeRequired => "originType",
            Self::OriginPersonRequired => "originPersonId",
        }
    }
}


/// A type or origin value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownValue {
    /// What was being read (`"entry type"`, `"origin type"`).
    pub kind: &'static str,
    /// The text as given.
    pub value: String,
}
