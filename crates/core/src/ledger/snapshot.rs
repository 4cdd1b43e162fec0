//! Reading a ledger export row by row.
//!
//! One unreadable row must not hide the rest of the ledger, so rows are
//! decoded one at a time and the failures are kept next to the entries.

use serde_json::Value;

use super::entry::LedgerEntry;

/// An export row that could not be read as an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// Zero-based position in the export.
    pub position: usize,
    /// Why the row was rejected.
    pub reason: String,
}

/// Entries read from an export, in export order, plus the skipped rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Rows that read as entries.
    pub entries: Vec<LedgerEntry>,
    /// Rows that did not.
    pub rejected: Vec<RejectedRow>,
}

impl Snapshot {
    /// Decodes each row independently.
    #[must_use]
    pub fn from_rows(rows: Vec<Value>) -> Self {
        let mut snapshot = Self::default();
        for (position, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<LedgerEntry>(row) {
                Ok(entry) => snapshot.entries.push(entry),
                Err(err) => snapshot.rejected.push(RejectedRow {
                    position,
                    reason: err.to_string(),
                }),
            }
        }
        snapshot
    }

    /// Parses an export: a JSON array of entry rows.
    ///
    /// # Errors
    ///
    /// Fails only when the text is not a JSON array; bad rows end up in
    /// `rejected`.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let rows: Vec<Value> = serde_json::from_str(raw)?;
        Ok(Self::from_rows(rows))
    }
}
