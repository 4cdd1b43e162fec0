//! Report generation service.

use crate::ledger::{
    Classifier, EffectiveStatus, LedgerEntry, LedgerTotals, PeriodSelector, UNDATED_KEY,
    category_breakdown, effective_date, filter_by_period, group_by_period, sort_by_date,
};

use super::error::ReportError;
use super::types::{
    DataQuality, FinancialStatement, OverdueItem, PeriodSection, StatementLine, StatementTotals,
};

/// Service for generating financial statements.
pub struct ReportService;

impl ReportService {
    /// Builds the statement for the selected period.
    ///
    /// Statuses are derived once, against the classifier's reference day.
    pub fn build_statement(
        lodge_name: &str,
        entries: &[LedgerEntry],
        period: PeriodSelector,
        classifier: &Classifier,
    ) -> Result<FinancialStatement, ReportError> {
        if period.month > 12 {
            return Err(ReportError::InvalidMonth(period.month));
        }

        let selected = filter_by_period(entries, period.month, period.year);
        let totals = LedgerTotals::from_entries(&selected, classifier);
        let data_quality = DataQuality {
            overflowed_amounts: totals.overflowed,
            ..Self::data_quality(&selected)
        };

        Ok(FinancialStatement {
            report_type: "financial_statement".to_string(),
            lodge_name: lodge_name.to_string(),
            period,
            period_label: Self::period_label(period),
            as_of: classifier.reference_date(),
            totals: totals.into(),
            sections: Self::sections(&selected, classifier),
            overdue: Self::overdue(&selected, classifier),
            categories: category_breakdown(&selected, classifier),
            data_quality,
        })
    }

    /// Human-readable label of a selector.
    #[must_use]
    pub fn period_label(period: PeriodSelector) -> String {
        match (period.month, period.year) {
            (0, 0) => "Todos os períodos".to_string(),
            (0, year) => format!("{year:04}"),
            (month, 0) => format!("Mês {month:02}"),
            (month, year) => format!("{month:02}/{year:04}"),
        }
    }

    /// Counts the rows whose amount or date fell back to a default.
    ///
    /// Overflow is only known once the entries are summed, so
    /// `overflowed_amounts` stays zero here.
    #[must_use]
    pub fn data_quality(entries: &[LedgerEntry]) -> DataQuality {
        entries.iter().fold(DataQuality::default(), |mut quality, entry| {
            if entry.amount.is_malformed() {
                quality.unreadable_amounts += 1;
            } else if entry.amount.value().is_none() {
                quality.missing_amounts += 1;
            }
            if entry.due_date.is_malformed() || entry.settlement_date.is_malformed() {
                quality.unreadable_dates += 1;
            }
            if effective_date(entry).is_none() {
                quality.undated += 1;
            }
            quality
        })
    }

    fn sections(entries: &[LedgerEntry], classifier: &Classifier) -> Vec<PeriodSection> {
        let groups = group_by_period(entries);
        let mut keys = groups.chronological_keys();
        // Chronological puts the undated bucket last; keep it there after reversing.
        let undated = keys.iter().position(|key| *key == UNDATED_KEY).map(|i| keys.remove(i));
        keys.reverse();
        keys.extend(undated);

        keys.into_iter()
            .filter_map(|key| {
                let bucket = groups.get(key)?;
                let lines = sort_by_date(bucket)
                    .iter()
                    .map(|entry| Self::line(entry, classifier))
                    .collect();
                Some(PeriodSection {
                    key: key.to_string(),
                    totals: LedgerTotals::from_entries(bucket, classifier).into(),
                    lines,
                })
            })
            .collect()
    }

    fn line(entry: &LedgerEntry, classifier: &Classifier) -> StatementLine {
        StatementLine {
            id: entry.id,
            date: effective_date(entry),
            entry_type: entry.entry_type,
            status: classifier.classify(entry),
            amount: entry.amount(),
            category_id: entry.category_id,
            description: entry.description.clone().unwrap_or_default(),
        }
    }

    fn overdue(entries: &[LedgerEntry], classifier: &Classifier) -> Vec<OverdueItem> {
        let mut items: Vec<OverdueItem> = entries
            .iter()
            .filter(|entry| classifier.classify(entry) == EffectiveStatus::Overdue)
            .filter_map(|entry| {
                Some(OverdueItem {
                    id: entry.id,
                    entry_type: entry.entry_type,
                    due_date: entry.due_date()?,
                    days_overdue: classifier.days_overdue(entry)?,
                    amount: entry.amount(),
                    description: entry.description.clone().unwrap_or_default(),
                })
            })
            .collect();
        items.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
        items
    }
}
