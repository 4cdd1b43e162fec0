//! Plain-text statement layout.
//!
//! A thin formatting pass: every figure comes from the statement, nothing is
//! recomputed here.

use std::fmt::Write;

use chrono::NaiveDate;
use lodge_shared::types::MoneyFormat;
use rust_decimal::Decimal;

use super::types::{DataQuality, FinancialStatement, PeriodSection, StatementTotals};

const RULE_WIDTH: usize = 78;

/// Renders statements as monospaced text.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    money: MoneyFormat,
}

impl TextRenderer {
    /// Creates a renderer using the given money format.
    #[must_use]
    pub fn new(money: MoneyFormat) -> Self {
        Self { money }
    }

    /// Renders the whole statement.
    #[must_use]
    pub fn render(&self, statement: &FinancialStatement) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_statement(&mut out, statement);
        out
    }

    fn write_statement(&self, out: &mut String, statement: &FinancialStatement) -> std::fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "{rule}")?;
        writeln!(out, " {}", statement.lodge_name)?;
        writeln!(out, " Demonstrativo financeiro: {}", statement.period_label)?;
        writeln!(out, " Posição em {}", format_date(statement.as_of))?;
        writeln!(out, "{rule}")?;

        writeln!(out)?;
        writeln!(out, "RESUMO")?;
        self.write_summary(out, &statement.totals)?;

        for section in &statement.sections {
            writeln!(out)?;
            self.write_section(out, section)?;
        }

        if !statement.overdue.is_empty() {
            writeln!(out)?;
            writeln!(out, "EM ATRASO")?;
            for item in &statement.overdue {
                writeln!(
                    out,
                    "  {}  {:<8} {:>4} dias  {:>16}  {}",
                    format_date(item.due_date),
                    item.entry_type.label(),
                    item.days_overdue,
                    self.money.format(item.amount),
                    item.description,
                )?;
            }
        }

        if !statement.categories.is_empty() {
            writeln!(out)?;
            writeln!(out, "POR CATEGORIA")?;
            for row in &statement.categories {
                let category = row
                    .category_id
                    .map_or_else(|| "sem categoria".to_string(), |id| format!("categoria {id}"));
                writeln!(
                    out,
                    "  {:<18} {:<8} pago {:>16}  aberto {:>16}  ({})",
                    category,
                    row.entry_type.label(),
                    self.money.format(row.paid),
                    self.money.format(row.pending),
                    row.count,
                )?;
            }
        }

        write_warnings(out, &statement.data_quality)
    }

    fn write_summary(&self, out: &mut String, totals: &StatementTotals) -> std::fmt::Result {
        let t = &totals.totals;
        self.summary_row(out, "Receitas pagas", t.paid_revenue)?;
        self.summary_row(out, "Despesas pagas", t.paid_expense)?;
        self.summary_row(out, "Saldo", totals.balance)?;
        self.summary_row(out, "Receitas a receber", t.pending_revenue)?;
        self.summary_row(out, "  das quais vencidas", t.overdue_revenue)?;
        self.summary_row(out, "Despesas a pagar", t.pending_expense)?;
        self.summary_row(out, "  das quais vencidas", t.overdue_expense)?;
        self.summary_row(out, "Saldo projetado", totals.projected_balance)
    }

    fn summary_row(&self, out: &mut String, label: &str, amount: Decimal) -> std::fmt::Result {
        writeln!(out, "  {label:.<36} {:>18}", self.money.format(amount))
    }

    fn write_section(&self, out: &mut String, section: &PeriodSection) -> std::fmt::Result {
        writeln!(out, "LANÇAMENTOS {}", section.key)?;
        writeln!(
            out,
            "  {:<10}  {:<8} {:<10} {:>16}  Descrição",
            "Data", "Tipo", "Situação", "Valor"
        )?;
        for line in &section.lines {
            let date = line.date.map_or_else(|| "-".to_string(), format_date);
            writeln!(
                out,
                "  {:<10}  {:<8} {:<10} {:>16}  {}",
                date,
                line.entry_type.label(),
                line.status.label(),
                self.money.format(line.amount),
                line.description,
            )?;
        }
        writeln!(
            out,
            "  Saldo do período: {}",
            self.money.format(section.totals.balance)
        )
    }
}

fn write_warnings(out: &mut String, quality: &DataQuality) -> std::fmt::Result {
    if quality.is_clean() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "AVISOS")?;
    if quality.unreadable_amounts > 0 {
        writeln!(
            out,
            "  {} lançamento(s) com valor ilegível contado(s) como zero",
            quality.unreadable_amounts
        )?;
    }
    if quality.missing_amounts > 0 {
        writeln!(
            out,
            "  {} lançamento(s) sem valor contado(s) como zero",
            quality.missing_amounts
        )?;
    }
    if quality.unreadable_dates > 0 {
        writeln!(
            out,
            "  {} lançamento(s) com data ilegível",
            quality.unreadable_dates
        )?;
    }
    if quality.undated > 0 {
        writeln!(out, "  {} lançamento(s) sem data", quality.undated)?;
    }
    if quality.overflowed_amounts > 0 {
        writeln!(
            out,
            "  {} valor(es) fora do limite contado(s) como zero",
            quality.overflowed_amounts
        )?;
    }
    if quality.rejected_rows > 0 {
        writeln!(
            out,
            "  {} linha(s) da exportação ignorada(s) por não serem lançamentos legíveis",
            quality.rejected_rows
        )?;
    }
    Ok(())
}

/// `DD/MM/YYYY`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
