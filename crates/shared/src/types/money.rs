//! Money parsing and formatting with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parses an amount as typed by users or stored by older clients.
///
/// Accepts `1234.56`, `1234,56`, `1.234,56`, `1,234.56` and an optional
/// currency prefix such as `R$`. When both separators appear, the last one is
/// the decimal separator. Returns `None` for anything that is not a number.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return None;
    }

    let last_dot = trimmed.rfind('.');
    let last_comma = trimmed.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => trimmed.replace(',', ""),
        (None, Some(_)) if trimmed.matches(',').count() == 1 => trimmed.replace(',', "."),
        (None, Some(_)) => trimmed.replace(',', ""),
        (Some(_), None) if trimmed.matches('.').count() > 1 => trimmed.replace('.', ""),
        _ => trimmed.to_string(),
    };

    Decimal::from_str(&normalized).ok()
}

/// Formats amounts the way Brazilian reports print them: `R$ 1.234,56`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    symbol: String,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new("R$")
    }
}

impl MoneyFormat {
    /// Creates a formatter using the given currency symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Formats an amount with two decimals, `.` for thousands and `,` for
    /// decimals. Negative amounts carry a leading `-` before the symbol.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.2}", rounded.abs());
        let (integer, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{} {grouped},{cents}", self.symbol)
    }
}
