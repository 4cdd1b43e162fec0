//! Financial statement generation.
//!
//! This module turns a snapshot of ledger entries into a statement:
//! - Totals for the selected period
//! - Per-month sections, most recent first
//! - Overdue list and category breakdown
//! - Counters for rows that needed tolerant fallbacks
//!
//! `TextRenderer` lays the statement out as plain text; the statement itself
//! also serializes to JSON.

pub mod error;
pub mod render;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use render::{TextRenderer, format_date};
pub use service::ReportService;
pub use types::*;
