//! Treasury logic for the lodge administration system.
//!
//! This crate contains pure business logic with ZERO I/O dependencies.
//! Entries arrive already fetched from the hosted store; everything here is a
//! total function over that in-memory snapshot.
//!
//! # Modules
//!
//! - `ledger` - Entry model, status classification, totals, periods, draft validation
//! - `reports` - Financial statement model and plain-text layout

pub mod ledger;
pub mod reports;
