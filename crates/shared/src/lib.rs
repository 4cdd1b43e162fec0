//! Shared types, errors, and configuration for the lodge treasury.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for store records
//! - Money parsing and formatting with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
