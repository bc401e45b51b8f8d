//! # Converter Types
//!
//! Domain types and port traits for the currency converter service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, Rate)
//! - `ports/` - Trait definitions that store adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, store and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, DEFAULT_KEY_PREFIX, Rate, rate_key};
pub use dto::*;
pub use error::{AppError, DomainError, FieldErrors, StoreError, ValidationErrors};
pub use ports::RateStore;
