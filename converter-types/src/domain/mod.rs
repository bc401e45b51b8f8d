//! Domain models for the converter service.

pub mod currency;
pub mod rate;

pub use currency::{CurrencyCode, DEFAULT_KEY_PREFIX, rate_key};
pub use rate::Rate;
