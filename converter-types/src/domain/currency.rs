//! Currency codes and the store key layout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prepended to every stored rate key.
pub const DEFAULT_KEY_PREFIX: &str = "converter";

/// A currency code, normalized to uppercase.
///
/// Codes are case-insensitive at the API boundary: `"usd"`, `"USD"` and
/// `"UsD"` all become the same `CurrencyCode`. No other validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the store key for a currency: `<prefix>:<CODE>`.
pub fn rate_key(prefix: &str, code: &CurrencyCode) -> String {
    format!("{}:{}", prefix, code)
}
