use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Exchange group whose members carry a fixed provider-side suffix.
///
/// Yahoo Finance addresses NSE-listed tickers as `RELIANCE.NS`; catalogs
/// usually list them bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeGroup {
    /// US exchanges, no suffix.
    Us,
    /// National Stock Exchange of India, `.NS` suffix.
    Nse,
}

impl ExchangeGroup {
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Us => None,
            Self::Nse => Some(".NS"),
        }
    }
}

/// Normalized market symbol/ticker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '&';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Apply the exchange group's suffix if the symbol does not already
    /// carry it. Idempotent: a suffixed symbol passes through unchanged.
    pub fn for_exchange(self, group: ExchangeGroup) -> Self {
        match group.suffix() {
            Some(suffix) if !self.0.ends_with(suffix) => Self(format!("{}{suffix}", self.0)),
            _ => self,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" infy ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "INFY");
    }

    #[test]
    fn rejects_invalid_start() {
        let err = Symbol::parse("1AAPL").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidStart { .. }));
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("AAPL$").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { .. }));
    }

    #[test]
    fn nse_suffix_is_applied_once() {
        let symbol = Symbol::parse("RELIANCE").expect("valid symbol");
        let suffixed = symbol.for_exchange(ExchangeGroup::Nse);
        assert_eq!(suffixed.as_str(), "RELIANCE.NS");
    }

    #[test]
    fn nse_suffix_is_idempotent() {
        let once = Symbol::parse("TCS")
            .expect("valid symbol")
            .for_exchange(ExchangeGroup::Nse);
        let twice = once.clone().for_exchange(ExchangeGroup::Nse);
        assert_eq!(once, twice);
    }

    #[test]
    fn us_group_leaves_symbol_unchanged() {
        let symbol = Symbol::parse("MSFT").expect("valid symbol");
        assert_eq!(symbol.clone().for_exchange(ExchangeGroup::Us), symbol);
    }
}
