//! CSV ticker catalog loading.
//!
//! A catalog is a CSV file with a required `Symbol` column and an optional
//! `Exchange` column (`us` or `nse`). Catalog problems are fatal run
//! configuration errors, surfaced before any fetch begins.

use std::path::Path;

use thiserror::Error;

use liquiscan_core::{ExchangeGroup, Symbol, ValidationError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("catalog must contain a 'Symbol' column")]
    MissingSymbolColumn,

    #[error("catalog row {row}: unknown exchange '{value}', expected 'us' or 'nse'")]
    UnknownExchange { row: usize, value: String },

    #[error("catalog row {row}: {source}")]
    InvalidSymbol {
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("catalog row {row}: malformed record: {source}")]
    MalformedRow {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("catalog contains no symbols")]
    EmptyCatalog,
}

/// Load and normalize the ticker universe from a catalog file.
///
/// Rows without an `Exchange` value fall back to `default_group`; symbol
/// order is preserved as listed.
pub fn load(path: &Path, default_group: ExchangeGroup) -> Result<Vec<Symbol>, CatalogError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| CatalogError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| CatalogError::Unreadable {
            path: path.display().to_string(),
            source,
        })?
        .clone();

    let symbol_index = headers
        .iter()
        .position(|header| header.trim() == "Symbol")
        .ok_or(CatalogError::MissingSymbolColumn)?;
    let exchange_index = headers.iter().position(|header| header.trim() == "Exchange");

    let mut symbols = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Header is line 1; data rows start at 2.
        let row = index + 2;
        let record = record.map_err(|source| CatalogError::MalformedRow { row, source })?;

        let Some(raw) = record.get(symbol_index) else {
            continue;
        };
        if raw.trim().is_empty() {
            continue;
        }

        let group = match exchange_index.and_then(|i| record.get(i)) {
            Some(value) if !value.trim().is_empty() => parse_exchange(value.trim())
                .ok_or_else(|| CatalogError::UnknownExchange {
                    row,
                    value: value.trim().to_string(),
                })?,
            _ => default_group,
        };

        let symbol = Symbol::parse(raw)
            .map_err(|source| CatalogError::InvalidSymbol { row, source })?
            .for_exchange(group);
        symbols.push(symbol);
    }

    if symbols.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    Ok(symbols)
}

fn parse_exchange(value: &str) -> Option<ExchangeGroup> {
    match value.to_ascii_lowercase().as_str() {
        "us" => Some(ExchangeGroup::Us),
        "nse" => Some(ExchangeGroup::Nse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write catalog");
        file
    }

    #[test]
    fn loads_symbols_in_listed_order() {
        let file = write_catalog("Symbol,Name\nAAPL,Apple\nMSFT,Microsoft\n");
        let symbols = load(file.path(), ExchangeGroup::Us).expect("catalog loads");
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn missing_symbol_column_is_fatal() {
        let file = write_catalog("Ticker\nAAPL\n");
        let err = load(file.path(), ExchangeGroup::Us).expect_err("must fail");
        assert!(matches!(err, CatalogError::MissingSymbolColumn));
    }

    #[test]
    fn exchange_column_overrides_default_group() {
        let file = write_catalog("Symbol,Exchange\nRELIANCE,nse\nAAPL,us\nTCS,\n");
        let symbols = load(file.path(), ExchangeGroup::Nse).expect("catalog loads");
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["RELIANCE.NS", "AAPL", "TCS.NS"]);
    }

    #[test]
    fn already_suffixed_symbols_pass_through() {
        let file = write_catalog("Symbol\nINFY.NS\n");
        let symbols = load(file.path(), ExchangeGroup::Nse).expect("catalog loads");
        assert_eq!(symbols[0].as_str(), "INFY.NS");
    }

    #[test]
    fn unknown_exchange_value_is_fatal() {
        let file = write_catalog("Symbol,Exchange\nAAPL,lse\n");
        let err = load(file.path(), ExchangeGroup::Us).expect_err("must fail");
        assert!(matches!(err, CatalogError::UnknownExchange { row: 2, .. }));
    }

    #[test]
    fn blank_rows_are_skipped_but_empty_catalog_is_fatal() {
        let file = write_catalog("Symbol\n\n");
        let err = load(file.path(), ExchangeGroup::Us).expect_err("must fail");
        assert!(matches!(err, CatalogError::EmptyCatalog));
    }
}
