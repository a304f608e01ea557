use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker symbol.
///
/// Exchange-suffixed codes are first-class (`9984.T`, `BRK-B`), so a leading
/// digit is legal; the rest of the charset is uppercase alphanumerics plus
/// `.` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
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

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TickerSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}

/// Split a free-text ticker list (comma and/or whitespace separated) into
/// parsed symbols, dropping empty fragments and duplicates while keeping
/// first-seen order.
pub fn parse_ticker_list(input: &str) -> Result<Vec<TickerSymbol>, ValidationError> {
    let mut symbols = Vec::new();
    for fragment in input.split(|ch: char| ch == ',' || ch.is_whitespace()) {
        if fragment.trim().is_empty() {
            continue;
        }
        let symbol = TickerSymbol::parse(fragment)?;
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = TickerSymbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn accepts_exchange_suffixed_code() {
        let parsed = TickerSymbol::parse("9984.t").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "9984.T");
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = TickerSymbol::parse("AAPL$").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { .. }));
    }

    #[test]
    fn rejects_empty_symbol() {
        let err = TickerSymbol::parse("   ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptySymbol));
    }

    #[test]
    fn splits_list_on_commas_and_whitespace() {
        let symbols = parse_ticker_list("9984.T, 7203.T\n aapl").expect("list should parse");
        let rendered = symbols.iter().map(TickerSymbol::as_str).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["9984.T", "7203.T", "AAPL"]);
    }

    #[test]
    fn list_drops_duplicates_preserving_first_seen_order() {
        let symbols = parse_ticker_list("AAPL, msft, aapl").expect("list should parse");
        let rendered = symbols.iter().map(TickerSymbol::as_str).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn empty_list_yields_no_symbols() {
        let symbols = parse_ticker_list(" , ,, ").expect("list should parse");
        assert!(symbols.is_empty());
    }
}
