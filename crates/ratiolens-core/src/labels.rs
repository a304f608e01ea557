use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CoreError, TickerSymbol, ValidationError};

/// Externally supplied display labels keyed by symbol.
///
/// Replaces compiled-in symbol-to-note maps: callers load a JSON object of
/// `"SYMBOL": "label"` pairs and hand it to the pipeline, which prefers a
/// label over the provider-reported name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelOverrides(BTreeMap<TickerSymbol, String>);

impl LabelOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of symbol/label pairs, normalizing symbols.
    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(input)?;

        let mut labels = BTreeMap::new();
        for (key, label) in raw {
            let symbol = TickerSymbol::parse(&key)?;
            if label.trim().is_empty() {
                return Err(CoreError::Validation(ValidationError::EmptyLabel {
                    symbol: symbol.as_str().to_owned(),
                }));
            }
            labels.insert(symbol, label);
        }

        Ok(Self(labels))
    }

    pub fn insert(&mut self, symbol: TickerSymbol, label: impl Into<String>) {
        self.0.insert(symbol, label.into());
    }

    pub fn label_for(&self, symbol: &TickerSymbol) -> Option<&str> {
        self.0.get(symbol).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol_keys() {
        let labels = LabelOverrides::from_json_str(r#"{"9984.t": "SoftBank G", "AAPL": "Apple"}"#)
            .expect("labels should parse");

        let symbol = TickerSymbol::parse("9984.T").expect("valid symbol");
        assert_eq!(labels.label_for(&symbol), Some("SoftBank G"));
    }

    #[test]
    fn rejects_blank_labels() {
        let err = LabelOverrides::from_json_str(r#"{"AAPL": "  "}"#).expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyLabel { .. })
        ));
    }

    #[test]
    fn rejects_invalid_symbol_keys() {
        let err = LabelOverrides::from_json_str(r#"{"": "blank"}"#).expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptySymbol)
        ));
    }
}
