use serde::{Deserialize, Serialize};

use crate::TickerSymbol;

/// Point-in-time bag of provider-supplied fields for one ticker.
///
/// Every field is optional; the provider may omit any of them. How an absent
/// numeric field feeds the ratio math is decided by the calculator's
/// missing-field policy, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub current_price: Option<f64>,
    pub forward_pe: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub operating_margins: Option<f64>,
    pub total_stockholder_equity: Option<f64>,
    pub total_debt: Option<f64>,
    pub total_assets: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

impl RawSnapshot {
    /// Resolve the display name: short name, else long name, else the ticker
    /// symbol itself. Blank provider strings count as absent.
    pub fn display_name(&self, symbol: &TickerSymbol) -> String {
        non_blank(self.short_name.as_deref())
            .or_else(|| non_blank(self.long_name.as_deref()))
            .map(str::to_owned)
            .unwrap_or_else(|| symbol.as_str().to_owned())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}
