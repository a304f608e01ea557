use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DerivedRow, RawSnapshot, TickerSymbol, UnitScale, ValidationError};

/// Haircut applied to operating margin for the ROIC approximation
/// (a rough after-tax proxy, not an invested-capital calculation).
const ROIC_MARGIN_HAIRCUT: f64 = 0.7;

/// How absent numeric provider fields feed the ratio math.
///
/// One consistent choice replaces the upstream habit of mixing `or 0`
/// defaults with bare missing-key lookups. PER and PBR are null-on-absent
/// under both policies: zero is not a meaningful value for either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingFieldPolicy {
    /// Absent fields count as 0.0 before arithmetic (upstream-compatible).
    #[default]
    ZeroDefault,
    /// Absent fields yield a null ratio instead of a zero one.
    NullPropagate,
}

impl MissingFieldPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZeroDefault => "zero-default",
            Self::NullPropagate => "null-propagate",
        }
    }
}

impl Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingFieldPolicy {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zero-default" => Ok(Self::ZeroDefault),
            "null-propagate" => Ok(Self::NullPropagate),
            other => Err(ValidationError::InvalidMissingPolicy {
                value: other.to_owned(),
            }),
        }
    }
}

/// Pure derivation of a [`DerivedRow`] from one provider snapshot.
///
/// No I/O, no error conditions: missing fields degrade per the configured
/// policy rather than failing the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioCalculator {
    unit_scale: UnitScale,
    missing_policy: MissingFieldPolicy,
}

impl RatioCalculator {
    pub const fn new(unit_scale: UnitScale, missing_policy: MissingFieldPolicy) -> Self {
        Self {
            unit_scale,
            missing_policy,
        }
    }

    pub const fn unit_scale(&self) -> UnitScale {
        self.unit_scale
    }

    pub fn derive(&self, symbol: &TickerSymbol, snapshot: &RawSnapshot) -> DerivedRow {
        DerivedRow {
            symbol: symbol.clone(),
            name: snapshot.display_name(symbol),
            per: snapshot.forward_pe.or(snapshot.trailing_pe),
            pbr: snapshot.price_to_book,
            roe_pct: self.percentage(snapshot.return_on_equity),
            roa_pct: self.percentage(snapshot.return_on_assets),
            roic_pct: self
                .defaulted(snapshot.operating_margins)
                .map(|margin| margin * ROIC_MARGIN_HAIRCUT * 100.0),
            equity: self
                .defaulted(snapshot.total_stockholder_equity)
                .map(|equity| self.unit_scale.apply(equity)),
            equity_unit: self.unit_scale,
        }
    }

    fn percentage(&self, value: Option<f64>) -> Option<f64> {
        self.defaulted(value).map(|v| v * 100.0)
    }

    fn defaulted(&self, value: Option<f64>) -> Option<f64> {
        match self.missing_policy {
            MissingFieldPolicy::ZeroDefault => Some(value.unwrap_or(0.0)),
            MissingFieldPolicy::NullPropagate => value,
        }
    }
}
