use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Display scale applied to large currency figures such as equity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitScale {
    #[serde(rename = "raw")]
    Raw,
    #[serde(rename = "millions")]
    Millions,
    #[serde(rename = "hundred-millions")]
    HundredMillions,
    #[serde(rename = "trillions")]
    Trillions,
}

impl UnitScale {
    pub const ALL: [Self; 4] = [
        Self::Raw,
        Self::Millions,
        Self::HundredMillions,
        Self::Trillions,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Millions => "millions",
            Self::HundredMillions => "hundred-millions",
            Self::Trillions => "trillions",
        }
    }

    pub const fn divisor(self) -> f64 {
        match self {
            Self::Raw => 1.0,
            Self::Millions => 1e6,
            Self::HundredMillions => 1e8,
            Self::Trillions => 1e12,
        }
    }

    /// Scale a raw currency value into this unit.
    ///
    /// Millions render as whole numbers; hundred-millions and trillions keep
    /// two decimals; raw values pass through untouched.
    pub fn apply(self, value: f64) -> f64 {
        let scaled = value / self.divisor();
        match self {
            Self::Raw => scaled,
            Self::Millions => scaled.round(),
            Self::HundredMillions | Self::Trillions => (scaled * 100.0).round() / 100.0,
        }
    }
}

impl Display for UnitScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitScale {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "millions" => Ok(Self::Millions),
            "hundred-millions" => Ok(Self::HundredMillions),
            "trillions" => Ok(Self::Trillions),
            other => Err(ValidationError::InvalidUnitScale {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unit_scale() {
        let unit = UnitScale::from_str("hundred-millions").expect("must parse");
        assert_eq!(unit, UnitScale::HundredMillions);
    }

    #[test]
    fn rejects_invalid_unit_scale() {
        let err = UnitScale::from_str("billions").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidUnitScale { .. }));
    }

    #[test]
    fn millions_round_to_whole_numbers() {
        assert_eq!(UnitScale::Millions.apply(5_000_000_000.0), 5000.0);
        assert_eq!(UnitScale::Millions.apply(5_000_400_000.0), 5000.0);
    }

    #[test]
    fn hundred_millions_keep_two_decimals() {
        assert_eq!(UnitScale::HundredMillions.apply(5_000_000_000.0), 50.0);
        assert_eq!(UnitScale::HundredMillions.apply(5_128_000_000.0), 51.28);
    }

    #[test]
    fn raw_passes_through() {
        assert_eq!(UnitScale::Raw.apply(123.456), 123.456);
    }
}
