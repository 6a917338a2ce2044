use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of base units in one coin.
pub const UNITS_PER_COIN: u64 = 100_000_000;
/// Fractional digits of the chain's native unit.
pub const COIN_PRECISION: usize = 8;

/// A non-negative output value held as an exact count of base units.
///
/// The daemon reports values as decimal JSON numbers (`0.5`, `50.0`), so the
/// decoder rounds to the nearest base unit. Sums never touch floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    units: u64,
}

impl Amount {
    pub const ZERO: Amount = Amount { units: 0 };

    pub fn from_units(units: u64) -> Self {
        Self { units }
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    pub fn from_coins(coins: f64) -> Option<Self> {
        if !coins.is_finite() || coins < 0.0 {
            return None;
        }
        let units = (coins * UNITS_PER_COIN as f64).round();
        if units > u64::MAX as f64 {
            return None;
        }
        Some(Self {
            units: units as u64,
        })
    }

    pub fn as_coins(&self) -> f64 {
        self.units as f64 / UNITS_PER_COIN as f64
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self.units / UNITS_PER_COIN;
        let fraction = self.units % UNITS_PER_COIN;
        write!(f, "{whole}.{fraction:0width$}", width = COIN_PRECISION)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            units: self.units.saturating_add(rhs.units),
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_coins())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let coins = f64::deserialize(deserializer)?;
        Self::from_coins(coins)
            .ok_or_else(|| D::Error::custom(format!("invalid output value {coins}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Amount;

    #[test]
    fn displays_exactly_eight_fractional_digits() {
        assert_eq!(Amount::from_units(0).to_string(), "0.00000000");
        assert_eq!(Amount::from_units(1).to_string(), "0.00000001");
        assert_eq!(Amount::from_units(5_000_000_000).to_string(), "50.00000000");
    }

    #[test]
    fn summing_many_small_outputs_stays_exact() {
        // 0.1 + 0.2 style drift must not leak into the display.
        let parts = [0.1, 0.2, 0.93456789];
        let total: Amount = parts
            .iter()
            .map(|coins| Amount::from_coins(*coins).expect("valid amount"))
            .sum();
        assert_eq!(total.to_string(), "1.23456789");
    }

    #[test]
    fn rejects_negative_values_when_decoding() {
        let err = serde_json::from_value::<Amount>(json!(-0.5));
        assert!(err.is_err());

        let ok: Amount = serde_json::from_value(json!(12.5)).expect("positive value decodes");
        assert_eq!(ok.units(), 1_250_000_000);
    }
}
