use derive_more::{Display, FromStr};
use rust_decimal::Decimal as WrappedDecimal;
use serde::{Deserialize, Serialize};

///
/// Decimal
///
/// Fixed-point numeric value. Canonicalization (rounding to a field's
/// declared decimal places, banker's rounding) happens during validation
/// and is observable: the canonical value is what serializes.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    /// Construct a decimal from mantissa and scale, e.g. `new(1250, 2)` is `12.50`.
    #[must_use]
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    /// Round to `dp` decimal places (midpoint rounds to even).
    #[must_use]
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(self.0.round_dp(dp))
    }

    /// Returns the number of fractional decimal places.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.0.scale()
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Canonical fixed-point rendering with exactly `places` fractional
    /// digits. Rounds first, then zero-pads.
    #[must_use]
    pub fn to_fixed(&self, places: u32) -> String {
        let mut out = self.round_dp(places).0.to_string();

        if places > 0 {
            let frac = match out.find('.') {
                Some(dot) => out.len() - dot - 1,
                None => {
                    out.push('.');
                    0
                }
            };
            for _ in frac..places as usize {
                out.push('0');
            }
        }

        out
    }

    /// Number of significant digits in the canonical `places` rendering,
    /// sign and separator excluded.
    #[must_use]
    pub fn digit_count(&self, places: u32) -> usize {
        self.to_fixed(places)
            .chars()
            .filter(char::is_ascii_digit)
            .count()
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(d: WrappedDecimal) -> Self {
        Self(d)
    }
}

macro_rules! impl_decimal_from_int {
    ( $( $type:ty ),* ) => {
        $(
            impl From<$type> for Decimal {
                fn from(n: $type) -> Self {
                    Self(WrappedDecimal::from(n))
                }
            }
        )*
    };
}

impl_decimal_from_int!(u8, u16, u32, i8, i16, i32, i64);

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<WrappedDecimal>()
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///
