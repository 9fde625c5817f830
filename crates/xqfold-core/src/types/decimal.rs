use derive_more::{Display, FromStr};
use num_bigint::BigInt;
use rust_decimal::{
    Decimal as WrappedDecimal,
    prelude::{FromPrimitive, ToPrimitive},
};

///
/// Decimal
///
/// `xs:decimal` payload.
/// Arithmetic is checked; callers map `None` to the matching query error.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);
    pub const ONE: Self = Self(WrappedDecimal::ONE);

    #[must_use]
    /// Construct a decimal from mantissa and scale.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self(WrappedDecimal::from(n))
    }

    /// Lossy conversion from a finite double; `None` for NaN, infinities, or
    /// magnitudes outside the decimal range.
    #[must_use]
    pub fn from_f64(n: f64) -> Option<Self> {
        if !n.is_finite() {
            return None;
        }

        WrappedDecimal::from_f64(n).map(Self)
    }

    ///
    /// CHECKED ARITHMETIC
    ///

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked division; `None` on division by zero or overflow.
    #[must_use]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.0.checked_div(rhs.0).map(Self)
    }

    ///
    /// WRAPPED FUNCTIONS
    ///

    #[must_use]
    /// Round to a given number of decimal places.
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(self.0.round_dp(dp))
    }

    #[must_use]
    /// Normalize trailing zeros.
    pub fn normalize(&self) -> Self {
        Self(self.0.normalize())
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the number of fractional decimal places.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.0.scale()
    }

    /// Exact conversion from an integer; `None` past the 96-bit mantissa.
    #[must_use]
    pub fn from_bigint(n: &BigInt) -> Option<Self> {
        i128::try_from(n)
            .ok()
            .and_then(WrappedDecimal::from_i128)
            .map(Self)
    }

    /// Integer part as an unbounded integer.
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        // a 96-bit mantissa always fits i128
        BigInt::from(self.0.trunc().to_i128().unwrap_or_default())
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        // every decimal fits a double; precision loss is accepted
        self.0.to_f64().unwrap_or_default()
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(d: WrappedDecimal) -> Self {
        Self(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn checked_div_rejects_zero_divisor() {
        assert_eq!(Decimal::ONE.checked_div(Decimal::ZERO), None);
    }

    #[test]
    fn normalize_strips_trailing_zeros() {
        let d = Decimal::from_str("3.1400").expect("decimal literal");
        assert_eq!(d.normalize().to_string(), "3.14");
        assert_eq!(Decimal::new(300, 2).normalize().to_string(), "3");
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert_eq!(Decimal::from_f64(f64::NAN), None);
        assert_eq!(Decimal::from_f64(f64::INFINITY), None);
        assert_eq!(Decimal::from_f64(2.5), Some(Decimal::new(25, 1)));
    }

    #[test]
    fn bigint_bridge_truncates_and_bounds() {
        assert_eq!(Decimal::new(-275, 2).to_bigint(), BigInt::from(-2));
        assert_eq!(Decimal::from_bigint(&BigInt::from(7)), Some(Decimal::from_i64(7)));

        let huge = BigInt::from(u128::MAX);
        assert_eq!(Decimal::from_bigint(&huge), None);
    }
}
