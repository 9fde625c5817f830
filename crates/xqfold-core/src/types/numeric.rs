use crate::{atomic::Type, context::ArithmeticContext, error::QueryError, types::Decimal};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

///
/// Numeric
///
/// Value of the numeric type family.
/// Binary operations promote both operands to the wider of the two types
/// along integer < decimal < float < double.
///
/// Integers are unbounded; decimals carry up to 28 fractional digits.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Numeric {
    Int(BigInt),
    Dec(Decimal),
    Flt(f32),
    Dbl(f64),
}

///
/// Promoted
///
/// Operand pair after type promotion.
///

enum Promoted {
    Int(BigInt, BigInt),
    Dec(Decimal, Decimal),
    Flt(f32, f32),
    Dbl(f64, f64),
}

impl Numeric {
    #[must_use]
    pub const fn kind(&self) -> Type {
        match self {
            Self::Int(_) => Type::Int,
            Self::Dec(_) => Type::Dec,
            Self::Flt(_) => Type::Flt,
            Self::Dbl(_) => Type::Dbl,
        }
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            // out-of-range integers saturate to an infinity
            Self::Int(v) => v.to_f64().unwrap_or(f64::INFINITY),
            Self::Dec(v) => v.to_f64(),
            Self::Flt(v) => f64::from(*v),
            Self::Dbl(v) => *v,
        }
    }

    fn promote(self, rhs: Self) -> Result<Promoted, QueryError> {
        // past the exact pairs, at least one side is a float or a double
        let promoted = match (self, rhs) {
            (Self::Int(l), Self::Int(r)) => Promoted::Int(l, r),
            (Self::Dec(l), Self::Dec(r)) => Promoted::Dec(l, r),
            (Self::Dec(l), Self::Int(r)) => Promoted::Dec(l, to_decimal(&r)?),
            (Self::Int(l), Self::Dec(r)) => Promoted::Dec(to_decimal(&l)?, r),
            (l, r) if !matches!(l, Self::Dbl(_)) && !matches!(r, Self::Dbl(_)) => {
                Promoted::Flt(l.to_f64() as f32, r.to_f64() as f32)
            }
            (l, r) => Promoted::Dbl(l.to_f64(), r.to_f64()),
        };

        Ok(promoted)
    }

    ///
    /// ARITHMETIC
    ///

    pub fn add(self, rhs: Self) -> Result<Self, QueryError> {
        match self.promote(rhs)? {
            Promoted::Int(l, r) => Ok(Self::Int(l + r)),
            Promoted::Dec(l, r) => l
                .checked_add(r)
                .map(Self::Dec)
                .ok_or_else(|| QueryError::numeric_overflow(Type::Dec)),
            Promoted::Flt(l, r) => Ok(Self::Flt(l + r)),
            Promoted::Dbl(l, r) => Ok(Self::Dbl(l + r)),
        }
    }

    /// Numeric division.
    ///
    /// Integer operands divide as decimals, so `10 div 3` is a decimal
    /// rounded to `ctx.decimal_scale` fractional digits, or to the dividend's
    /// own scale when that is finer. Float and double division follow
    /// IEEE-754 and never fail.
    pub fn div(self, rhs: Self, ctx: ArithmeticContext) -> Result<Self, QueryError> {
        match self.promote(rhs)? {
            Promoted::Int(l, r) => Self::div_decimal(to_decimal(&l)?, to_decimal(&r)?, ctx),
            Promoted::Dec(l, r) => Self::div_decimal(l, r, ctx),
            Promoted::Flt(l, r) => Ok(Self::Flt(l / r)),
            Promoted::Dbl(l, r) => Ok(Self::Dbl(l / r)),
        }
    }

    fn div_decimal(l: Decimal, r: Decimal, ctx: ArithmeticContext) -> Result<Self, QueryError> {
        if r.is_zero() {
            return Err(QueryError::division_by_zero());
        }

        let quotient = l
            .checked_div(r)
            .ok_or_else(|| QueryError::numeric_overflow(Type::Dec))?;
        let scale = ctx.decimal_scale.max(l.scale());

        Ok(Self::Dec(quotient.round_dp(scale).normalize()))
    }
}

fn to_decimal(v: &BigInt) -> Result<Decimal, QueryError> {
    Decimal::from_bigint(v).ok_or_else(|| QueryError::numeric_overflow(Type::Dec))
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Self::Int(BigInt::from(v))
    }
}

impl From<BigInt> for Numeric {
    fn from(v: BigInt) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Self::Dbl(v)
    }
}

impl From<Decimal> for Numeric {
    fn from(v: Decimal) -> Self {
        Self::Dec(v)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Dec(v) => write!(f, "{}", v.normalize()),
            Self::Flt(v) => write_floating(f, f64::from(*v)),
            Self::Dbl(v) => write_floating(f, *v),
        }
    }
}

// Canonical float/double lexical form: plain notation for integral or
// moderate magnitudes, E-notation otherwise.
fn write_floating(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "INF" } else { "-INF" });
    }
    if v == 0.0 {
        return f.write_str(if v.is_sign_negative() { "-0" } else { "0" });
    }

    let magnitude = v.abs();
    if (1e-6..1e6).contains(&magnitude) {
        write!(f, "{v}")
    } else {
        let formatted = format!("{v:E}");
        match formatted.split_once('E') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                write!(f, "{mantissa}.0E{exponent}")
            }
            _ => f.write_str(&formatted),
        }
    }
}
