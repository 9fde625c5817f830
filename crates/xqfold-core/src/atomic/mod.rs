//! Atomic values of the query data model and their type identities.

mod cast;
mod kind;

#[cfg(test)]
mod tests;

use crate::{
    error::QueryError,
    types::{DayTimeDuration, Decimal, Duration, Numeric, YearMonthDuration},
};
use num_bigint::BigInt;
use std::fmt;

// re-exports
pub use kind::Type;

///
/// Atomic
///
/// Immutable typed value.
///
/// Untyped → a value with no declared type (e.g. the string value of an
///           unvalidated node); it must be cast before arithmetic.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Atomic {
    Untyped(String),
    Str(String),
    Bool(bool),
    Numeric(Numeric),
    Duration(Duration),
    YearMonth(YearMonthDuration),
    DayTime(DayTimeDuration),
}

impl Atomic {
    ///
    /// CONSTRUCTION
    ///

    #[must_use]
    pub fn untyped(lexical: impl Into<String>) -> Self {
        Self::Untyped(lexical.into())
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Numeric(Numeric::from(value))
    }

    #[must_use]
    pub const fn integer(value: BigInt) -> Self {
        Self::Numeric(Numeric::Int(value))
    }

    #[must_use]
    pub const fn dec(value: Decimal) -> Self {
        Self::Numeric(Numeric::Dec(value))
    }

    #[must_use]
    pub const fn flt(value: f32) -> Self {
        Self::Numeric(Numeric::Flt(value))
    }

    #[must_use]
    pub const fn dbl(value: f64) -> Self {
        Self::Numeric(Numeric::Dbl(value))
    }

    ///
    /// TYPES
    ///

    /// Dynamic type of this value.
    #[must_use]
    pub const fn kind(&self) -> Type {
        match self {
            Self::Untyped(_) => Type::Una,
            Self::Str(_) => Type::Str,
            Self::Bool(_) => Type::Bool,
            Self::Numeric(n) => n.kind(),
            Self::Duration(_) => Type::Dur,
            Self::YearMonth(_) => Type::Ymd,
            Self::DayTime(_) => Type::Dtd,
        }
    }

    #[must_use]
    pub const fn is_untyped(&self) -> bool {
        matches!(self, Self::Untyped(_))
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Self::Numeric(n) => Some(n.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_year_month(&self) -> Option<YearMonthDuration> {
        match self {
            Self::YearMonth(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_day_time(&self) -> Option<DayTimeDuration> {
        match self {
            Self::DayTime(d) => Some(*d),
            _ => None,
        }
    }

    ///
    /// CASTING
    ///

    /// Cast to `target` following the atomic casting table.
    pub fn cast(&self, target: Type) -> Result<Self, QueryError> {
        cast::cast(self, target)
    }
}

impl From<Numeric> for Atomic {
    fn from(n: Numeric) -> Self {
        Self::Numeric(n)
    }
}

impl From<YearMonthDuration> for Atomic {
    fn from(d: YearMonthDuration) -> Self {
        Self::YearMonth(d)
    }
}

impl From<DayTimeDuration> for Atomic {
    fn from(d: DayTimeDuration) -> Self {
        Self::DayTime(d)
    }
}

impl From<Duration> for Atomic {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl From<bool> for Atomic {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untyped(s) | Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Numeric(n) => n.fmt(f),
            Self::Duration(d) => d.fmt(f),
            Self::YearMonth(d) => d.fmt(f),
            Self::DayTime(d) => d.fmt(f),
        }
    }
}
