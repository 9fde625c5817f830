use crate::{
    atomic::{Atomic, Type},
    context::ArithmeticContext,
    error::QueryError,
    types::{DayTimeDuration, Numeric, YearMonthDuration},
};
use num_bigint::BigInt;

///
/// AggregateDomain
///
/// Arithmetic family an aggregate call is fixed to by its first item.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AggregateDomain {
    Numeric,
    YearMonthDuration,
    DayTimeDuration,
}

impl AggregateDomain {
    /// Type name used in diagnostics and metrics keys.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Numeric => "xs:numeric",
            Self::YearMonthDuration => "xs:yearMonthDuration",
            Self::DayTimeDuration => "xs:dayTimeDuration",
        }
    }
}

///
/// Seed
///
/// Accumulator initialized from the first item, tagged by domain.
///

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Seed {
    Numeric(Numeric),
    YearMonth(YearMonthDuration),
    DayTime(DayTimeDuration),
}

impl Seed {
    pub(super) const fn domain(&self) -> AggregateDomain {
        match self {
            Self::Numeric(_) => AggregateDomain::Numeric,
            Self::YearMonth(_) => AggregateDomain::YearMonthDuration,
            Self::DayTime(_) => AggregateDomain::DayTimeDuration,
        }
    }
}

/// Pick the aggregation domain from the first atomized item.
/// Untyped values are read as doubles and fix the domain to numeric.
pub(super) fn classify(first: Atomic) -> Result<Seed, QueryError> {
    let first = if first.is_untyped() {
        first.cast(Type::Dbl)?
    } else {
        first
    };
    let kind = first.kind();

    let seed = if kind.is_numeric() {
        first.as_numeric().map(Seed::Numeric)
    } else if kind.instance_of(Type::Ymd) {
        first.as_year_month().map(Seed::YearMonth)
    } else if kind.instance_of(Type::Dtd) {
        first.as_day_time().map(Seed::DayTime)
    } else {
        None
    };

    seed.ok_or_else(|| QueryError::unsupported_aggregate_type(kind))
}

///
/// DomainFold
///
/// Per-domain operations driving the shared fold loop.
///

pub(super) trait DomainFold {
    type Value: Into<Atomic>;

    const DOMAIN: AggregateDomain;

    /// Type untyped items are cast to.
    const UNTYPED_TARGET: Type;

    /// Whether a typed item of `kind` belongs to this domain.
    fn admits(kind: Type) -> bool;

    fn extract(atomic: &Atomic) -> Option<Self::Value>;

    fn add(total: Self::Value, next: Self::Value) -> Result<Self::Value, QueryError>;

    fn average(
        total: Self::Value,
        count: u64,
        ctx: ArithmeticContext,
    ) -> Result<Self::Value, QueryError>;

    /// Bring one subsequent item into the domain, or reject it.
    fn coerce(atomic: Atomic) -> Result<Self::Value, QueryError> {
        let atomic = if atomic.is_untyped() {
            atomic.cast(Self::UNTYPED_TARGET)?
        } else {
            atomic
        };
        let kind = atomic.kind();
        let mismatch = || QueryError::incompatible_aggregate_types(Self::DOMAIN.label(), kind);

        if !Self::admits(kind) {
            return Err(mismatch());
        }

        Self::extract(&atomic).ok_or_else(mismatch)
    }
}

///
/// NumericFold
///

pub(super) struct NumericFold;

impl DomainFold for NumericFold {
    type Value = Numeric;

    const DOMAIN: AggregateDomain = AggregateDomain::Numeric;
    const UNTYPED_TARGET: Type = Type::Dbl;

    fn admits(kind: Type) -> bool {
        kind.is_numeric()
    }

    fn extract(atomic: &Atomic) -> Option<Numeric> {
        atomic.as_numeric()
    }

    fn add(total: Numeric, next: Numeric) -> Result<Numeric, QueryError> {
        total.add(next)
    }

    fn average(total: Numeric, count: u64, ctx: ArithmeticContext) -> Result<Numeric, QueryError> {
        total.div(Numeric::Int(BigInt::from(count)), ctx)
    }
}

///
/// YearMonthFold
///

pub(super) struct YearMonthFold;

impl DomainFold for YearMonthFold {
    type Value = YearMonthDuration;

    const DOMAIN: AggregateDomain = AggregateDomain::YearMonthDuration;
    const UNTYPED_TARGET: Type = Type::Ymd;

    fn admits(kind: Type) -> bool {
        kind.instance_of(Type::Ymd)
    }

    fn extract(atomic: &Atomic) -> Option<YearMonthDuration> {
        atomic.as_year_month()
    }

    fn add(
        total: YearMonthDuration,
        next: YearMonthDuration,
    ) -> Result<YearMonthDuration, QueryError> {
        total.add(next)
    }

    fn average(
        total: YearMonthDuration,
        count: u64,
        _ctx: ArithmeticContext,
    ) -> Result<YearMonthDuration, QueryError> {
        total.divide(count as f64)
    }
}

///
/// DayTimeFold
///

pub(super) struct DayTimeFold;

impl DomainFold for DayTimeFold {
    type Value = DayTimeDuration;

    const DOMAIN: AggregateDomain = AggregateDomain::DayTimeDuration;
    const UNTYPED_TARGET: Type = Type::Dtd;

    fn admits(kind: Type) -> bool {
        kind.instance_of(Type::Dtd)
    }

    fn extract(atomic: &Atomic) -> Option<DayTimeDuration> {
        atomic.as_day_time()
    }

    fn add(total: DayTimeDuration, next: DayTimeDuration) -> Result<DayTimeDuration, QueryError> {
        total.add(next)
    }

    fn average(
        total: DayTimeDuration,
        count: u64,
        _ctx: ArithmeticContext,
    ) -> Result<DayTimeDuration, QueryError> {
        total.divide(count as f64)
    }
}
