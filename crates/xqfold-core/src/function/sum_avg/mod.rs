//! `fn:sum` and `fn:avg`.
//!
//! The first item fixes the aggregation domain (numeric, year-month
//! duration, or day-time duration); every later item must coerce into it.
//! Both modes share one fold per domain and differ only in finalization.

mod domain;
mod fold;


use crate::{
    atomic::{Atomic, Type},
    context::QueryContext,
    error::QueryError,
    function::{Function, Occurrence, QName, SequenceType, Signature},
    obs::sink::AggregateSpan,
    sequence::{ScopedIter, Sequence},
};
use domain::{DayTimeFold, NumericFold, Seed, YearMonthFold, classify};
use fold::{Folded, fold};
use tracing::debug;

// re-exports
pub use domain::AggregateDomain;

///
/// AggregateMode
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AggregateMode {
    Sum,
    Avg,
}

///
/// SumAvg
///
/// Aggregate function over a sequence of atomizable items.
///
/// Empty or absent input:
/// - avg → no value
/// - sum → the default argument when one is passed, else integer `0`
///

#[derive(Clone, Debug)]
pub struct SumAvg {
    name: QName,
    signature: Signature,
    mode: AggregateMode,
}

impl SumAvg {
    #[must_use]
    pub const fn new(name: QName, signature: Signature, mode: AggregateMode) -> Self {
        Self {
            name,
            signature,
            mode,
        }
    }

    /// `fn:sum($arg as xs:anyAtomicType*) as xs:anyAtomicType`
    #[must_use]
    pub fn sum() -> Self {
        Self::new(
            QName::builtin("sum"),
            Signature::new(
                SequenceType::new(Type::AnyAtomic, Occurrence::One),
                vec![SequenceType::new(Type::AnyAtomic, Occurrence::ZeroOrMany)],
            ),
            AggregateMode::Sum,
        )
    }

    /// `fn:sum($arg as xs:anyAtomicType*, $zero as xs:anyAtomicType?)
    ///   as xs:anyAtomicType?`
    #[must_use]
    pub fn sum_with_default() -> Self {
        Self::new(
            QName::builtin("sum"),
            Signature::new(
                SequenceType::new(Type::AnyAtomic, Occurrence::ZeroOrOne),
                vec![
                    SequenceType::new(Type::AnyAtomic, Occurrence::ZeroOrMany),
                    SequenceType::new(Type::AnyAtomic, Occurrence::ZeroOrOne),
                ],
            ),
            AggregateMode::Sum,
        )
    }

    /// `fn:avg($arg as xs:anyAtomicType*) as xs:anyAtomicType?`
    #[must_use]
    pub fn avg() -> Self {
        Self::new(
            QName::builtin("avg"),
            Signature::new(
                SequenceType::new(Type::AnyAtomic, Occurrence::ZeroOrOne),
                vec![SequenceType::new(Type::AnyAtomic, Occurrence::ZeroOrMany)],
            ),
            AggregateMode::Avg,
        )
    }

    #[must_use]
    pub const fn mode(&self) -> AggregateMode {
        self.mode
    }

    fn evaluate(
        &self,
        ctx: &QueryContext,
        args: &[Option<&dyn Sequence>],
        span: &mut AggregateSpan,
    ) -> Result<Option<Atomic>, QueryError> {
        let Some(input) = args.first().copied().flatten() else {
            return self.empty_result(args);
        };

        let mut iter = ScopedIter::open(input)?;
        let Some(first) = iter.next()? else {
            return self.empty_result(args);
        };

        let seed = classify(first.atomize())?;
        let domain = seed.domain();
        span.set_domain(domain);
        debug!(function = %self.name, domain = domain.label(), "aggregate domain fixed");

        let arithmetic = ctx.arithmetic();
        let Folded { value, count } = match seed {
            Seed::Numeric(n) => fold::<NumericFold>(&mut iter, n, self.mode, arithmetic)?,
            Seed::YearMonth(d) => fold::<YearMonthFold>(&mut iter, d, self.mode, arithmetic)?,
            Seed::DayTime(d) => fold::<DayTimeFold>(&mut iter, d, self.mode, arithmetic)?,
        };
        span.set_items(count);
        debug!(function = %self.name, items = count, "aggregate complete");

        Ok(Some(value))
    }

    // Absent input and input without items share this branch.
    fn empty_result(&self, args: &[Option<&dyn Sequence>]) -> Result<Option<Atomic>, QueryError> {
        match self.mode {
            AggregateMode::Avg => Ok(None),
            AggregateMode::Sum => match args.get(1) {
                None => Ok(Some(Atomic::int(0))),
                Some(None) => Ok(None),
                Some(Some(default)) => {
                    let mut iter = ScopedIter::open(*default)?;
                    Ok(iter.next()?.map(|item| item.atomize()))
                }
            },
        }
    }
}

impl Function for SumAvg {
    fn name(&self) -> QName {
        self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn execute(
        &self,
        ctx: &QueryContext,
        args: &[Option<&dyn Sequence>],
    ) -> Result<Option<Atomic>, QueryError> {
        let mut span = AggregateSpan::new(self.mode, ctx.metrics_enabled());
        let result = self.evaluate(ctx, args, &mut span);
        if let Err(err) = &result {
            span.fail(err.code);
            debug!(
                function = %self.name,
                error = %err.display_with_origin(),
                "aggregate failed"
            );
        }

        result
    }
}
