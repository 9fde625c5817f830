use super::{AggregateMode, domain::DomainFold};
use crate::{
    atomic::Atomic, context::ArithmeticContext, error::QueryError, sequence::ScopedIter,
};

///
/// Folded
///
/// Finalized aggregate plus the number of items consumed.
///

#[derive(Debug, PartialEq)]
pub(super) struct Folded {
    pub(super) value: Atomic,
    pub(super) count: u64,
}

/// Consume the rest of `iter` into `seed`, then finalize per `mode`.
/// The first failing item aborts the fold.
pub(super) fn fold<D: DomainFold>(
    iter: &mut ScopedIter<'_>,
    seed: D::Value,
    mode: AggregateMode,
    ctx: ArithmeticContext,
) -> Result<Folded, QueryError> {
    let mut total = seed;
    let mut count = 1u64;

    while let Some(item) = iter.next()? {
        let next = D::coerce(item.atomize())?;
        total = D::add(total, next)?;
        count = count.saturating_add(1);
    }

    let value = match mode {
        AggregateMode::Sum => total,
        AggregateMode::Avg => D::average(total, count, ctx)?,
    };

    Ok(Folded {
        value: value.into(),
        count,
    })
}
