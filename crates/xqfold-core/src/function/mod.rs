//! Built-in function dispatch: names, signatures, and the registry.

mod sum_avg;

#[cfg(test)]
mod tests;

use crate::{
    atomic::{Atomic, Type},
    context::QueryContext,
    error::QueryError,
    sequence::Sequence,
};
use std::{collections::HashMap, fmt};

// re-exports
pub use sum_avg::{AggregateDomain, AggregateMode, SumAvg};

///
/// QName
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QName {
    prefix: &'static str,
    local: &'static str,
}

impl QName {
    pub const FN_PREFIX: &'static str = "fn";

    #[must_use]
    pub const fn new(prefix: &'static str, local: &'static str) -> Self {
        Self { prefix, local }
    }

    /// Name in the standard function namespace.
    #[must_use]
    pub const fn builtin(local: &'static str) -> Self {
        Self::new(Self::FN_PREFIX, local)
    }

    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[must_use]
    pub const fn local(&self) -> &'static str {
        self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

///
/// Occurrence
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Occurrence {
    One,
    ZeroOrOne,
    ZeroOrMany,
}

///
/// SequenceType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SequenceType {
    pub item: Type,
    pub occurrence: Occurrence,
}

impl SequenceType {
    #[must_use]
    pub const fn new(item: Type, occurrence: Occurrence) -> Self {
        Self { item, occurrence }
    }
}

///
/// Signature
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    result: SequenceType,
    params: Vec<SequenceType>,
}

impl Signature {
    #[must_use]
    pub const fn new(result: SequenceType, params: Vec<SequenceType>) -> Self {
        Self { result, params }
    }

    #[must_use]
    pub const fn result(&self) -> SequenceType {
        self.result
    }

    #[must_use]
    pub fn params(&self) -> &[SequenceType] {
        &self.params
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

///
/// Function
///
/// Built-in function producing at most one atomic value.
/// An absent argument (`None`) is the empty sequence.
///

pub trait Function {
    fn name(&self) -> QName;

    fn signature(&self) -> &Signature;

    fn execute(
        &self,
        ctx: &QueryContext,
        args: &[Option<&dyn Sequence>],
    ) -> Result<Option<Atomic>, QueryError>;
}

///
/// FunctionLibrary
///
/// Registry keyed by (name, arity).
///

#[derive(Default)]
pub struct FunctionLibrary {
    functions: HashMap<(QName, usize), Box<dyn Function>>,
}

impl FunctionLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library preloaded with `fn:sum#1`, `fn:sum#2`, and `fn:avg#1`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.register(SumAvg::sum());
        library.register(SumAvg::sum_with_default());
        library.register(SumAvg::avg());

        library
    }

    /// Register a function, replacing any previous one with the same name
    /// and arity.
    pub fn register(&mut self, function: impl Function + 'static) {
        let key = (function.name(), function.signature().arity());
        self.functions.insert(key, Box::new(function));
    }

    #[must_use]
    pub fn lookup(&self, name: QName, arity: usize) -> Option<&dyn Function> {
        self.functions.get(&(name, arity)).map(|function| &**function)
    }

    pub fn call(
        &self,
        ctx: &QueryContext,
        name: QName,
        args: &[Option<&dyn Sequence>],
    ) -> Result<Option<Atomic>, QueryError> {
        let function = self
            .lookup(name, args.len())
            .ok_or_else(|| QueryError::unknown_function(name, args.len()))?;

        function.execute(ctx, args)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
