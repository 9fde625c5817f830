use crate::atomic::Type;
use std::fmt;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Structured runtime error raised while evaluating a function call.
/// `code` is the stable classification; `message` is diagnostic only.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{}: {message}", .code.id())]
pub struct QueryError {
    pub code: ErrorCode,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl QueryError {
    pub fn new(code: ErrorCode, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            code,
            origin,
            message: message.into(),
        }
    }

    /// The first item of an aggregate input has no aggregation domain.
    pub(crate) fn unsupported_aggregate_type(kind: Type) -> Self {
        Self::new(
            ErrorCode::InvalidArgumentType,
            ErrorOrigin::Aggregate,
            format!("Cannot compute sum/avg for items of type: {kind}"),
        )
    }

    /// A later aggregate item does not belong to the domain fixed by the first.
    pub(crate) fn incompatible_aggregate_types(expected: &str, found: Type) -> Self {
        Self::new(
            ErrorCode::InvalidArgumentType,
            ErrorOrigin::Aggregate,
            format!("Incompatible types in aggregate function: {expected} and {found}."),
        )
    }

    pub(crate) fn invalid_cast(from: Type, to: Type) -> Self {
        Self::new(
            ErrorCode::InvalidCast,
            ErrorOrigin::Cast,
            format!("Illegal cast from {from} to {to}"),
        )
    }

    pub(crate) fn invalid_lexical(target: Type, lexical: &str) -> Self {
        Self::new(
            ErrorCode::InvalidValueForCast,
            ErrorOrigin::Cast,
            format!("Cannot cast '{lexical}' to {target}"),
        )
    }

    pub(crate) fn division_by_zero() -> Self {
        Self::new(
            ErrorCode::DivisionByZero,
            ErrorOrigin::Arithmetic,
            "Division by zero",
        )
    }

    pub(crate) fn numeric_overflow(kind: Type) -> Self {
        Self::new(
            ErrorCode::NumericOverflow,
            ErrorOrigin::Arithmetic,
            format!("Numeric overflow or underflow in {kind} arithmetic"),
        )
    }

    pub(crate) fn duration_overflow(kind: Type) -> Self {
        Self::new(
            ErrorCode::DurationOverflow,
            ErrorOrigin::Arithmetic,
            format!("Overflow in {kind} arithmetic"),
        )
    }

    pub(crate) fn nan_supplied(kind: Type) -> Self {
        Self::new(
            ErrorCode::NaNSupplied,
            ErrorOrigin::Arithmetic,
            format!("NaN supplied as divisor of {kind}"),
        )
    }

    pub(crate) fn unknown_function(name: impl fmt::Display, arity: usize) -> Self {
        Self::new(
            ErrorCode::UnknownFunction,
            ErrorOrigin::Function,
            format!("Unknown function: {name}#{arity}"),
        )
    }

    /// Failure reported by the producer behind a sequence.
    pub fn sequence(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::SequenceFailure,
            ErrorOrigin::Sequence,
            message,
        )
    }

    #[must_use]
    pub const fn is_invalid_argument_type(&self) -> bool {
        matches!(self.code, ErrorCode::InvalidArgumentType)
    }

    #[must_use]
    pub fn display_with_origin(&self) -> String {
        format!("{}:{}: {}", self.origin, self.code.id(), self.message)
    }
}

///
/// ErrorCode
///
/// Stable error taxonomy; each code maps to the standard error identifier.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    InvalidArgumentType,
    InvalidValueForCast,
    InvalidCast,
    DivisionByZero,
    NumericOverflow,
    DurationOverflow,
    NaNSupplied,
    UnknownFunction,
    SequenceFailure,
}

impl ErrorCode {
    /// Standard error identifier (`err:` namespace local name).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::InvalidArgumentType => "FORG0006",
            Self::InvalidValueForCast => "FORG0001",
            Self::InvalidCast => "XPTY0004",
            Self::DivisionByZero => "FOAR0001",
            Self::NumericOverflow => "FOAR0002",
            Self::DurationOverflow => "FODT0002",
            Self::NaNSupplied => "FOCA0005",
            Self::UnknownFunction => "XPST0017",
            Self::SequenceFailure => "FOER0000",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Cast,
    Arithmetic,
    Aggregate,
    Sequence,
    Function,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cast => "cast",
            Self::Arithmetic => "arithmetic",
            Self::Aggregate => "aggregate",
            Self::Sequence => "sequence",
            Self::Function => "function",
        };
        write!(f, "{label}")
    }
}
