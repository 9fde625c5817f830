//! Core runtime for xqfold: atomic values, sequences, casting, and the
//! `fn:sum` / `fn:avg` aggregates, plus the ergonomics exported via the
//! `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod atomic;
pub mod config;
pub mod context;
pub mod error;
pub mod function;
pub mod item;
pub mod obs;
pub mod sequence;
pub mod types;

///
/// Prelude
///
/// Prelude contains the vocabulary needed to build sequences and call
/// functions. Metrics and config internals stay one level down.
///

pub mod prelude {
    pub use crate::{
        atomic::{Atomic, Type},
        context::QueryContext,
        error::QueryError,
        function::{Function, FunctionLibrary, QName},
        item::{Item, Node},
        sequence::{ItemSequence, LazySequence, Sequence},
    };
}
