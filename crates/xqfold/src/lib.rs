//! ## Crate layout
//! - `core`: atomic values, sequences, casting, aggregates, and observability.
//!
//! The `prelude` module mirrors the surface used by embedding code.

pub use xqfold_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Re-exports
//

pub use crate::core::{config::Config, error::QueryError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        prelude::*,
        types::{DayTimeDuration, Decimal, Numeric, YearMonthDuration},
    };
}
