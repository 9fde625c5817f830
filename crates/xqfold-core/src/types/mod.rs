//! Payload types for the numeric and duration members of the atomic model.

mod decimal;
mod duration;
mod numeric;

pub use decimal::Decimal;
pub use duration::{DayTimeDuration, Duration, YearMonthDuration};
pub use numeric::Numeric;
