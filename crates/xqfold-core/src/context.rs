use crate::config::Config;

///
/// QueryContext
///
/// Per-query evaluation context handed to every function call.
///

#[derive(Clone, Debug, Default)]
pub struct QueryContext {
    config: Config,
}

impl QueryContext {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn arithmetic(&self) -> ArithmeticContext {
        ArithmeticContext {
            decimal_scale: self.config.arithmetic.decimal_scale,
        }
    }

    #[must_use]
    pub const fn metrics_enabled(&self) -> bool {
        self.config.metrics.enabled
    }
}

///
/// ArithmeticContext
///
/// Settings consulted by numeric division.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArithmeticContext {
    pub decimal_scale: u32,
}

impl Default for ArithmeticContext {
    fn default() -> Self {
        QueryContext::default().arithmetic()
    }
}
