//! Metrics sink boundary.
//!
//! Function evaluation MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.

use crate::{
    error::ErrorCode,
    function::{AggregateDomain, AggregateMode},
    obs::metrics,
};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    AggregateStart {
        mode: AggregateMode,
    },
    AggregateFinish {
        mode: AggregateMode,
        /// `None` when the input produced no items.
        domain: Option<AggregateDomain>,
        items: u64,
    },
    AggregateError {
        mode: AggregateMode,
        code: ErrorCode,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::AggregateStart { mode } => {
                metrics::with_state_mut(|m| match mode {
                    AggregateMode::Sum => m.ops.sum_calls = m.ops.sum_calls.saturating_add(1),
                    AggregateMode::Avg => m.ops.avg_calls = m.ops.avg_calls.saturating_add(1),
                });
            }

            MetricsEvent::AggregateFinish {
                mode: _,
                domain,
                items,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.items_folded = m.ops.items_folded.saturating_add(items);

                    let Some(domain) = domain else {
                        m.ops.empty_inputs = m.ops.empty_inputs.saturating_add(1);
                        return;
                    };

                    let entry = m.domains.entry(domain.label().to_string()).or_default();
                    entry.calls = entry.calls.saturating_add(1);
                    entry.items = entry.items.saturating_add(items);
                });
            }

            MetricsEvent::AggregateError { mode: _, code } => {
                metrics::with_state_mut(|m| {
                    m.ops.errors = m.ops.errors.saturating_add(1);
                    if code == ErrorCode::InvalidArgumentType {
                        m.ops.invalid_argument_errors =
                            m.ops.invalid_argument_errors.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventState {
    metrics::with_state(Clone::clone)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
/// The previous sink is restored on every exit, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// AggregateSpan
///
/// RAII guard that emits start/finish metrics events for one aggregate call.
/// A span marked failed emits an error event instead of a finish event.
///

pub(crate) struct AggregateSpan {
    mode: AggregateMode,
    enabled: bool,
    domain: Option<AggregateDomain>,
    items: u64,
    error: Option<ErrorCode>,
}

impl AggregateSpan {
    #[must_use]
    pub(crate) fn new(mode: AggregateMode, enabled: bool) -> Self {
        if enabled {
            record(MetricsEvent::AggregateStart { mode });
        }

        Self {
            mode,
            enabled,
            domain: None,
            items: 0,
            error: None,
        }
    }

    pub(crate) const fn set_domain(&mut self, domain: AggregateDomain) {
        self.domain = Some(domain);
    }

    pub(crate) const fn set_items(&mut self, items: u64) {
        self.items = items;
    }

    pub(crate) const fn fail(&mut self, code: ErrorCode) {
        self.error = Some(code);
    }
}

impl Drop for AggregateSpan {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }

        let event = match self.error {
            Some(code) => MetricsEvent::AggregateError {
                mode: self.mode,
                code,
            },
            None => MetricsEvent::AggregateFinish {
                mode: self.mode,
                domain: self.domain,
                items: self.items,
            },
        };
        record(event);
    }
}
