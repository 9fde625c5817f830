//! Observability: runtime telemetry (metrics) and sink abstractions.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{DomainCounters, EventOps, EventState};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
