//! Observability: thread-local counters for merges and inline expression
//! evaluation, reached only through the sink abstraction.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, MergeCounters, MergeSummary};
pub use sink::{
    MergeKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
