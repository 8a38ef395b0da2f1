//! Metrics sink boundary.
//!
//! Merge and expression logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between merge/evaluation logic
//! and the thread-local metrics state.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MergeKind
///
/// Merged-result variant selected by the merge engine.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeKind {
    FixedRow,
    TableList,
    CreateTable,
    Passthrough,
}

impl MergeKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FixedRow => "fixed_row",
            Self::TableList => "table_list",
            Self::CreateTable => "create_table",
            Self::Passthrough => "passthrough",
        }
    }
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    MergeStart {
        kind: MergeKind,
        shard_results: u64,
    },
    RowEmitted {
        kind: MergeKind,
    },
    RowSuppressed {
        kind: MergeKind,
    },
    ShardResultsDiscarded {
        count: u64,
    },
    ExpressionEvaluated {
        segments: u64,
        outputs: u64,
    },
    ExpressionRejected,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::MergeStart {
                kind,
                shard_results,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.merge_calls = m.ops.merge_calls.saturating_add(1);
                    m.ops.shard_results_merged =
                        m.ops.shard_results_merged.saturating_add(shard_results);

                    let entry = m.merges.entry(kind.label().to_string()).or_default();
                    entry.merge_calls = entry.merge_calls.saturating_add(1);
                });
            }

            MetricsEvent::RowEmitted { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_emitted = m.ops.rows_emitted.saturating_add(1);
                    let entry = m.merges.entry(kind.label().to_string()).or_default();
                    entry.rows_emitted = entry.rows_emitted.saturating_add(1);
                });
            }

            MetricsEvent::RowSuppressed { kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_suppressed = m.ops.rows_suppressed.saturating_add(1);
                    let entry = m.merges.entry(kind.label().to_string()).or_default();
                    entry.rows_suppressed = entry.rows_suppressed.saturating_add(1);
                });
            }

            MetricsEvent::ShardResultsDiscarded { count } => {
                metrics::with_state_mut(|m| {
                    m.ops.shard_results_discarded =
                        m.ops.shard_results_discarded.saturating_add(count);
                });
            }

            MetricsEvent::ExpressionEvaluated { outputs, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.expressions_evaluated = m.ops.expressions_evaluated.saturating_add(1);
                    m.ops.expression_outputs = m.ops.expression_outputs.saturating_add(outputs);
                });
            }

            MetricsEvent::ExpressionRejected => {
                metrics::with_state_mut(|m| {
                    m.ops.expressions_rejected = m.ops.expressions_rejected.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn scoped_sink_captures_events_and_restores_global_sink() {
        metrics_reset_all();
        let sink = CaptureSink::default();

        with_metrics_sink(&sink, || {
            record(MetricsEvent::ShardResultsDiscarded { count: 2 });
        });
        record(MetricsEvent::ShardResultsDiscarded { count: 3 });

        assert_eq!(
            *sink.events.borrow(),
            [MetricsEvent::ShardResultsDiscarded { count: 2 }]
        );
        let counters = metrics_report()
            .counters
            .expect("report should carry counters");
        assert_eq!(counters.ops.shard_results_discarded, 3);
    }

    #[test]
    fn report_summarizes_rows_per_variant() {
        metrics_reset_all();
        record(MetricsEvent::MergeStart {
            kind: MergeKind::TableList,
            shard_results: 2,
        });
        record(MetricsEvent::RowEmitted {
            kind: MergeKind::TableList,
        });
        record(MetricsEvent::RowEmitted {
            kind: MergeKind::TableList,
        });
        record(MetricsEvent::RowSuppressed {
            kind: MergeKind::TableList,
        });

        let report = metrics_report();
        let summary = &report.merge_summaries[0];

        assert_eq!(summary.variant, "table_list");
        assert_eq!(summary.rows_emitted, 2);
        assert_eq!(summary.rows_suppressed, 1);
        assert!((summary.avg_rows_per_merge - 2.0).abs() < f64::EPSILON);
        assert_eq!(
            report.counters.map(|c| c.ops.shard_results_merged),
            Some(2)
        );
    }

    #[test]
    fn reset_starts_an_empty_window() {
        record(MetricsEvent::ExpressionRejected);
        metrics_reset_all();

        let report = metrics_report();
        let counters = report.counters.expect("report should carry counters");

        assert_eq!(counters.ops.expressions_rejected, 0);
        assert!(counters.since_ms > 0);
        assert!(report.merge_summaries.is_empty());
    }
}
