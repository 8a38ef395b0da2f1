use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for merges and expression evaluation.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub merges: BTreeMap<String, MergeCounters>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            merges: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Merge entrypoints
    pub merge_calls: u64,
    pub shard_results_merged: u64,
    pub shard_results_discarded: u64,

    // Rows
    pub rows_emitted: u64,
    pub rows_suppressed: u64,

    // Inline expressions
    pub expressions_evaluated: u64,
    pub expressions_rejected: u64,
    pub expression_outputs: u64,
}

///
/// MergeCounters
/// Per merged-result variant counters, keyed by variant label.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MergeCounters {
    pub merge_calls: u64,
    pub rows_emitted: u64,
    pub rows_suppressed: u64,
}

///
/// EventReport
/// Point-in-time metrics snapshot with per-variant summaries.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `since_ms`.
    pub counters: Option<EventState>,
    /// Per-variant counters and averages, busiest first.
    pub merge_summaries: Vec<MergeSummary>,
}

///
/// MergeSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MergeSummary {
    pub variant: String,
    pub merge_calls: u64,
    pub rows_emitted: u64,
    pub rows_suppressed: u64,
    pub avg_rows_per_merge: f64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Build a metrics report from in-memory counters.
/// Counters cover everything recorded since `EventState::since_ms`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut merge_summaries: Vec<MergeSummary> = snap
        .merges
        .iter()
        .map(|(variant, counters)| {
            let avg_rows_per_merge = if counters.merge_calls > 0 {
                counters.rows_emitted as f64 / counters.merge_calls as f64
            } else {
                0.0
            };

            MergeSummary {
                variant: variant.clone(),
                merge_calls: counters.merge_calls,
                rows_emitted: counters.rows_emitted,
                rows_suppressed: counters.rows_suppressed,
                avg_rows_per_merge,
            }
        })
        .collect();

    merge_summaries.sort_by(|a, b| {
        b.merge_calls
            .cmp(&a.merge_calls)
            .then_with(|| a.variant.cmp(&b.variant))
    });

    EventReport {
        counters: Some(snap),
        merge_summaries,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}
