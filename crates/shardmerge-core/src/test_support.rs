//! Shared fixtures for in-crate unit tests.

use crate::{
    merge::{ShardError, ShardResult, VecShardResult},
    value::{Row, Value},
};
use std::{cell::Cell, collections::BTreeMap, rc::Rc};

/// `SHOW TABLES` shard result with one table name per row.
pub(crate) fn table_shard(tables: &[&str]) -> VecShardResult {
    VecShardResult::new(
        ["Tables_in_db"],
        tables.iter().map(|table| Row::from_cells([*table])).collect(),
    )
}

/// `SHOW CREATE TABLE` shard result of `(table, ddl)` rows.
pub(crate) fn create_table_shard(rows: &[(&str, &str)]) -> VecShardResult {
    VecShardResult::new(
        ["Table", "Create Table"],
        rows.iter()
            .map(|(table, ddl)| Row::from_cells([*table, *ddl]))
            .collect(),
    )
}

/// Exact-match actual → logical mapping.
pub(crate) fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(actual, logical)| ((*actual).to_string(), (*logical).to_string()))
        .collect()
}

///
/// CountingShard
///
/// Wraps a shard result and counts every call made on it.
///

pub(crate) struct CountingShard {
    inner: VecShardResult,
    calls: Rc<Cell<usize>>,
}

impl CountingShard {
    pub(crate) fn new(inner: VecShardResult) -> Self {
        Self {
            inner,
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }

    fn touch(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl ShardResult for CountingShard {
    fn next(&mut self) -> Result<bool, ShardError> {
        self.touch();
        self.inner.next()
    }

    fn value(&self, index: usize) -> Result<Value, ShardError> {
        self.touch();
        self.inner.value(index)
    }

    fn column_count(&self) -> Result<usize, ShardError> {
        self.touch();
        self.inner.column_count()
    }

    fn column_label(&self, index: usize) -> Result<String, ShardError> {
        self.touch();
        self.inner.column_label(index)
    }
}

///
/// FailingShard
///
/// Shard result that yields `rows_before_failure` rows and then fails, or
/// fails on metadata when `metadata_fails` is set.
///

pub(crate) struct FailingShard {
    inner: VecShardResult,
    rows_before_failure: usize,
    metadata_fails: bool,
}

impl FailingShard {
    pub(crate) fn on_next(inner: VecShardResult, rows_before_failure: usize) -> Self {
        Self {
            inner,
            rows_before_failure,
            metadata_fails: false,
        }
    }

    pub(crate) fn on_metadata(inner: VecShardResult) -> Self {
        Self {
            inner,
            rows_before_failure: usize::MAX,
            metadata_fails: true,
        }
    }
}

impl ShardResult for FailingShard {
    fn next(&mut self) -> Result<bool, ShardError> {
        if self.rows_before_failure == 0 {
            return Err(ShardError::new("connection reset"));
        }
        self.rows_before_failure -= 1;

        self.inner.next()
    }

    fn value(&self, index: usize) -> Result<Value, ShardError> {
        self.inner.value(index)
    }

    fn column_count(&self) -> Result<usize, ShardError> {
        if self.metadata_fails {
            return Err(ShardError::new("metadata unavailable"));
        }

        self.inner.column_count()
    }

    fn column_label(&self, index: usize) -> Result<String, ShardError> {
        self.inner.column_label(index)
    }
}
