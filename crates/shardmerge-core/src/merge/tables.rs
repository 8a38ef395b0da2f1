//! Module: merge::tables
//! Responsibility: logical-table traversal shared by `SHOW TABLES` and
//! `SHOW CREATE TABLE` merges.
//! Does not own: DDL text rewriting.
//! Boundary: suppresses every row whose logical table was already surfaced.

use crate::{
    merge::{ColumnLabels, MergeError, MergedResult, ShardResult, result::Cursor, shard::read_row},
    obs::sink::{MergeKind, MetricsEvent, record},
    rule::TableNameMapping,
    value::{Row, Value},
};
use std::{collections::HashSet, vec};

/// Column holding the physical table name in both statement shapes.
pub(crate) const TABLE_NAME_COLUMN: usize = 0;

///
/// LogicalTableRow
///
/// One surfaced row with the table-name cell already rewritten.
///

pub(crate) struct LogicalTableRow {
    pub(crate) row: Row,
    pub(crate) actual_table: String,
    pub(crate) logical_table: String,
}

///
/// LogicalTableScan
///
/// Pulls rows from every shard result in input order, maps the physical
/// table name to its logical table, and yields the first row seen for each
/// logical table. Unmapped names pass through and share the same seen-set.
///

pub(crate) struct LogicalTableScan<M, S> {
    mapping: M,
    kind: MergeKind,
    columns: ColumnLabels,
    active: Option<S>,
    pending: vec::IntoIter<S>,
    seen: HashSet<String>,
}

impl<M, S> LogicalTableScan<M, S>
where
    M: TableNameMapping,
    S: ShardResult,
{
    /// Column metadata comes from the first shard result.
    pub(crate) fn new(
        mapping: M,
        shard_results: Vec<S>,
        kind: MergeKind,
    ) -> Result<Self, MergeError> {
        let mut pending = shard_results.into_iter();
        let active = pending.next();
        let columns = match active.as_ref() {
            Some(first) => ColumnLabels::read(first)?,
            None => ColumnLabels::default(),
        };

        Ok(Self {
            mapping,
            kind,
            columns,
            active,
            pending,
            seen: HashSet::new(),
        })
    }

    pub(crate) const fn columns(&self) -> &ColumnLabels {
        &self.columns
    }

    pub(crate) fn next_row(&mut self) -> Result<Option<LogicalTableRow>, MergeError> {
        while let Some(shard) = self.active.as_mut() {
            if !shard.next()? {
                self.active = self.pending.next();
                continue;
            }

            let actual_table = shard
                .value(TABLE_NAME_COLUMN)?
                .to_name()
                .ok_or(MergeError::NullTableName {
                    column: TABLE_NAME_COLUMN,
                })?;
            let logical_table = self
                .mapping
                .logical_table_of(&actual_table)
                .map_or_else(|| actual_table.clone(), str::to_string);

            if self.seen.contains(&logical_table) {
                record(MetricsEvent::RowSuppressed { kind: self.kind });
                continue;
            }

            let mut row = read_row(&*shard, self.columns.len())?;
            if let Some(cell) = row.get_mut(TABLE_NAME_COLUMN) {
                *cell = Value::Text(logical_table.clone());
            }
            self.seen.insert(logical_table.clone());
            record(MetricsEvent::RowEmitted { kind: self.kind });

            return Ok(Some(LogicalTableRow {
                row,
                actual_table,
                logical_table,
            }));
        }

        Ok(None)
    }
}

///
/// TableListMergedResult
///
/// `SHOW TABLES` across shards: each logical table once, first-seen order.
///

pub struct TableListMergedResult<M, S> {
    scan: LogicalTableScan<M, S>,
    cursor: Cursor<Row>,
}

impl<M, S> TableListMergedResult<M, S>
where
    M: TableNameMapping,
    S: ShardResult,
{
    pub fn new(mapping: M, shard_results: Vec<S>) -> Result<Self, MergeError> {
        Ok(Self {
            scan: LogicalTableScan::new(mapping, shard_results, MergeKind::TableList)?,
            cursor: Cursor::BeforeFirst,
        })
    }
}

impl<M, S> MergedResult for TableListMergedResult<M, S>
where
    M: TableNameMapping,
    S: ShardResult,
{
    fn advance(&mut self) -> Result<bool, MergeError> {
        if !self.cursor.can_advance()? {
            return Ok(false);
        }

        let next = self.scan.next_row();
        match self.cursor.fail_on_err(next)? {
            Some(surfaced) => {
                self.cursor = Cursor::OnRow(surfaced.row);
                Ok(true)
            }
            None => {
                self.cursor = Cursor::Exhausted;
                Ok(false)
            }
        }
    }

    fn value(&self, index: usize) -> Result<Value, MergeError> {
        self.cursor.value(self.scan.columns(), index)
    }

    fn columns(&self) -> &ColumnLabels {
        self.scan.columns()
    }
}
