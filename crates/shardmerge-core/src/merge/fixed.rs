use crate::{
    merge::{ColumnLabels, DATABASE_COLUMN_LABEL, MergeError, MergedResult, result::Cursor},
    obs::sink::{MergeKind, MetricsEvent, record},
    value::{Row, Value},
};

///
/// FixedRowMergedResult
///
/// One row holding the logical database name. Never touches a shard.
///

#[derive(Debug)]
pub struct FixedRowMergedResult {
    columns: ColumnLabels,
    pending: Option<Row>,
    cursor: Cursor<Row>,
}

impl FixedRowMergedResult {
    #[must_use]
    pub fn new(logical_database: &str) -> Self {
        Self {
            columns: ColumnLabels::new([DATABASE_COLUMN_LABEL]),
            pending: Some(Row::from_cells([logical_database])),
            cursor: Cursor::BeforeFirst,
        }
    }
}

impl MergedResult for FixedRowMergedResult {
    fn advance(&mut self) -> Result<bool, MergeError> {
        if let Some(row) = self.pending.take() {
            self.cursor = Cursor::OnRow(row);
            record(MetricsEvent::RowEmitted {
                kind: MergeKind::FixedRow,
            });

            return Ok(true);
        }
        self.cursor = Cursor::Exhausted;

        Ok(false)
    }

    fn value(&self, index: usize) -> Result<Value, MergeError> {
        self.cursor.value(&self.columns, index)
    }

    fn columns(&self) -> &ColumnLabels {
        &self.columns
    }
}
