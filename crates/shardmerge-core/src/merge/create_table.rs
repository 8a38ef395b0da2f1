use crate::{
    merge::{
        ColumnLabels, MergeError, MergedResult, ShardResult, ddl::rewrite_table_name,
        result::Cursor, tables::LogicalTableScan,
    },
    obs::sink::MergeKind,
    rule::TableNameMapping,
    value::{Row, Value},
};

/// Column holding the `CREATE TABLE` statement text.
const DDL_COLUMN: usize = 1;

///
/// CreateTableMergedResult
///
/// `SHOW CREATE TABLE` across shards. Each logical table surfaces once, with
/// the DDL of the first shard that reported it and the physical table name
/// rewritten back to the logical one. DDL from later shards is not compared.
///

pub struct CreateTableMergedResult<M, S> {
    scan: LogicalTableScan<M, S>,
    cursor: Cursor<Row>,
}

impl<M, S> CreateTableMergedResult<M, S>
where
    M: TableNameMapping,
    S: ShardResult,
{
    pub fn new(mapping: M, shard_results: Vec<S>) -> Result<Self, MergeError> {
        Ok(Self {
            scan: LogicalTableScan::new(mapping, shard_results, MergeKind::CreateTable)?,
            cursor: Cursor::BeforeFirst,
        })
    }
}

impl<M, S> MergedResult for CreateTableMergedResult<M, S>
where
    M: TableNameMapping,
    S: ShardResult,
{
    fn advance(&mut self) -> Result<bool, MergeError> {
        if !self.cursor.can_advance()? {
            return Ok(false);
        }

        let next = self.scan.next_row();
        let Some(surfaced) = self.cursor.fail_on_err(next)? else {
            self.cursor = Cursor::Exhausted;
            return Ok(false);
        };

        let mut row = surfaced.row;
        if surfaced.actual_table != surfaced.logical_table
            && let Some(Value::Text(ddl)) = row.get_mut(DDL_COLUMN)
        {
            *ddl = rewrite_table_name(ddl, &surfaced.actual_table, &surfaced.logical_table);
        }
        self.cursor = Cursor::OnRow(row);

        Ok(true)
    }

    fn value(&self, index: usize) -> Result<Value, MergeError> {
        self.cursor.value(self.scan.columns(), index)
    }

    fn columns(&self) -> &ColumnLabels {
        self.scan.columns()
    }
}
