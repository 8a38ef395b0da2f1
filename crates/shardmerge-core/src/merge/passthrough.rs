use crate::{
    merge::{ColumnLabels, MergeError, MergedResult, ShardResult, result::Cursor},
    obs::sink::{MergeKind, MetricsEvent, record},
    value::Value,
};

///
/// PassthroughMergedResult
///
/// Forwards one shard result unmodified. Built over the first shard result
/// for statements with no multi-shard reconciliation rule; without any
/// shard result it is empty.
///

#[derive(Debug)]
pub struct PassthroughMergedResult<S> {
    shard: Option<S>,
    columns: ColumnLabels,
    cursor: Cursor<()>,
}

impl<S> PassthroughMergedResult<S>
where
    S: ShardResult,
{
    /// Wrap `shard`, reading its column metadata now.
    pub fn new(shard: Option<S>) -> Result<Self, MergeError> {
        let columns = match shard.as_ref() {
            Some(shard) => ColumnLabels::read(shard)?,
            None => ColumnLabels::default(),
        };

        Ok(Self {
            shard,
            columns,
            cursor: Cursor::BeforeFirst,
        })
    }

    /// Release the wrapped shard result to the caller.
    #[must_use]
    pub fn into_inner(self) -> Option<S> {
        self.shard
    }
}

impl<S> MergedResult for PassthroughMergedResult<S>
where
    S: ShardResult,
{
    fn advance(&mut self) -> Result<bool, MergeError> {
        if !self.cursor.can_advance()? {
            return Ok(false);
        }

        let Some(shard) = self.shard.as_mut() else {
            self.cursor = Cursor::Exhausted;
            return Ok(false);
        };
        let next = shard.next();
        if !self.cursor.fail_on_err(next)? {
            self.cursor = Cursor::Exhausted;
            return Ok(false);
        }

        self.cursor = Cursor::OnRow(());
        record(MetricsEvent::RowEmitted {
            kind: MergeKind::Passthrough,
        });

        Ok(true)
    }

    fn value(&self, index: usize) -> Result<Value, MergeError> {
        self.cursor.current()?;
        self.columns.check_index(index)?;

        // a positioned cursor always wraps a shard
        let shard = self.shard.as_ref().ok_or_else(MergeError::read_before_advance)?;

        Ok(shard.value(index)?)
    }

    fn columns(&self) -> &ColumnLabels {
        &self.columns
    }
}
