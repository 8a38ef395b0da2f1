use crate::value::{Row, Value};
use std::{error::Error as StdError, fmt};

///
/// ShardResult
///
/// Forward-only cursor over the rows one physical shard returned.
/// Owned by the execution layer; the merge engine only advances and reads it.
///

pub trait ShardResult {
    /// Move to the next row; `false` once the cursor is exhausted.
    fn next(&mut self) -> Result<bool, ShardError>;

    /// Read one cell of the current row, zero-based.
    fn value(&self, index: usize) -> Result<Value, ShardError>;

    fn column_count(&self) -> Result<usize, ShardError>;

    fn column_label(&self, index: usize) -> Result<String, ShardError>;
}

impl<T> ShardResult for Box<T>
where
    T: ShardResult + ?Sized,
{
    fn next(&mut self) -> Result<bool, ShardError> {
        self.as_mut().next()
    }

    fn value(&self, index: usize) -> Result<Value, ShardError> {
        self.as_ref().value(index)
    }

    fn column_count(&self) -> Result<usize, ShardError> {
        self.as_ref().column_count()
    }

    fn column_label(&self, index: usize) -> Result<String, ShardError> {
        self.as_ref().column_label(index)
    }
}

impl<T> ShardResult for &mut T
where
    T: ShardResult + ?Sized,
{
    fn next(&mut self) -> Result<bool, ShardError> {
        (**self).next()
    }

    fn value(&self, index: usize) -> Result<Value, ShardError> {
        (**self).value(index)
    }

    fn column_count(&self) -> Result<usize, ShardError> {
        (**self).column_count()
    }

    fn column_label(&self, index: usize) -> Result<String, ShardError> {
        (**self).column_label(index)
    }
}

/// Materialize the current row of `shard` as `column_count` cells.
pub(crate) fn read_row<S>(shard: &S, column_count: usize) -> Result<Row, ShardError>
where
    S: ShardResult + ?Sized,
{
    (0..column_count)
        .map(|index| shard.value(index))
        .collect::<Result<Vec<_>, _>>()
        .map(Row::new)
}

///
/// ShardError
///
/// Failure raised by a shard cursor. Displayed as its message so callers
/// see the shard's own wording.
///

#[derive(Debug)]
pub struct ShardError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ShardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying driver or I/O error.
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ShardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ShardError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

///
/// VecShardResult
///
/// Adapter that exposes materialized rows through the `ShardResult`
/// interface.
///

#[derive(Clone, Debug)]
pub struct VecShardResult {
    labels: Vec<String>,
    rows: std::vec::IntoIter<Row>,
    current: Option<Row>,
}

impl VecShardResult {
    #[must_use]
    pub fn new<I, L>(labels: I, rows: Vec<Row>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            rows: rows.into_iter(),
            current: None,
        }
    }
}

impl ShardResult for VecShardResult {
    fn next(&mut self) -> Result<bool, ShardError> {
        self.current = self.rows.next();

        Ok(self.current.is_some())
    }

    fn value(&self, index: usize) -> Result<Value, ShardError> {
        let row = self
            .current
            .as_ref()
            .ok_or_else(|| ShardError::new("no current row"))?;

        row.get(index)
            .cloned()
            .ok_or_else(|| ShardError::new(format!("column {index} out of range")))
    }

    fn column_count(&self) -> Result<usize, ShardError> {
        Ok(self.labels.len())
    }

    fn column_label(&self, index: usize) -> Result<String, ShardError> {
        self.labels
            .get(index)
            .cloned()
            .ok_or_else(|| ShardError::new(format!("column {index} out of range")))
    }
}
