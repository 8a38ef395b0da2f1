use crate::{
    merge::{MergeError, ShardError, ShardResult},
    value::{Row, Value},
};

///
/// MergedResult
///
/// Single forward-only cursor presented to the caller in place of the
/// per-shard cursors. Call `advance` once per logical row; reading before
/// the first successful `advance` or after exhaustion is an error.
///

pub trait MergedResult {
    /// Move to the next logical row; `false` once exhausted, and on every
    /// call after that.
    fn advance(&mut self) -> Result<bool, MergeError>;

    /// Read one cell of the current row, zero-based.
    fn value(&self, index: usize) -> Result<Value, MergeError>;

    fn columns(&self) -> &ColumnLabels;

    fn column_count(&self) -> usize {
        self.columns().len()
    }

    fn column_label(&self, index: usize) -> Result<&str, MergeError> {
        self.columns().get(index)
    }

    /// Read one cell of the current row by its ASCII-case-insensitive label.
    fn value_by_label(&self, label: &str) -> Result<Value, MergeError> {
        let index =
            self.columns()
                .position(label)
                .ok_or_else(|| MergeError::UnknownColumnLabel {
                    label: label.to_string(),
                })?;

        self.value(index)
    }
}

///
/// ColumnLabels
///
/// Column metadata captured once, when a merged result is built.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnLabels {
    labels: Vec<String>,
}

impl ColumnLabels {
    #[must_use]
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the metadata of one shard result.
    pub fn read<S>(shard: &S) -> Result<Self, ShardError>
    where
        S: ShardResult + ?Sized,
    {
        let count = shard.column_count()?;
        let labels = (0..count)
            .map(|index| shard.column_label(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { labels })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&str, MergeError> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(MergeError::ColumnIndexOutOfRange {
                index,
                count: self.labels.len(),
            })
    }

    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(label))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), MergeError> {
        self.get(index).map(|_| ())
    }
}

///
/// Cursor
///
/// Position of a merged result relative to its rows.
///

#[derive(Debug)]
pub(crate) enum Cursor<T> {
    BeforeFirst,
    OnRow(T),
    Exhausted,
    Failed,
}

impl<T> Cursor<T> {
    /// Whether another advance may pull rows; a failed cursor stays failed.
    pub(crate) const fn can_advance(&self) -> Result<bool, MergeError> {
        match self {
            Self::BeforeFirst | Self::OnRow(_) => Ok(true),
            Self::Exhausted => Ok(false),
            Self::Failed => Err(MergeError::after_failure()),
        }
    }

    pub(crate) fn current(&self) -> Result<&T, MergeError> {
        match self {
            Self::BeforeFirst => Err(MergeError::read_before_advance()),
            Self::OnRow(current) => Ok(current),
            Self::Exhausted => Err(MergeError::read_after_exhaustion()),
            Self::Failed => Err(MergeError::after_failure()),
        }
    }

    /// Record the outcome of a pull that may have failed.
    pub(crate) fn fail_on_err<R, E>(&mut self, result: Result<R, E>) -> Result<R, E> {
        if result.is_err() {
            *self = Self::Failed;
        }

        result
    }
}

impl Cursor<Row> {
    /// Read one cell of the materialized current row.
    pub(crate) fn value(&self, columns: &ColumnLabels, index: usize) -> Result<Value, MergeError> {
        let row = self.current()?;
        columns.check_index(index)?;

        row.get(index)
            .cloned()
            .ok_or(MergeError::ColumnIndexOutOfRange {
                index,
                count: row.len(),
            })
    }
}
