use crate::merge::ShardError;
use thiserror::Error as ThisError;

///
/// MergeError
///

#[derive(Debug, ThisError)]
pub enum MergeError {
    #[error("column index {index} out of range ({count} columns)")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    #[error("invalid cursor state: {reason}")]
    InvalidCursorState { reason: &'static str },

    #[error("shard result returned NULL table name in column {column}")]
    NullTableName { column: usize },

    #[error(transparent)]
    Shard(#[from] ShardError),

    #[error("unknown column label '{label}'")]
    UnknownColumnLabel { label: String },
}

impl MergeError {
    pub(crate) const fn read_before_advance() -> Self {
        Self::InvalidCursorState {
            reason: "read before advance",
        }
    }

    pub(crate) const fn read_after_exhaustion() -> Self {
        Self::InvalidCursorState {
            reason: "read after exhaustion",
        }
    }

    pub(crate) const fn after_failure() -> Self {
        Self::InvalidCursorState {
            reason: "cursor failed on an earlier advance",
        }
    }
}
