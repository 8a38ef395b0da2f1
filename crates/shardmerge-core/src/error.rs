use crate::{
    inline::InlineExpressionError,
    merge::{MergeError, ShardError},
    rule::RuleError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }

    /// Return the shard I/O failure carried by this error, if any.
    #[must_use]
    pub const fn shard_error(&self) -> Option<&ShardError> {
        match &self.detail {
            Some(ErrorDetail::Merge(MergeError::Shard(err))) => Some(err),
            _ => None,
        }
    }
}

impl From<InlineExpressionError> for InternalError {
    fn from(err: InlineExpressionError) -> Self {
        Self {
            class: ErrorClass::InvalidInput,
            origin: ErrorOrigin::Expression,
            message: err.to_string(),
            detail: Some(ErrorDetail::Expression(err)),
        }
    }
}

impl From<RuleError> for InternalError {
    fn from(err: RuleError) -> Self {
        let class = if matches!(err, RuleError::DuplicateLogicalTable { .. }) {
            ErrorClass::Conflict
        } else {
            ErrorClass::InvalidInput
        };

        Self {
            class,
            origin: ErrorOrigin::Rule,
            message: err.to_string(),
            detail: Some(ErrorDetail::Rule(err)),
        }
    }
}

impl From<MergeError> for InternalError {
    fn from(err: MergeError) -> Self {
        let (class, origin) = match &err {
            MergeError::Shard(_) => (ErrorClass::Io, ErrorOrigin::Shard),
            MergeError::InvalidCursorState { .. } => {
                (ErrorClass::InvariantViolation, ErrorOrigin::Merge)
            }
            MergeError::UnknownColumnLabel { .. } | MergeError::ColumnIndexOutOfRange { .. } => {
                (ErrorClass::NotFound, ErrorOrigin::Merge)
            }
            MergeError::NullTableName { .. } => (ErrorClass::InvalidInput, ErrorOrigin::Shard),
        };

        Self {
            class,
            origin,
            message: err.to_string(),
            detail: Some(ErrorDetail::Merge(err)),
        }
    }
}

impl From<ShardError> for InternalError {
    fn from(err: ShardError) -> Self {
        MergeError::from(err).into()
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Expression(InlineExpressionError),
    #[error("{0}")]
    Rule(RuleError),
    #[error("{0}")]
    Merge(MergeError),
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    InvalidInput,
    InvariantViolation,
    Io,
    NotFound,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::InvalidInput => "invalid_input",
            Self::InvariantViolation => "invariant_violation",
            Self::Io => "io",
            Self::NotFound => "not_found",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Expression,
    Merge,
    Rule,
    Shard,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Expression => "expression",
            Self::Merge => "merge",
            Self::Rule => "rule",
            Self::Shard => "shard",
        };
        write!(f, "{label}")
    }
}
