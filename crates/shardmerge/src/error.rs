use derive_more::Display;
use serde::{Deserialize, Serialize};
use shardmerge_config::ConfigError;
use shardmerge_core::{
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
    inline::InlineExpressionError,
    merge::MergeError,
    rule::RuleError,
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (err.origin, err.class) {
            (CoreErrorOrigin::Expression, _) => ErrorKind::InvalidExpression,
            (CoreErrorOrigin::Rule, _) => ErrorKind::InvalidConfig,
            (CoreErrorOrigin::Shard, _) => ErrorKind::Shard,
            (CoreErrorOrigin::Merge, ErrorClass::InvariantViolation) => {
                ErrorKind::Cursor(CursorErrorKind::InvalidState)
            }
            (CoreErrorOrigin::Merge, ErrorClass::NotFound) => {
                ErrorKind::Cursor(CursorErrorKind::ColumnNotFound)
            }
            (CoreErrorOrigin::Merge, _) => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<InlineExpressionError> for Error {
    fn from(err: InlineExpressionError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<MergeError> for Error {
    fn from(err: MergeError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Rule(err) => err.into(),
            ConfigError::Io { .. } => Self::new(ErrorKind::Io, ErrorOrigin::Config, err.to_string()),
            ConfigError::EmptyDataSources | ConfigError::Toml(_) => {
                Self::new(ErrorKind::InvalidConfig, ErrorOrigin::Config, err.to_string())
            }
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Malformed inline expression.
    InvalidExpression,

    /// Sharding configuration or rule rejected.
    InvalidConfig,

    /// Config file could not be read.
    Io,

    /// A shard result failed while being merged.
    Shard,

    /// The merged cursor was misused.
    Cursor(CursorErrorKind),

    /// The caller cannot remediate this.
    Internal,
}

///
/// CursorErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CursorErrorKind {
    /// Read before `advance` or after exhaustion.
    InvalidState,

    /// Column index or label does not exist.
    ColumnNotFound,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Expression,
    Merge,
    Rule,
    Shard,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Expression => Self::Expression,
            CoreErrorOrigin::Merge => Self::Merge,
            CoreErrorOrigin::Rule => Self::Rule,
            CoreErrorOrigin::Shard => Self::Shard,
        }
    }
}
