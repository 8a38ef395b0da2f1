//! Module: merge
//! Responsibility: fold per-shard DAL results into one logical cursor.
//! Does not own: SQL parsing, routing, or shard connection lifecycle.
//! Boundary: consumes `ShardResult` cursors and a `TableNameMapping`, and
//! exposes `MergedResult`.

mod create_table;
mod ddl;
mod engine;
mod error;
mod fixed;
mod passthrough;
mod result;
mod shard;
mod statement;
mod tables;


use crate::DEFAULT_LOGICAL_DATABASE;
use serde::{Deserialize, Serialize};

// re-exports
pub use create_table::CreateTableMergedResult;
pub use engine::{DalMergeEngine, DalMergedResult};
pub use error::MergeError;
pub use fixed::FixedRowMergedResult;
pub use passthrough::PassthroughMergedResult;
pub use result::{ColumnLabels, MergedResult};
pub use shard::{ShardError, ShardResult, VecShardResult};
pub use statement::DalStatementKind;
pub use tables::TableListMergedResult;

///
/// CONSTANTS
///

/// Column label of the single `SHOW DATABASES` column.
pub const DATABASE_COLUMN_LABEL: &str = "Database";

///
/// MergeConfig
///
/// Merge-time settings that do not come from the sharding rule.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub logical_database: String,
}

impl MergeConfig {
    #[must_use]
    pub fn new(logical_database: impl Into<String>) -> Self {
        Self {
            logical_database: logical_database.into(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOGICAL_DATABASE)
    }
}
