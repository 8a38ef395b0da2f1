//! Core runtime for shardmerge: inline name expressions, sharding rules, and
//! the DAL merge engine that folds per-shard results into one logical cursor.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod inline;
pub mod merge;
pub mod obs;
pub mod rule;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Logical database name reported for `SHOW DATABASES` when no merge
/// configuration overrides it.
pub const DEFAULT_LOGICAL_DATABASE: &str = "sharding_db";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        merge::{DalMergeEngine, DalStatementKind, MergeConfig, MergedResult, ShardResult},
        rule::{DataNode, ShardingRule, TableNameMapping, TableRule},
        value::{Row, Value},
    };
}
