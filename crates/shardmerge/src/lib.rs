//! ## Crate layout
//! - `core`: inline expressions, sharding rules, the DAL merge engine, and
//!   observability.
//! - `config`: TOML sharding configuration.
//! - `error`: public error type for callers.
//!
//! `ShardingContext` ties a validated rule to merge settings; the `prelude`
//! carries the vocabulary needed to merge shard results.

pub use shardmerge_config as config;
pub use shardmerge_core as core;

pub mod error;


use crate::{
    config::ShardingConfig,
    core::{
        inline::InlineExpression,
        merge::{DalMergeEngine, DalMergedResult, DalStatementKind, MergeConfig, ShardResult},
        rule::ShardingRule,
    },
};

pub use error::{Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// ShardingContext
///
/// A validated sharding rule plus merge settings; the entry point for
/// merging the shard results of one DAL statement.
///

#[derive(Clone, Debug)]
pub struct ShardingContext {
    rule: ShardingRule,
    merge_config: MergeConfig,
}

impl ShardingContext {
    #[must_use]
    pub const fn new(rule: ShardingRule, merge_config: MergeConfig) -> Self {
        Self { rule, merge_config }
    }

    pub fn from_config(config: &ShardingConfig) -> Result<Self, Error> {
        Ok(Self::new(config.build_rule()?, config.merge_config()))
    }

    #[must_use]
    pub const fn rule(&self) -> &ShardingRule {
        &self.rule
    }

    #[must_use]
    pub const fn merge_config(&self) -> &MergeConfig {
        &self.merge_config
    }

    /// Merge the shard results of one DAL statement into a single cursor.
    pub fn merge<S>(
        &self,
        shard_results: Vec<S>,
        kind: DalStatementKind,
    ) -> Result<DalMergedResult<&ShardingRule, S>, Error>
    where
        S: ShardResult,
    {
        let merged =
            DalMergeEngine::new(&self.rule, shard_results, kind, &self.merge_config).merge()?;

        Ok(merged)
    }
}

/// Expand an inline expression such as `ds_${0..1}.t_order_${0..1}`.
pub fn evaluate_inline(source: &str) -> Result<Vec<String>, Error> {
    Ok(InlineExpression::parse(source)?.evaluate())
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ShardingContext,
        config::ShardingConfig,
        core::{
            merge::{DalStatementKind, MergeConfig, MergedResult, ShardResult, VecShardResult},
            rule::{ShardingRule, TableNameMapping},
            value::{Row, Value},
        },
        evaluate_inline,
    };
}
