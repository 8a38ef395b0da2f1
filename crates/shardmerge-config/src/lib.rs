//! TOML sharding configuration for shardmerge.
//!
//! ```toml
//! data_sources = "ds_${0..1}"
//! default_data_source = "ds_0"
//!
//! [merge]
//! logical_database = "sharding_db"
//!
//! [[tables]]
//! logical_table = "t_order"
//! actual_data_nodes = "ds_${0..1}.t_order_${0..1}"
//! ```


use serde::{Deserialize, Serialize};
use shardmerge_core::{
    merge::MergeConfig,
    rule::{RuleError, ShardingRule, TableRule},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("data_sources expression is empty")]
    EmptyDataSources,

    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

///
/// ShardingConfig
///
/// Root of a sharding config file. Unknown keys are rejected.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShardingConfig {
    /// Inline expression naming every data source, e.g. `ds_${0..1}`.
    pub data_sources: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_data_source: Option<String>,

    #[serde(default)]
    pub merge: MergeConfig,

    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl ShardingConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Expand every inline expression and build the validated rule set.
    pub fn build_rule(&self) -> Result<ShardingRule, ConfigError> {
        if self.data_sources.trim().is_empty() {
            return Err(ConfigError::EmptyDataSources);
        }

        let data_sources = ShardingRule::expand_data_sources(&self.data_sources)?;
        let table_rules = self
            .tables
            .iter()
            .map(|table| table.build(&data_sources))
            .collect::<Result<Vec<_>, _>>()?;

        let rule = ShardingRule::new(data_sources, table_rules)?;
        let rule = match self.default_data_source.as_deref() {
            Some(data_source) => rule.with_default_data_source(data_source)?,
            None => rule,
        };

        Ok(rule)
    }

    #[must_use]
    pub fn merge_config(&self) -> MergeConfig {
        self.merge.clone()
    }
}

///
/// TableConfig
///
/// One `[[tables]]` entry. Without `actual_data_nodes` the logical table
/// lives under its own name in every data source.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub logical_table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_data_nodes: Option<String>,
}

impl TableConfig {
    fn build(&self, data_sources: &[String]) -> Result<TableRule, RuleError> {
        TableRule::from_expression(
            self.logical_table.as_str(),
            self.actual_data_nodes.as_deref(),
            data_sources,
        )
    }
}
