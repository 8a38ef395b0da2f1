//! Module: rule
//! Responsibility: logical/actual table name mapping built from sharding
//! configuration.
//! Does not own: routing decisions or sharding algorithms.
//! Boundary: the merge engine reads it only through `TableNameMapping`.

mod data_node;
mod table_rule;

#[cfg(test)]
mod tests;

use crate::inline::{InlineExpression, InlineExpressionError};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error as ThisError;

// re-exports
pub use data_node::DataNode;
pub use table_rule::TableRule;

///
/// RuleError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RuleError {
    #[error("malformed data node '{node}': expected 'data_source.table'")]
    MalformedDataNode { node: String },

    #[error("logical table '{logical_table}' has no actual data nodes")]
    EmptyActualDataNodes { logical_table: String },

    #[error("invalid actual data nodes for logical table '{logical_table}': {source}")]
    ActualDataNodes {
        logical_table: String,
        #[source]
        source: InlineExpressionError,
    },

    #[error("invalid data source expression: {0}")]
    DataSources(#[source] InlineExpressionError),

    #[error("sharding rule declares no data sources")]
    NoDataSources,

    #[error("logical table '{logical_table}' is declared more than once")]
    DuplicateLogicalTable { logical_table: String },

    #[error("logical table '{logical_table}' references undeclared data source '{data_source}'")]
    UnknownDataSource {
        logical_table: String,
        data_source: String,
    },

    #[error("default data source '{data_source}' is not declared")]
    UnknownDefaultDataSource { data_source: String },
}

///
/// TableNameMapping
///
/// Read-only actual → logical table lookup consumed by the merge engine.
///

pub trait TableNameMapping {
    /// Logical table backed by `actual_table`, or `None` when the table is
    /// not managed by sharding.
    fn logical_table_of(&self, actual_table: &str) -> Option<&str>;
}

impl<T> TableNameMapping for &T
where
    T: TableNameMapping + ?Sized,
{
    fn logical_table_of(&self, actual_table: &str) -> Option<&str> {
        (**self).logical_table_of(actual_table)
    }
}

// Explicit actual → logical pairs; matching is exact.
impl TableNameMapping for BTreeMap<String, String> {
    fn logical_table_of(&self, actual_table: &str) -> Option<&str> {
        self.get(actual_table).map(String::as_str)
    }
}

///
/// ShardingRule
///
/// Data sources plus table rules, indexed for actual-table lookups.
/// Table-name matching is ASCII-case-insensitive.
///

#[derive(Clone, Debug)]
pub struct ShardingRule {
    data_sources: Vec<String>,
    default_data_source: Option<String>,
    table_rules: Vec<TableRule>,

    // lowercased actual table -> index into `table_rules`; first rule wins
    actual_index: HashMap<String, usize>,
}

impl ShardingRule {
    /// Build and validate a rule set.
    pub fn new(data_sources: Vec<String>, table_rules: Vec<TableRule>) -> Result<Self, RuleError> {
        if data_sources.is_empty() {
            return Err(RuleError::NoDataSources);
        }

        let mut actual_index = HashMap::new();
        for (index, rule) in table_rules.iter().enumerate() {
            let duplicate = table_rules[..index]
                .iter()
                .any(|prior| prior.logical_table().eq_ignore_ascii_case(rule.logical_table()));
            if duplicate {
                return Err(RuleError::DuplicateLogicalTable {
                    logical_table: rule.logical_table().to_string(),
                });
            }

            for node in rule.actual_data_nodes() {
                if !data_sources.iter().any(|ds| ds == node.data_source()) {
                    return Err(RuleError::UnknownDataSource {
                        logical_table: rule.logical_table().to_string(),
                        data_source: node.data_source().to_string(),
                    });
                }

                actual_index
                    .entry(node.table().to_ascii_lowercase())
                    .or_insert(index);
            }
        }

        Ok(Self {
            data_sources,
            default_data_source: None,
            table_rules,
            actual_index,
        })
    }

    /// Build a rule set whose data sources come from an inline expression
    /// such as `ds_${0..1}`.
    pub fn from_data_source_expression(
        data_sources: &str,
        table_rules: Vec<TableRule>,
    ) -> Result<Self, RuleError> {
        Self::new(Self::expand_data_sources(data_sources)?, table_rules)
    }

    /// Expand a data source expression such as `ds_${0..1}` into names.
    pub fn expand_data_sources(expression: &str) -> Result<Vec<String>, RuleError> {
        Ok(InlineExpression::parse(expression)
            .map_err(RuleError::DataSources)?
            .evaluate())
    }

    /// Set the data source used for tables without a rule.
    pub fn with_default_data_source(mut self, data_source: &str) -> Result<Self, RuleError> {
        if !self.data_sources.iter().any(|ds| ds == data_source) {
            return Err(RuleError::UnknownDefaultDataSource {
                data_source: data_source.to_string(),
            });
        }
        self.default_data_source = Some(data_source.to_string());

        Ok(self)
    }

    #[must_use]
    pub fn data_source_names(&self) -> &[String] {
        &self.data_sources
    }

    #[must_use]
    pub fn default_data_source(&self) -> Option<&str> {
        self.default_data_source.as_deref()
    }

    #[must_use]
    pub fn table_rules(&self) -> &[TableRule] {
        &self.table_rules
    }

    #[must_use]
    pub fn find_table_rule_by_logical_table(&self, logical_table: &str) -> Option<&TableRule> {
        self.table_rules
            .iter()
            .find(|rule| rule.logical_table().eq_ignore_ascii_case(logical_table))
    }

    #[must_use]
    pub fn find_table_rule_by_actual_table(&self, actual_table: &str) -> Option<&TableRule> {
        self.actual_index
            .get(&actual_table.to_ascii_lowercase())
            .map(|index| &self.table_rules[*index])
    }

    /// Physical table names of a logical table, first-seen order.
    #[must_use]
    pub fn actual_tables_of(&self, logical_table: &str) -> Option<Vec<&str>> {
        self.find_table_rule_by_logical_table(logical_table)
            .map(TableRule::actual_table_names)
    }
}

impl TableNameMapping for ShardingRule {
    fn logical_table_of(&self, actual_table: &str) -> Option<&str> {
        self.find_table_rule_by_actual_table(actual_table)
            .map(TableRule::logical_table)
    }
}
