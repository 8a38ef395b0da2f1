use crate::{
    inline::InlineExpression,
    rule::{DataNode, RuleError},
};

///
/// TableRule
///
/// One logical table and the physical data nodes backing it, in the order
/// the node expression produced them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableRule {
    logical_table: String,
    actual_data_nodes: Vec<DataNode>,
}

impl TableRule {
    /// Build a rule from explicit nodes; at least one node is required.
    pub fn new(
        logical_table: impl Into<String>,
        actual_data_nodes: Vec<DataNode>,
    ) -> Result<Self, RuleError> {
        let logical_table = logical_table.into();
        if actual_data_nodes.is_empty() {
            return Err(RuleError::EmptyActualDataNodes { logical_table });
        }

        Ok(Self {
            logical_table,
            actual_data_nodes,
        })
    }

    /// Build a rule from an inline node expression such as
    /// `ds_${0..1}.t_order_${0..1}`.
    ///
    /// Without an expression every data source holds one table named after
    /// the logical table.
    pub fn from_expression(
        logical_table: impl Into<String>,
        actual_data_nodes: Option<&str>,
        data_sources: &[String],
    ) -> Result<Self, RuleError> {
        let logical_table = logical_table.into();

        let nodes = match actual_data_nodes {
            Some(expression) => InlineExpression::parse(expression)
                .map_err(|source| RuleError::ActualDataNodes {
                    logical_table: logical_table.clone(),
                    source,
                })?
                .evaluate()
                .iter()
                .map(|node| DataNode::parse(node))
                .collect::<Result<Vec<_>, _>>()?,
            None => data_sources
                .iter()
                .map(|data_source| DataNode::new(data_source.as_str(), logical_table.as_str()))
                .collect(),
        };

        Self::new(logical_table, nodes)
    }

    #[must_use]
    pub fn logical_table(&self) -> &str {
        &self.logical_table
    }

    #[must_use]
    pub fn actual_data_nodes(&self) -> &[DataNode] {
        &self.actual_data_nodes
    }

    /// Distinct physical table names, first-seen order.
    #[must_use]
    pub fn actual_table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for node in &self.actual_data_nodes {
            if !names.contains(&node.table()) {
                names.push(node.table());
            }
        }

        names
    }

    /// Distinct data sources this rule touches, first-seen order.
    #[must_use]
    pub fn data_source_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for node in &self.actual_data_nodes {
            if !names.contains(&node.data_source()) {
                names.push(node.data_source());
            }
        }

        names
    }

    /// ASCII-case-insensitive membership test for a physical table name.
    #[must_use]
    pub fn contains_actual_table(&self, actual_table: &str) -> bool {
        self.actual_data_nodes
            .iter()
            .any(|node| node.table().eq_ignore_ascii_case(actual_table))
    }
}
