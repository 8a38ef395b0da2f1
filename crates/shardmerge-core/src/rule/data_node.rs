use crate::rule::RuleError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// DataNode
///
/// One physical table inside one data source, spelled `data_source.table`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DataNode {
    data_source: String,
    table: String,
}

impl DataNode {
    #[must_use]
    pub fn new(data_source: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            table: table.into(),
        }
    }

    /// Parse `data_source.table`; exactly one dot with non-empty sides.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        let malformed = || RuleError::MalformedDataNode {
            node: text.to_string(),
        };

        let (data_source, table) = text.split_once('.').ok_or_else(malformed)?;
        let (data_source, table) = (data_source.trim(), table.trim());
        if data_source.is_empty() || table.is_empty() || table.contains('.') {
            return Err(malformed());
        }

        Ok(Self::new(data_source, table))
    }

    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl FromStr for DataNode {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DataNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.data_source, self.table)
    }
}
