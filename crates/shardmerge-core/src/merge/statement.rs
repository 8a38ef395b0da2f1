use serde::{Deserialize, Serialize};

///
/// DalStatementKind
///
/// Structural kind of a DAL statement, as classified by the SQL parser.
/// The merge engine branches on this tag only; it never reads SQL text.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum DalStatementKind {
    /// Any statement without a multi-shard reconciliation rule.
    #[default]
    Other,
    ShowCreateTable,
    ShowDatabases,
    ShowTables,
}
