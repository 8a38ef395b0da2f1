//! Module: merge::engine
//! Responsibility: pick the merged-result variant for a DAL statement kind.
//! Does not own: row production, which lives in each variant.
//! Boundary: the only constructor callers need; never closes shard results
//! it does not consume.

use crate::{
    merge::{
        ColumnLabels, CreateTableMergedResult, DalStatementKind, FixedRowMergedResult,
        MergeConfig, MergeError, MergedResult, PassthroughMergedResult, ShardResult,
        TableListMergedResult,
    },
    obs::sink::{MergeKind, MetricsEvent, record},
    rule::TableNameMapping,
    value::Value,
};

///
/// DalMergeEngine
///
/// Statement-aware dispatcher over the shard results of one DAL statement.
/// Pass `&mut` shard handles to keep ownership of cursors the merge leaves
/// unread.
///

pub struct DalMergeEngine<M, S> {
    mapping: M,
    shard_results: Vec<S>,
    kind: DalStatementKind,
    logical_database: String,
}

impl<M, S> DalMergeEngine<M, S>
where
    M: TableNameMapping,
    S: ShardResult,
{
    #[must_use]
    pub fn new(
        mapping: M,
        shard_results: Vec<S>,
        kind: DalStatementKind,
        config: &MergeConfig,
    ) -> Self {
        Self {
            mapping,
            shard_results,
            kind,
            logical_database: config.logical_database.clone(),
        }
    }

    /// Build the merged result. Fails only when the column metadata of the
    /// first consulted shard result cannot be read.
    pub fn merge(self) -> Result<DalMergedResult<M, S>, MergeError> {
        let kind = merge_kind(self.kind);
        record(MetricsEvent::MergeStart {
            kind,
            shard_results: count_u64(self.shard_results.len()),
        });

        let merged = match self.kind {
            DalStatementKind::ShowDatabases => {
                record_discarded(self.shard_results.len());
                DalMergedResult::FixedRow(FixedRowMergedResult::new(&self.logical_database))
            }
            DalStatementKind::ShowTables => DalMergedResult::TableList(
                TableListMergedResult::new(self.mapping, self.shard_results)?,
            ),
            DalStatementKind::ShowCreateTable => DalMergedResult::CreateTable(
                CreateTableMergedResult::new(self.mapping, self.shard_results)?,
            ),
            DalStatementKind::Other => {
                let mut shard_results = self.shard_results.into_iter();
                let first = shard_results.next();
                record_discarded(shard_results.len());

                DalMergedResult::Passthrough(PassthroughMergedResult::new(first)?)
            }
        };

        Ok(merged)
    }
}

const fn merge_kind(kind: DalStatementKind) -> MergeKind {
    match kind {
        DalStatementKind::ShowDatabases => MergeKind::FixedRow,
        DalStatementKind::ShowTables => MergeKind::TableList,
        DalStatementKind::ShowCreateTable => MergeKind::CreateTable,
        DalStatementKind::Other => MergeKind::Passthrough,
    }
}

fn record_discarded(count: usize) {
    if count > 0 {
        record(MetricsEvent::ShardResultsDiscarded {
            count: count_u64(count),
        });
    }
}

fn count_u64(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

///
/// DalMergedResult
///
/// The merged result selected by `DalMergeEngine`.
///

pub enum DalMergedResult<M, S> {
    FixedRow(FixedRowMergedResult),
    TableList(TableListMergedResult<M, S>),
    CreateTable(CreateTableMergedResult<M, S>),
    Passthrough(PassthroughMergedResult<S>),
}

impl<M, S> DalMergedResult<M, S> {
    /// Variant label, as reported in metrics.
    #[must_use]
    pub const fn variant_label(&self) -> &'static str {
        let kind = match self {
            Self::FixedRow(_) => MergeKind::FixedRow,
            Self::TableList(_) => MergeKind::TableList,
            Self::CreateTable(_) => MergeKind::CreateTable,
            Self::Passthrough(_) => MergeKind::Passthrough,
        };

        kind.label()
    }
}

impl<M, S> MergedResult for DalMergedResult<M, S>
where
    M: TableNameMapping,
    S: ShardResult,
{
    fn advance(&mut self) -> Result<bool, MergeError> {
        match self {
            Self::FixedRow(inner) => inner.advance(),
            Self::TableList(inner) => inner.advance(),
            Self::CreateTable(inner) => inner.advance(),
            Self::Passthrough(inner) => inner.advance(),
        }
    }

    fn value(&self, index: usize) -> Result<Value, MergeError> {
        match self {
            Self::FixedRow(inner) => inner.value(index),
            Self::TableList(inner) => inner.value(index),
            Self::CreateTable(inner) => inner.value(index),
            Self::Passthrough(inner) => inner.value(index),
        }
    }

    fn columns(&self) -> &ColumnLabels {
        match self {
            Self::FixedRow(inner) => inner.columns(),
            Self::TableList(inner) => inner.columns(),
            Self::CreateTable(inner) => inner.columns(),
            Self::Passthrough(inner) => inner.columns(),
        }
    }
}
