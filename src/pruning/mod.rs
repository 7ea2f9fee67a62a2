//! Consumer-side row-group pruning.
//!
//! A frozen [`RuntimeFilter`] is evaluated against the min/max statistics of
//! each Parquet row group, so row groups that cannot hold a value passing the
//! filter are never read. Implementations live behind the [`Pruner`] trait;
//! any pruning failure falls back to scanning every row group, which is
//! always correct.

pub mod config;
mod minmax;
mod noop;

use parquet::file::metadata::ParquetMetaData;
use thiserror::Error;

pub use self::{
    config::{PrunerPolicy, PruningConfig},
    minmax::MinMaxPruner,
    noop::NoopPruner,
};
use crate::{runtime::RuntimeFilter, types::ColumnType};

/// Input bundle for pruning decisions.
pub struct PruneInput<'a> {
    /// Parquet metadata for the file being scanned.
    pub metadata: &'a ParquetMetaData,
    /// Leaf column index of the filtered column in the Parquet schema.
    pub column_index: usize,
    /// Logical type of the filtered column.
    pub column_type: ColumnType,
    /// Frozen filter built on the other side of the query.
    pub filter: &'a RuntimeFilter,
}

/// Result of a pruning pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PruneOutput {
    /// Row groups selected for scanning.
    pub row_groups: Vec<usize>,
    /// Estimated fraction of the selected rows the filter accepts, weighted
    /// by row-group size.
    pub overlap_ratio: f32,
    /// `false` when the filter is expected to reject too few rows to be worth
    /// evaluating row by row.
    pub filter_effective: bool,
}

/// Errors raised by pruning implementations.
#[derive(Debug, Error)]
pub enum PruneError {
    /// Generic pruning failure.
    #[error("pruning failed: {0}")]
    Message(String),
}

impl PruneError {
    /// Construct a pruning error from a message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}

/// Pruning abstraction boundary for the scan.
pub trait Pruner {
    /// Compute the row-group selection for a Parquet file.
    fn prune(&self, input: &PruneInput<'_>) -> Result<PruneOutput, PruneError>;
}

/// Registry/factory for pruning implementations.
#[derive(Clone, Debug, Default)]
pub struct PrunerRegistry {
    config: PruningConfig,
}

impl PrunerRegistry {
    /// Create a registry with an explicit configuration.
    pub fn new(config: PruningConfig) -> Self {
        Self { config }
    }

    /// Run pruning using the selected policy, falling back to a full scan on
    /// errors.
    pub fn prune_or_all(&self, input: &PruneInput<'_>) -> PruneOutput {
        let result = match self.config.resolve_policy() {
            PrunerPolicy::MinMax => MinMaxPruner::new(self.config.clone()).prune(input),
            PrunerPolicy::Noop => NoopPruner.prune(input),
        };
        result.unwrap_or_else(|err| {
            crate::observability::log_warn!(
                component = "pruning",
                event = "prune_failed",
                error = %err,
            );
            read_all(input.metadata)
        })
    }
}

pub(crate) fn read_all(metadata: &ParquetMetaData) -> PruneOutput {
    let row_groups = (0..metadata.num_row_groups()).collect();
    PruneOutput {
        row_groups,
        overlap_ratio: 1.0,
        filter_effective: true,
    }
}

/// Run pruning using the default configuration, falling back to a full scan
/// on errors.
pub fn prune_or_all(input: &PruneInput<'_>) -> PruneOutput {
    PrunerRegistry::default().prune_or_all(input)
}
