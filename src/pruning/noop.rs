//! No-op pruning implementation.

use crate::pruning::{read_all, PruneError, PruneInput, PruneOutput, Pruner};

/// Pruner that always scans all row groups.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPruner;

impl Pruner for NoopPruner {
    fn prune(&self, input: &PruneInput<'_>) -> Result<PruneOutput, PruneError> {
        Ok(read_all(input.metadata))
    }
}
