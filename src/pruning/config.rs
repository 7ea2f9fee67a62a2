//! Pruning configuration.

/// Policy for selecting pruning implementations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrunerPolicy {
    /// Compare the filter against column-chunk min/max statistics.
    MinMax,
    /// Always scan every row group (baseline).
    Noop,
}

/// Configuration for row-group pruning.
#[derive(Clone, Debug)]
pub struct PruningConfig {
    pub(crate) policy: PrunerPolicy,
    pub(crate) no_pruning: bool,
    pub(crate) overlap_threshold: f32,
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self {
            policy: PrunerPolicy::MinMax,
            no_pruning: false,
            overlap_threshold: 0.0,
        }
    }
}

impl PruningConfig {
    pub fn policy(self, policy: PrunerPolicy) -> Self {
        PruningConfig { policy, ..self }
    }

    /// Scan every row group regardless of policy.
    pub fn no_pruning(self, no_pruning: bool) -> Self {
        PruningConfig { no_pruning, ..self }
    }

    /// Rows-weighted overlap ratio at or above which the filter is reported
    /// as not worth evaluating row by row. `0.0` disables the check.
    ///
    /// Panics unless `overlap_threshold` is within `0.0..=1.0`.
    pub fn overlap_threshold(self, overlap_threshold: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&overlap_threshold),
            "overlap_threshold out of range: {overlap_threshold}"
        );
        PruningConfig {
            overlap_threshold,
            ..self
        }
    }

    /// Resolve the effective policy.
    pub(crate) fn resolve_policy(&self) -> PrunerPolicy {
        if self.no_pruning {
            return PrunerPolicy::Noop;
        }
        self.policy
    }

    /// Whether a filter with this selected-rows overlap still pays off.
    pub(crate) fn is_effective(&self, overlap_ratio: f32) -> bool {
        self.overlap_threshold <= 0.0 || overlap_ratio < self.overlap_threshold
    }
}
