//! Evaluating an integer filter against a column of another integer width.
//!
//! The filter's bounds are projected into the column kind's range instead of
//! widening every data range to the filter's kind.

use super::{FilterState, MinMaxFilter};
use crate::{
    scalar::{discrete_ratio, IntegerScalar},
    types::IntKind,
};

impl<T: IntegerScalar> MinMaxFilter<T> {
    /// Project the accepted range onto `target`.
    ///
    /// `None` means no value the filter accepts is representable in `target`,
    /// so nothing of that kind can overlap. Top projects to the full range of
    /// `target`, Bottom to `None`.
    pub fn cast_int_bounds(&self, target: IntKind) -> Option<(i64, i64)> {
        let (lower, upper) = (target.min_value(), target.max_value());
        let (min, max) = match &self.state {
            FilterState::AlwaysFalse => return None,
            FilterState::AlwaysTrue => return Some((lower, upper)),
            FilterState::Range { min, max } => (min.to_i64(), max.to_i64()),
        };
        if T::INT_KIND == target {
            return Some((min, max));
        }

        let min = if min < lower {
            lower
        } else if min > upper {
            return None;
        } else {
            min
        };
        let max = if max > upper {
            upper
        } else if max < lower {
            return None;
        } else {
            max
        };
        Some((min, max))
    }

    /// [`MinMaxFilter::eval_overlap`] for a data range of kind `target`.
    pub fn eval_overlap_int(&self, target: IntKind, data_min: i64, data_max: i64) -> bool {
        match self.cast_int_bounds(target) {
            Some((min, max)) => !(max < data_min || data_max < min),
            None => false,
        }
    }

    /// [`MinMaxFilter::compute_overlap_ratio`] for a data range of kind
    /// `target`.
    pub fn compute_overlap_ratio_int(&self, target: IntKind, data_min: i64, data_max: i64) -> f32 {
        if self.is_always_true() {
            return 1.0;
        }
        match self.cast_int_bounds(target) {
            Some((min, max)) if !(max < data_min || data_max < min) => {
                if min <= data_min && data_max <= max {
                    1.0
                } else {
                    discrete_ratio(min as i128, max as i128, data_min as i128, data_max as i128)
                }
            }
            _ => 0.0,
        }
    }
}
