//! Per-kind scalar codecs.
//!
//! Every kind a filter can be built over implements [`Scalar`]: its order,
//! its conversion to and from the wire [`Value`], and the overlap-ratio
//! heuristic for that kind. The lattice in [`crate::filter`] is generic over
//! this trait, so the hot evaluation path is statically dispatched.

mod bytes;
mod datetime;
mod decimal;
mod num;

use std::fmt;

pub use bytes::Bytes;
pub use datetime::{Date, Timestamp, NANOS_PER_DAY};
pub use decimal::{Decimal16, Decimal4, Decimal8};

use crate::{
    types::{ColumnType, IntKind},
    value::Value,
};

/// A scalar kind a min/max filter can track.
///
/// Ordering comes from `PartialOrd`; only values for which
/// [`Scalar::is_ordered`] holds are ever stored as bounds.
pub trait Scalar: PartialOrd + Clone + fmt::Debug + fmt::Display + Send + Sync {
    /// Column type this scalar belongs to, used for debug strings.
    const NAME: &'static str;

    /// `false` for values without a meaningful position in the order (NaN).
    fn is_ordered(&self) -> bool {
        true
    }

    fn to_value(&self) -> Value;

    /// Decode from the wire union, `None` if `value` is another variant.
    fn from_value(value: &Value) -> Option<Self>;

    /// Fraction of `[data_min, data_max]` covered by `[filter_min, filter_max]`.
    ///
    /// Only called once the ranges are known to overlap without the filter
    /// covering the data range.
    fn overlap_ratio(
        column: &ColumnType,
        filter_min: &Self,
        filter_max: &Self,
        data_min: &Self,
        data_max: &Self,
    ) -> f32;
}

/// Signed integers whose bounds can be projected onto another integer width.
pub trait IntegerScalar: Scalar + Copy {
    const INT_KIND: IntKind;

    fn to_i64(self) -> i64;
}

/// Inclusive discrete-range ratio `(overlap + 1) / (data + 1)`.
///
/// Computed in 128 bits so full-domain 64-bit ranges cannot overflow.
pub(crate) fn discrete_ratio(
    filter_min: i128,
    filter_max: i128,
    data_min: i128,
    data_max: i128,
) -> f32 {
    let overlap_min = filter_min.max(data_min);
    let overlap_max = filter_max.min(data_max);
    ((overlap_max - overlap_min + 1) as f64 / (data_max - data_min + 1) as f64) as f32
}

/// The same "+1" formula applied to floating projections.
///
/// Infinite bounds give a non-finite quotient, which is reported as a full
/// overlap.
pub(crate) fn approximate_ratio(
    filter_min: f64,
    filter_max: f64,
    data_min: f64,
    data_max: f64,
) -> f32 {
    let overlap_min = filter_min.max(data_min);
    let overlap_max = filter_max.min(data_max);
    let ratio = (overlap_max - overlap_min + 1.0) / (data_max - data_min + 1.0);
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0) as f32
    } else {
        1.0
    }
}
