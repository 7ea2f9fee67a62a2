//! The min/max filter lattice.
//!
//! A filter is in one of three states, ordered
//! `AlwaysFalse < Range[min, max] < AlwaysTrue`. Every update moves a filter
//! up this order and never down, which is what makes merging independently
//! built filters safe in any order.

mod cast;
mod string;

use std::fmt;

pub use string::StringMinMaxFilter;

use crate::{
    message::FilterMessage,
    observability::log_debug,
    scalar::Scalar,
    types::ColumnType,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FilterState<T> {
    /// Nothing observed yet: rejects every range.
    AlwaysFalse,
    Range {
        min: T,
        max: T,
    },
    /// Bounds unknown or given up: accepts every range.
    AlwaysTrue,
}

/// Min/max filter over one scalar kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxFilter<T> {
    pub(crate) state: FilterState<T>,
}

impl<T: Scalar> Default for MinMaxFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> MinMaxFilter<T> {
    /// An empty filter, the identity of [`MinMaxFilter::or`].
    pub fn new() -> Self {
        MinMaxFilter {
            state: FilterState::AlwaysFalse,
        }
    }

    pub fn always_true() -> Self {
        MinMaxFilter {
            state: FilterState::AlwaysTrue,
        }
    }

    /// Panics unless `min <= max`.
    pub fn from_range(min: T, max: T) -> Self {
        assert!(
            min <= max,
            "{}MinMaxFilter built with min {min} > max {max}",
            T::NAME
        );
        MinMaxFilter {
            state: FilterState::Range { min, max },
        }
    }

    pub fn is_always_false(&self) -> bool {
        matches!(self.state, FilterState::AlwaysFalse)
    }

    pub fn is_always_true(&self) -> bool {
        matches!(self.state, FilterState::AlwaysTrue)
    }

    pub fn min(&self) -> Option<&T> {
        match &self.state {
            FilterState::Range { min, .. } => Some(min),
            _ => None,
        }
    }

    pub fn max(&self) -> Option<&T> {
        match &self.state {
            FilterState::Range { max, .. } => Some(max),
            _ => None,
        }
    }

    pub fn set_always_true(&mut self) {
        self.state = FilterState::AlwaysTrue;
    }

    /// Widen the range to include `value`. `None` is a null and is ignored.
    pub fn insert(&mut self, value: Option<T>) {
        let Some(value) = value else {
            return;
        };
        if !value.is_ordered() {
            if !self.is_always_true() {
                log_debug!(
                    component = "min_max_filter",
                    event = "filter_degraded",
                    kind = T::NAME,
                    reason = "nan_value",
                );
                self.set_always_true();
            }
            return;
        }
        match &mut self.state {
            FilterState::AlwaysTrue => {}
            FilterState::AlwaysFalse => {
                self.state = FilterState::Range {
                    min: value.clone(),
                    max: value,
                };
            }
            FilterState::Range { min, max } => {
                if value < *min {
                    *min = value;
                } else if value > *max {
                    *max = value;
                }
            }
        }
    }

    /// Join `other` into `self`.
    pub fn or(&mut self, other: &Self) {
        match (&self.state, &other.state) {
            (_, FilterState::AlwaysFalse) | (FilterState::AlwaysTrue, _) => {}
            (_, FilterState::AlwaysTrue) => self.set_always_true(),
            (FilterState::AlwaysFalse, _) => self.state = other.state.clone(),
            (FilterState::Range { .. }, FilterState::Range { min: lo, max: hi }) => {
                if let FilterState::Range { min, max } = &mut self.state {
                    // ties keep the current bound, as the wire merge does
                    if *lo < *min {
                        *min = lo.clone();
                    }
                    if *hi > *max {
                        *max = hi.clone();
                    }
                }
            }
        }
    }

    /// Whether `[data_min, data_max]` may contain a value the filter accepts.
    pub fn eval_overlap(&self, data_min: &T, data_max: &T) -> bool {
        match &self.state {
            FilterState::AlwaysFalse => false,
            FilterState::AlwaysTrue => true,
            FilterState::Range { min, max } => !(max < data_min || data_max < min),
        }
    }

    /// Estimated fraction of `[data_min, data_max]` the filter accepts.
    ///
    /// Only a cost estimate; [`MinMaxFilter::eval_overlap`] is the decision.
    pub fn compute_overlap_ratio(&self, column: &ColumnType, data_min: &T, data_max: &T) -> f32 {
        match &self.state {
            FilterState::AlwaysFalse => 0.0,
            FilterState::AlwaysTrue => 1.0,
            FilterState::Range { min, max } => {
                if max < data_min || data_max < min {
                    0.0
                } else if min <= data_min && data_max <= max {
                    1.0
                } else {
                    T::overlap_ratio(column, min, max, data_min, data_max)
                }
            }
        }
    }

    pub fn to_message(&self) -> FilterMessage {
        match &self.state {
            FilterState::AlwaysFalse => FilterMessage::bottom(),
            FilterState::AlwaysTrue => FilterMessage::top(),
            FilterState::Range { min, max } => {
                FilterMessage::ranged(min.to_value(), max.to_value())
            }
        }
    }

    /// Rebuild a filter from its wire form.
    ///
    /// Bounds of a flagged message are ignored. Panics if a ranged message
    /// lacks a bound, carries a bound of another kind, or has `min > max`.
    pub fn from_message(message: &FilterMessage) -> Self {
        if message.always_false {
            return Self::new();
        }
        if message.always_true {
            return Self::always_true();
        }
        Self::from_range(decode_bound(&message.min), decode_bound(&message.max))
    }
}

fn decode_bound<T: Scalar>(value: &Option<crate::value::Value>) -> T {
    let value = value
        .as_ref()
        .unwrap_or_else(|| panic!("ranged {} filter message without a bound", T::NAME));
    T::from_value(value).unwrap_or_else(|| {
        panic!(
            "{} bound in a {}MinMaxFilter message",
            value.type_name(),
            T::NAME
        )
    })
}

impl<T: Scalar> fmt::Display for MinMaxFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}MinMaxFilter(", T::NAME)?;
        match &self.state {
            FilterState::Range { min, max } => write!(f, "min={min}, max={max}")?,
            _ => write!(f, "min=NULL, max=NULL")?,
        }
        write!(
            f,
            ", always_false={}, always_true={})",
            self.is_always_false(),
            self.is_always_true()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scalar::Timestamp, value::Value};

    fn range(min: i32, max: i32) -> MinMaxFilter<i32> {
        MinMaxFilter::from_range(min, max)
    }

    #[test]
    fn insert_widens_range() {
        let mut filter = MinMaxFilter::<i32>::new();
        assert!(filter.is_always_false());
        assert!(!filter.eval_overlap(&i32::MIN, &i32::MAX));

        filter.insert(Some(5));
        filter.insert(None);
        filter.insert(Some(10));
        assert_eq!(filter, range(5, 10));
        assert!(filter.eval_overlap(&7, &20));
        assert!(!filter.eval_overlap(&20, &30));
        assert!(!filter.eval_overlap(&-3, &4));
        assert!(filter.eval_overlap(&10, &10));
    }

    #[test]
    fn top_absorbs_inserts() {
        let mut filter = MinMaxFilter::<i64>::always_true();
        filter.insert(Some(1));
        assert!(filter.is_always_true());
        assert_eq!(filter.min(), None);
        assert!(filter.eval_overlap(&0, &0));
        assert_eq!(filter.compute_overlap_ratio(&ColumnType::Int64, &0, &0), 1.0);
    }

    #[test]
    fn or_is_join() {
        let mut filter = MinMaxFilter::new();
        filter.or(&range(3, 8));
        assert_eq!(filter, range(3, 8));

        filter.or(&range(1, 5));
        assert_eq!(filter, range(1, 8));

        filter.or(&MinMaxFilter::new());
        assert_eq!(filter, range(1, 8));

        filter.or(&MinMaxFilter::always_true());
        assert!(filter.is_always_true());
        filter.or(&range(0, 0));
        assert!(filter.is_always_true());
    }

    #[test]
    fn nan_degrades_to_top() {
        let mut filter = MinMaxFilter::<f64>::new();
        filter.insert(Some(1.5));
        filter.insert(Some(f64::NAN));
        assert!(filter.is_always_true());
    }

    #[test]
    fn overlap_ratio() {
        let filter = range(0, 9);
        assert_eq!(filter.compute_overlap_ratio(&ColumnType::Int32, &5, &14), 0.5);
        assert_eq!(filter.compute_overlap_ratio(&ColumnType::Int32, &2, &3), 1.0);
        assert_eq!(filter.compute_overlap_ratio(&ColumnType::Int32, &10, &14), 0.0);
        assert_eq!(
            MinMaxFilter::<i32>::new().compute_overlap_ratio(&ColumnType::Int32, &0, &1),
            0.0
        );
    }

    #[test]
    fn boolean_ratio_is_binary() {
        let mut filter = MinMaxFilter::new();
        filter.insert(Some(true));
        assert_eq!(filter, MinMaxFilter::from_range(true, true));

        assert!(filter.eval_overlap(&false, &true));
        assert_eq!(filter.compute_overlap_ratio(&ColumnType::Boolean, &false, &true), 1.0);
        assert!(!filter.eval_overlap(&false, &false));
        assert_eq!(filter.compute_overlap_ratio(&ColumnType::Boolean, &false, &false), 0.0);
    }

    #[test]
    fn message_round_trip() {
        for filter in [MinMaxFilter::new(), MinMaxFilter::always_true(), range(-4, 17)] {
            assert_eq!(MinMaxFilter::from_message(&filter.to_message()), filter);
        }

        let ts = MinMaxFilter::from_range(Timestamp::new(1, 2), Timestamp::new(3, 4));
        assert_eq!(MinMaxFilter::from_message(&ts.to_message()), ts);
    }

    #[test]
    fn flagged_message_ignores_bounds() {
        let mut message = FilterMessage::bottom();
        message.min = Some(Value::Int64(9));
        message.max = Some(Value::Int64(1));
        assert!(MinMaxFilter::<i64>::from_message(&message).is_always_false());
    }

    #[test]
    #[should_panic(expected = "min 9 > max 1")]
    fn inverted_message_is_fatal() {
        let message = FilterMessage::ranged(Value::Int64(9), Value::Int64(1));
        MinMaxFilter::<i64>::from_message(&message);
    }

    #[test]
    #[should_panic(expected = "int bound in a BigIntMinMaxFilter message")]
    fn mismatched_message_is_fatal() {
        let message = FilterMessage::ranged(Value::Int32(1), Value::Int32(2));
        MinMaxFilter::<i64>::from_message(&message);
    }

    #[test]
    fn display() {
        assert_eq!(
            range(1, 2).to_string(),
            "IntMinMaxFilter(min=1, max=2, always_false=false, always_true=false)"
        );
        assert_eq!(
            MinMaxFilter::<f64>::new().to_string(),
            "DoubleMinMaxFilter(min=NULL, max=NULL, always_false=true, always_true=false)"
        );
    }
}
