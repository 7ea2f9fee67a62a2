//! Type-indexed factory and dynamic dispatch over every filter kind.
//!
//! The planner picks the [`ColumnType`]; [`RuntimeFilter`] selects the matching
//! [`MinMaxFilter`] instantiation once, so producers and consumers that only
//! know the type at runtime can still insert, merge and evaluate. A value or
//! column of the wrong kind reaching these methods is a planner bug and
//! panics.

use std::fmt;

use arrow::{
    array::{Array, ArrowPrimitiveType, AsArray},
    datatypes::{
        DataType, Date32Type, Decimal128Type, Float32Type, Float64Type, Int16Type, Int32Type,
        Int64Type, Int8Type, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
        TimestampNanosecondType, TimestampSecondType,
    },
};

use crate::{
    error::FilterError,
    filter::{MinMaxFilter, StringMinMaxFilter},
    message::FilterMessage,
    observability::log_debug,
    option::FilterOptions,
    scalar::{Date, Decimal16, Decimal4, Decimal8, IntegerScalar, Scalar, Timestamp},
    types::{ColumnType, DecimalWidth, IntKind, MAX_DECIMAL_PRECISION},
    value::ValueRef,
};

/// A min/max filter over any supported column type.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeFilter {
    Boolean(MinMaxFilter<bool>),
    Int8(MinMaxFilter<i8>),
    Int16(MinMaxFilter<i16>),
    Int32(MinMaxFilter<i32>),
    Int64(MinMaxFilter<i64>),
    Float(MinMaxFilter<f32>),
    Double(MinMaxFilter<f64>),
    String(StringMinMaxFilter<'static>),
    Timestamp(MinMaxFilter<Timestamp>),
    Date(MinMaxFilter<Date>),
    Decimal4(MinMaxFilter<Decimal4>),
    Decimal8(MinMaxFilter<Decimal8>),
    Decimal16(MinMaxFilter<Decimal16>),
}

/// Apply `$body` to the inner filter of every kind but `String`, binding it
/// to `$filter`.
macro_rules! dispatch_scalar {
    ($self:expr, $filter:ident => $body:expr, $string:ident => $string_body:expr) => {
        match $self {
            RuntimeFilter::Boolean($filter) => $body,
            RuntimeFilter::Int8($filter) => $body,
            RuntimeFilter::Int16($filter) => $body,
            RuntimeFilter::Int32($filter) => $body,
            RuntimeFilter::Int64($filter) => $body,
            RuntimeFilter::Float($filter) => $body,
            RuntimeFilter::Double($filter) => $body,
            RuntimeFilter::Timestamp($filter) => $body,
            RuntimeFilter::Date($filter) => $body,
            RuntimeFilter::Decimal4($filter) => $body,
            RuntimeFilter::Decimal8($filter) => $body,
            RuntimeFilter::Decimal16($filter) => $body,
            RuntimeFilter::String($string) => $string_body,
        }
    };
}

impl RuntimeFilter {
    /// An empty (always-false) filter for `column`.
    pub fn new(column: &ColumnType, options: &FilterOptions) -> Self {
        match column {
            ColumnType::Boolean => RuntimeFilter::Boolean(MinMaxFilter::new()),
            ColumnType::Int8 => RuntimeFilter::Int8(MinMaxFilter::new()),
            ColumnType::Int16 => RuntimeFilter::Int16(MinMaxFilter::new()),
            ColumnType::Int32 => RuntimeFilter::Int32(MinMaxFilter::new()),
            ColumnType::Int64 => RuntimeFilter::Int64(MinMaxFilter::new()),
            ColumnType::Float => RuntimeFilter::Float(MinMaxFilter::new()),
            ColumnType::Double => RuntimeFilter::Double(MinMaxFilter::new()),
            ColumnType::String => RuntimeFilter::String(StringMinMaxFilter::new(options)),
            ColumnType::Timestamp => RuntimeFilter::Timestamp(MinMaxFilter::new()),
            ColumnType::Date => RuntimeFilter::Date(MinMaxFilter::new()),
            ColumnType::Decimal { precision, .. } => {
                match DecimalWidth::from_precision(*precision) {
                    DecimalWidth::W4 => RuntimeFilter::Decimal4(MinMaxFilter::new()),
                    DecimalWidth::W8 => RuntimeFilter::Decimal8(MinMaxFilter::new()),
                    DecimalWidth::W16 => RuntimeFilter::Decimal16(MinMaxFilter::new()),
                }
            }
        }
    }

    /// Rebuild a filter for `column` from its wire form.
    ///
    /// Panics if a ranged message carries bounds of another kind or
    /// `min > max`.
    pub fn from_message(
        message: &FilterMessage,
        column: &ColumnType,
        options: &FilterOptions,
    ) -> Self {
        match column {
            ColumnType::Boolean => RuntimeFilter::Boolean(MinMaxFilter::from_message(message)),
            ColumnType::Int8 => RuntimeFilter::Int8(MinMaxFilter::from_message(message)),
            ColumnType::Int16 => RuntimeFilter::Int16(MinMaxFilter::from_message(message)),
            ColumnType::Int32 => RuntimeFilter::Int32(MinMaxFilter::from_message(message)),
            ColumnType::Int64 => RuntimeFilter::Int64(MinMaxFilter::from_message(message)),
            ColumnType::Float => RuntimeFilter::Float(MinMaxFilter::from_message(message)),
            ColumnType::Double => RuntimeFilter::Double(MinMaxFilter::from_message(message)),
            ColumnType::String => {
                RuntimeFilter::String(StringMinMaxFilter::from_message(message, options))
            }
            ColumnType::Timestamp => RuntimeFilter::Timestamp(MinMaxFilter::from_message(message)),
            ColumnType::Date => RuntimeFilter::Date(MinMaxFilter::from_message(message)),
            ColumnType::Decimal { precision, .. } => {
                match DecimalWidth::from_precision(*precision) {
                    DecimalWidth::W4 => {
                        RuntimeFilter::Decimal4(MinMaxFilter::from_message(message))
                    }
                    DecimalWidth::W8 => {
                        RuntimeFilter::Decimal8(MinMaxFilter::from_message(message))
                    }
                    DecimalWidth::W16 => {
                        RuntimeFilter::Decimal16(MinMaxFilter::from_message(message))
                    }
                }
            }
        }
    }

    /// Name of the scalar kind this filter tracks.
    pub fn kind(&self) -> &'static str {
        fn name<T: Scalar>(_: &MinMaxFilter<T>) -> &'static str {
            T::NAME
        }
        dispatch_scalar!(self, filter => name(filter), _filter => "String")
    }

    /// Whether ranges of `column` can be evaluated against this filter.
    pub fn accepts_column(&self, column: &ColumnType) -> bool {
        match self {
            RuntimeFilter::Int8(_)
            | RuntimeFilter::Int16(_)
            | RuntimeFilter::Int32(_)
            | RuntimeFilter::Int64(_) => column.int_kind().is_some(),
            RuntimeFilter::Boolean(_) => matches!(column, ColumnType::Boolean),
            RuntimeFilter::Float(_) => matches!(column, ColumnType::Float),
            RuntimeFilter::Double(_) => matches!(column, ColumnType::Double),
            RuntimeFilter::String(_) => matches!(column, ColumnType::String),
            RuntimeFilter::Timestamp(_) => matches!(column, ColumnType::Timestamp),
            RuntimeFilter::Date(_) => matches!(column, ColumnType::Date),
            RuntimeFilter::Decimal4(_) => column.decimal_width() == Some(DecimalWidth::W4),
            RuntimeFilter::Decimal8(_) => column.decimal_width() == Some(DecimalWidth::W8),
            RuntimeFilter::Decimal16(_) => column.decimal_width() == Some(DecimalWidth::W16),
        }
    }

    pub fn is_always_false(&self) -> bool {
        dispatch_scalar!(
            self,
            filter => filter.is_always_false(),
            filter => filter.is_always_false()
        )
    }

    pub fn is_always_true(&self) -> bool {
        dispatch_scalar!(
            self,
            filter => filter.is_always_true(),
            filter => filter.is_always_true()
        )
    }

    pub fn set_always_true(&mut self) {
        dispatch_scalar!(
            self,
            filter => filter.set_always_true(),
            filter => filter.set_always_true()
        )
    }

    /// Widen the filter to include `value`; `None` is a null and ignored.
    ///
    /// A string value is copied into the filter right away, since a
    /// `RuntimeFilter` outlives the batch the value came from.
    pub fn insert(&mut self, value: Option<ValueRef<'_>>) {
        let Some(value) = value else {
            return;
        };
        match self {
            RuntimeFilter::Boolean(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Int8(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Int16(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Int32(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Int64(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Float(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Double(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Timestamp(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Date(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Decimal4(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Decimal8(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::Decimal16(filter) => filter.insert(Some(typed(value))),
            RuntimeFilter::String(filter) => {
                let bytes = string_value(value);
                filter.update(|scoped| scoped.insert(Some(bytes)));
            }
        }
    }

    /// Insert every non-null slot of `array`.
    ///
    /// String and binary arrays are inserted without copying and the bounds
    /// are materialized once at the end. Timestamps of any unit are accepted;
    /// decimals must have a precision of this filter's width.
    pub fn insert_array(&mut self, array: &dyn Array) -> Result<(), FilterError> {
        let datatype = array.data_type();
        if !self.accepts(datatype) {
            return Err(FilterError::ArrayTypeMismatch {
                expected: self.kind().to_string(),
                actual: datatype.to_string(),
            });
        }
        if self.is_always_true() {
            return Ok(());
        }

        match self {
            RuntimeFilter::Boolean(filter) => {
                array.as_boolean().iter().for_each(|v| filter.insert(v))
            }
            RuntimeFilter::Int8(filter) => insert_primitive::<Int8Type>(filter, array),
            RuntimeFilter::Int16(filter) => insert_primitive::<Int16Type>(filter, array),
            RuntimeFilter::Int32(filter) => insert_primitive::<Int32Type>(filter, array),
            RuntimeFilter::Int64(filter) => insert_primitive::<Int64Type>(filter, array),
            RuntimeFilter::Float(filter) => insert_primitive::<Float32Type>(filter, array),
            RuntimeFilter::Double(filter) => insert_primitive::<Float64Type>(filter, array),
            RuntimeFilter::Date(filter) => array
                .as_primitive::<Date32Type>()
                .iter()
                .for_each(|v| filter.insert(v.map(Date))),
            RuntimeFilter::Timestamp(filter) => {
                let DataType::Timestamp(unit, _) = datatype else {
                    unreachable!()
                };
                match unit {
                    TimeUnit::Second => {
                        insert_timestamps::<TimestampSecondType>(filter, array, *unit)
                    }
                    TimeUnit::Millisecond => {
                        insert_timestamps::<TimestampMillisecondType>(filter, array, *unit)
                    }
                    TimeUnit::Microsecond => {
                        insert_timestamps::<TimestampMicrosecondType>(filter, array, *unit)
                    }
                    TimeUnit::Nanosecond => {
                        insert_timestamps::<TimestampNanosecondType>(filter, array, *unit)
                    }
                }
            }
            RuntimeFilter::Decimal4(filter) => insert_decimals(filter, array, Decimal4::from_i128),
            RuntimeFilter::Decimal8(filter) => insert_decimals(filter, array, Decimal8::from_i128),
            RuntimeFilter::Decimal16(filter) => {
                insert_decimals(filter, array, Decimal16::from_i128)
            }
            RuntimeFilter::String(filter) => filter.update(|scoped| match datatype {
                DataType::Utf8 => array
                    .as_string::<i32>()
                    .iter()
                    .for_each(|v| scoped.insert(v.map(str::as_bytes))),
                DataType::LargeUtf8 => array
                    .as_string::<i64>()
                    .iter()
                    .for_each(|v| scoped.insert(v.map(str::as_bytes))),
                DataType::Binary => array.as_binary::<i32>().iter().for_each(|v| scoped.insert(v)),
                DataType::LargeBinary => {
                    array.as_binary::<i64>().iter().for_each(|v| scoped.insert(v))
                }
                _ => unreachable!(),
            }),
        }
        Ok(())
    }

    fn accepts(&self, datatype: &DataType) -> bool {
        let decimal_width = |precision: u8| {
            (1..=MAX_DECIMAL_PRECISION)
                .contains(&precision)
                .then(|| DecimalWidth::from_precision(precision))
        };
        match (self, datatype) {
            (RuntimeFilter::Boolean(_), DataType::Boolean)
            | (RuntimeFilter::Int8(_), DataType::Int8)
            | (RuntimeFilter::Int16(_), DataType::Int16)
            | (RuntimeFilter::Int32(_), DataType::Int32)
            | (RuntimeFilter::Int64(_), DataType::Int64)
            | (RuntimeFilter::Float(_), DataType::Float32)
            | (RuntimeFilter::Double(_), DataType::Float64)
            | (
                RuntimeFilter::String(_),
                DataType::Utf8 | DataType::LargeUtf8 | DataType::Binary | DataType::LargeBinary,
            )
            | (RuntimeFilter::Timestamp(_), DataType::Timestamp(_, _))
            | (RuntimeFilter::Date(_), DataType::Date32) => true,
            (RuntimeFilter::Decimal4(_), DataType::Decimal128(precision, _)) => {
                decimal_width(*precision) == Some(DecimalWidth::W4)
            }
            (RuntimeFilter::Decimal8(_), DataType::Decimal128(precision, _)) => {
                decimal_width(*precision) == Some(DecimalWidth::W8)
            }
            (RuntimeFilter::Decimal16(_), DataType::Decimal128(precision, _)) => {
                decimal_width(*precision) == Some(DecimalWidth::W16)
            }
            _ => false,
        }
    }

    /// Join `other` into `self`.
    ///
    /// Panics if the two filters track different kinds.
    pub fn or(&mut self, other: &RuntimeFilter) {
        match (self, other) {
            (RuntimeFilter::Boolean(lhs), RuntimeFilter::Boolean(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Int8(lhs), RuntimeFilter::Int8(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Int16(lhs), RuntimeFilter::Int16(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Int32(lhs), RuntimeFilter::Int32(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Int64(lhs), RuntimeFilter::Int64(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Float(lhs), RuntimeFilter::Float(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Double(lhs), RuntimeFilter::Double(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Timestamp(lhs), RuntimeFilter::Timestamp(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Date(lhs), RuntimeFilter::Date(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Decimal4(lhs), RuntimeFilter::Decimal4(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Decimal8(lhs), RuntimeFilter::Decimal8(rhs)) => lhs.or(rhs),
            (RuntimeFilter::Decimal16(lhs), RuntimeFilter::Decimal16(rhs)) => lhs.or(rhs),
            (RuntimeFilter::String(lhs), RuntimeFilter::String(rhs)) => {
                lhs.update(|scoped| scoped.or(rhs))
            }
            (lhs, rhs) => panic!(
                "cannot merge a {} filter into a {} filter",
                rhs.kind(),
                lhs.kind()
            ),
        }
    }

    pub fn to_message(&self) -> FilterMessage {
        dispatch_scalar!(
            self,
            filter => filter.to_message(),
            filter => filter.to_message()
        )
    }

    /// Whether data of `column` within `[data_min, data_max]` may pass the
    /// filter.
    ///
    /// An integer filter accepts a column of any integer kind; its bounds are
    /// projected onto that kind first.
    pub fn eval_overlap(
        &self,
        column: &ColumnType,
        data_min: ValueRef<'_>,
        data_max: ValueRef<'_>,
    ) -> bool {
        match self {
            RuntimeFilter::Int8(filter) => eval_int(filter, column, data_min, data_max),
            RuntimeFilter::Int16(filter) => eval_int(filter, column, data_min, data_max),
            RuntimeFilter::Int32(filter) => eval_int(filter, column, data_min, data_max),
            RuntimeFilter::Int64(filter) => eval_int(filter, column, data_min, data_max),
            RuntimeFilter::Boolean(filter) => {
                filter.eval_overlap(&typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Float(filter) => filter.eval_overlap(&typed(data_min), &typed(data_max)),
            RuntimeFilter::Double(filter) => {
                filter.eval_overlap(&typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Timestamp(filter) => {
                filter.eval_overlap(&typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Date(filter) => filter.eval_overlap(&typed(data_min), &typed(data_max)),
            RuntimeFilter::Decimal4(filter) => {
                filter.eval_overlap(&typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Decimal8(filter) => {
                filter.eval_overlap(&typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Decimal16(filter) => {
                filter.eval_overlap(&typed(data_min), &typed(data_max))
            }
            RuntimeFilter::String(filter) => {
                filter.eval_overlap(string_value(data_min), string_value(data_max))
            }
        }
    }

    /// Estimated fraction of `[data_min, data_max]` the filter accepts.
    pub fn compute_overlap_ratio(
        &self,
        column: &ColumnType,
        data_min: ValueRef<'_>,
        data_max: ValueRef<'_>,
    ) -> f32 {
        match self {
            RuntimeFilter::Int8(filter) => ratio_int(filter, column, data_min, data_max),
            RuntimeFilter::Int16(filter) => ratio_int(filter, column, data_min, data_max),
            RuntimeFilter::Int32(filter) => ratio_int(filter, column, data_min, data_max),
            RuntimeFilter::Int64(filter) => ratio_int(filter, column, data_min, data_max),
            RuntimeFilter::Boolean(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Float(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Double(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Timestamp(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Date(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Decimal4(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Decimal8(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::Decimal16(filter) => {
                filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
            }
            RuntimeFilter::String(filter) => {
                filter.compute_overlap_ratio(string_value(data_min), string_value(data_max))
            }
        }
    }

    /// Project an integer filter onto `target`; see
    /// [`MinMaxFilter::cast_int_bounds`].
    ///
    /// Panics for every non-integer kind.
    pub fn cast_int_bounds(&self, target: IntKind) -> Option<(i64, i64)> {
        match self {
            RuntimeFilter::Int8(filter) => filter.cast_int_bounds(target),
            RuntimeFilter::Int16(filter) => filter.cast_int_bounds(target),
            RuntimeFilter::Int32(filter) => filter.cast_int_bounds(target),
            RuntimeFilter::Int64(filter) => filter.cast_int_bounds(target),
            other => panic!("integer cast of a {} filter", other.kind()),
        }
    }
}

impl fmt::Display for RuntimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch_scalar!(
            self,
            filter => fmt::Display::fmt(filter, f),
            filter => fmt::Display::fmt(filter, f)
        )
    }
}

/// Scalars that can be read out of a borrowed value of their own kind.
trait FromValueRef: Scalar {
    fn from_value_ref(value: ValueRef<'_>) -> Option<Self>;
}

macro_rules! implement_from_value_ref {
    ($ty:ty, $variant:ident) => {
        impl FromValueRef for $ty {
            fn from_value_ref(value: ValueRef<'_>) -> Option<Self> {
                match value {
                    ValueRef::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

implement_from_value_ref!(bool, Bool);
implement_from_value_ref!(i8, Int8);
implement_from_value_ref!(i16, Int16);
implement_from_value_ref!(i32, Int32);
implement_from_value_ref!(i64, Int64);
implement_from_value_ref!(f32, Float);
implement_from_value_ref!(f64, Double);
implement_from_value_ref!(Timestamp, Timestamp);
implement_from_value_ref!(Date, Date);
implement_from_value_ref!(Decimal4, Decimal4);
implement_from_value_ref!(Decimal8, Decimal8);
implement_from_value_ref!(Decimal16, Decimal16);

fn typed<T: FromValueRef>(value: ValueRef<'_>) -> T {
    T::from_value_ref(value)
        .unwrap_or_else(|| panic!("{value:?} passed to a {}MinMaxFilter", T::NAME))
}

fn string_value(value: ValueRef<'_>) -> &[u8] {
    value
        .as_bytes_opt()
        .unwrap_or_else(|| panic!("{value:?} passed to a StringMinMaxFilter"))
}

fn target_kind(column: &ColumnType, filter: &'static str) -> IntKind {
    column
        .int_kind()
        .unwrap_or_else(|| panic!("{filter}MinMaxFilter evaluated against a {column} column"))
}

fn widened(value: ValueRef<'_>) -> i64 {
    value
        .as_i64_opt()
        .unwrap_or_else(|| panic!("{value:?} is not an integer"))
}

fn eval_int<T: IntegerScalar + FromValueRef>(
    filter: &MinMaxFilter<T>,
    column: &ColumnType,
    data_min: ValueRef<'_>,
    data_max: ValueRef<'_>,
) -> bool {
    let target = target_kind(column, T::NAME);
    if target == T::INT_KIND {
        filter.eval_overlap(&typed(data_min), &typed(data_max))
    } else {
        filter.eval_overlap_int(target, widened(data_min), widened(data_max))
    }
}

fn ratio_int<T: IntegerScalar + FromValueRef>(
    filter: &MinMaxFilter<T>,
    column: &ColumnType,
    data_min: ValueRef<'_>,
    data_max: ValueRef<'_>,
) -> f32 {
    let target = target_kind(column, T::NAME);
    if target == T::INT_KIND {
        filter.compute_overlap_ratio(column, &typed(data_min), &typed(data_max))
    } else {
        filter.compute_overlap_ratio_int(target, widened(data_min), widened(data_max))
    }
}

fn insert_primitive<P>(filter: &mut MinMaxFilter<P::Native>, array: &dyn Array)
where
    P: ArrowPrimitiveType,
    P::Native: Scalar,
{
    array
        .as_primitive::<P>()
        .iter()
        .for_each(|v| filter.insert(v));
}

fn insert_timestamps<P>(filter: &mut MinMaxFilter<Timestamp>, array: &dyn Array, unit: TimeUnit)
where
    P: ArrowPrimitiveType<Native = i64>,
{
    for value in array.as_primitive::<P>().iter().flatten() {
        match Timestamp::from_unix(value, unit) {
            Some(timestamp) => filter.insert(Some(timestamp)),
            None => {
                degrade_out_of_range(Timestamp::NAME);
                filter.set_always_true();
                return;
            }
        }
    }
}

fn insert_decimals<D: Scalar>(
    filter: &mut MinMaxFilter<D>,
    array: &dyn Array,
    narrow: fn(i128) -> Option<D>,
) {
    for value in array.as_primitive::<Decimal128Type>().iter().flatten() {
        match narrow(value) {
            Some(decimal) => filter.insert(Some(decimal)),
            None => {
                degrade_out_of_range(D::NAME);
                filter.set_always_true();
                return;
            }
        }
    }
}

fn degrade_out_of_range(kind: &'static str) {
    log_debug!(
        component = "runtime_filter",
        event = "filter_degraded",
        kind = kind,
        reason = "value_out_of_range",
    );
}
