use super::{approximate_ratio, discrete_ratio, IntegerScalar, Scalar};
use crate::{
    types::{ColumnType, IntKind},
    value::Value,
};

impl Scalar for bool {
    const NAME: &'static str = "Bool";

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    // Any overlap of two boolean ranges covers every value the data can hold.
    fn overlap_ratio(_: &ColumnType, _: &Self, _: &Self, _: &Self, _: &Self) -> f32 {
        1.0
    }
}

macro_rules! implement_integer_scalar {
    ($ty:ty, $variant:ident, $kind:ident, $name:literal) => {
        impl Scalar for $ty {
            const NAME: &'static str = $name;

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            fn overlap_ratio(
                _: &ColumnType,
                filter_min: &Self,
                filter_max: &Self,
                data_min: &Self,
                data_max: &Self,
            ) -> f32 {
                discrete_ratio(
                    *filter_min as i128,
                    *filter_max as i128,
                    *data_min as i128,
                    *data_max as i128,
                )
            }
        }

        impl IntegerScalar for $ty {
            const INT_KIND: IntKind = IntKind::$kind;

            fn to_i64(self) -> i64 {
                self as i64
            }
        }
    };
}

implement_integer_scalar!(i8, Int8, Int8, "TinyInt");
implement_integer_scalar!(i16, Int16, Int16, "SmallInt");
implement_integer_scalar!(i32, Int32, Int32, "Int");
implement_integer_scalar!(i64, Int64, Int64, "BigInt");

impl Scalar for f32 {
    const NAME: &'static str = "Float";

    fn is_ordered(&self) -> bool {
        !self.is_nan()
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn overlap_ratio(
        _: &ColumnType,
        filter_min: &Self,
        filter_max: &Self,
        data_min: &Self,
        data_max: &Self,
    ) -> f32 {
        approximate_ratio(
            *filter_min as f64,
            *filter_max as f64,
            *data_min as f64,
            *data_max as f64,
        )
    }
}

impl Scalar for f64 {
    const NAME: &'static str = "Double";

    fn is_ordered(&self) -> bool {
        !self.is_nan()
    }

    fn to_value(&self) -> Value {
        Value::Double(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    fn overlap_ratio(
        _: &ColumnType,
        filter_min: &Self,
        filter_max: &Self,
        data_min: &Self,
        data_max: &Self,
    ) -> f32 {
        approximate_ratio(*filter_min, *filter_max, *data_min, *data_max)
    }
}
