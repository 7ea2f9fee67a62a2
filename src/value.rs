//! Scalar values exchanged with the outside world.
//!
//! [`Value`] is the owned tagged union carried by the wire form; it owns any
//! variable-length bytes and is safe to copy and merge freely. [`ValueRef`] is
//! the borrowed view callers hand to `insert` and to overlap evaluation, so
//! statistics and batch values never have to be copied just to be compared.

use std::fmt;

use crate::{
    scalar::{Date, Decimal16, Decimal4, Decimal8, Timestamp},
    types::{ColumnType, DecimalWidth},
};

/// An owned scalar bound of a [`FilterMessage`](crate::message::FilterMessage).
///
/// The variant is implied by the column type agreed on out of band; the value
/// itself carries no precision, so a decimal is stored as its little-endian
/// two's-complement bytes (4, 8 or 16 of them).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    Timestamp(Timestamp),
    Date(Date),
    Decimal(Vec<u8>),
}

impl Value {
    /// Borrow this value as a [`ValueRef`].
    ///
    /// Returns `None` for a decimal that does not hold 4, 8 or 16 bytes.
    pub fn as_value_ref(&self) -> Option<ValueRef<'_>> {
        let value = match self {
            Value::Bool(v) => ValueRef::Bool(*v),
            Value::Int8(v) => ValueRef::Int8(*v),
            Value::Int16(v) => ValueRef::Int16(*v),
            Value::Int32(v) => ValueRef::Int32(*v),
            Value::Int64(v) => ValueRef::Int64(*v),
            Value::Float(v) => ValueRef::Float(*v),
            Value::Double(v) => ValueRef::Double(*v),
            Value::Bytes(v) => ValueRef::Bytes(v),
            Value::Timestamp(v) => ValueRef::Timestamp(*v),
            Value::Date(v) => ValueRef::Date(*v),
            Value::Decimal(bytes) => match DecimalWidth::from_bytes(bytes.len())? {
                DecimalWidth::W4 => ValueRef::Decimal4(Decimal4::from_le_slice(bytes)),
                DecimalWidth::W8 => ValueRef::Decimal8(Decimal8::from_le_slice(bytes)),
                DecimalWidth::W16 => ValueRef::Decimal16(Decimal16::from_le_slice(bytes)),
            },
        };
        Some(value)
    }

    /// Whether this value is the variant a filter over `column` stores.
    pub fn matches(&self, column: &ColumnType) -> bool {
        match (self, column) {
            (Value::Bool(_), ColumnType::Boolean)
            | (Value::Int8(_), ColumnType::Int8)
            | (Value::Int16(_), ColumnType::Int16)
            | (Value::Int32(_), ColumnType::Int32)
            | (Value::Int64(_), ColumnType::Int64)
            | (Value::Float(_), ColumnType::Float)
            | (Value::Double(_), ColumnType::Double)
            | (Value::Bytes(_), ColumnType::String)
            | (Value::Timestamp(_), ColumnType::Timestamp)
            | (Value::Date(_), ColumnType::Date) => true,
            (Value::Decimal(bytes), ColumnType::Decimal { precision, .. }) => {
                bytes.len() == DecimalWidth::from_precision(*precision).bytes()
            }
            _ => false,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int8(_) => "byte",
            Value::Int16(_) => "short",
            Value::Int32(_) => "int",
            Value::Int64(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bytes(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
            Value::Decimal(_) => "decimal",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.as_value_ref(), self) {
            (Some(value), _) => fmt::Display::fmt(&value, f),
            (None, Value::Decimal(bytes)) => write!(f, "decimal{bytes:?}"),
            (None, _) => unreachable!("only decimals can fail to borrow"),
        }
    }
}

/// A borrowed scalar: an inserted value or one end of a data range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bytes(&'a [u8]),
    Timestamp(Timestamp),
    Date(Date),
    Decimal4(Decimal4),
    Decimal8(Decimal8),
    Decimal16(Decimal16),
}

impl<'a> ValueRef<'a> {
    /// Widen an integer value to `i64`.
    pub fn as_i64_opt(&self) -> Option<i64> {
        match self {
            ValueRef::Int8(v) => Some(*v as i64),
            ValueRef::Int16(v) => Some(*v as i64),
            ValueRef::Int32(v) => Some(*v as i64),
            ValueRef::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes_opt(&self) -> Option<&'a [u8]> {
        match self {
            ValueRef::Bytes(v) => Some(*v),
            _ => None,
        }
    }

    /// Copy this view into an owned [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            ValueRef::Bool(v) => Value::Bool(*v),
            ValueRef::Int8(v) => Value::Int8(*v),
            ValueRef::Int16(v) => Value::Int16(*v),
            ValueRef::Int32(v) => Value::Int32(*v),
            ValueRef::Int64(v) => Value::Int64(*v),
            ValueRef::Float(v) => Value::Float(*v),
            ValueRef::Double(v) => Value::Double(*v),
            ValueRef::Bytes(v) => Value::Bytes(v.to_vec()),
            ValueRef::Timestamp(v) => Value::Timestamp(*v),
            ValueRef::Date(v) => Value::Date(*v),
            ValueRef::Decimal4(v) => Value::Decimal(v.to_le_bytes().to_vec()),
            ValueRef::Decimal8(v) => Value::Decimal(v.to_le_bytes().to_vec()),
            ValueRef::Decimal16(v) => Value::Decimal(v.to_le_bytes().to_vec()),
        }
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Bool(v) => write!(f, "{v}"),
            ValueRef::Int8(v) => write!(f, "{v}"),
            ValueRef::Int16(v) => write!(f, "{v}"),
            ValueRef::Int32(v) => write!(f, "{v}"),
            ValueRef::Int64(v) => write!(f, "{v}"),
            ValueRef::Float(v) => write!(f, "{v}"),
            ValueRef::Double(v) => write!(f, "{v}"),
            ValueRef::Bytes(v) => write!(f, "{}", String::from_utf8_lossy(v)),
            ValueRef::Timestamp(v) => write!(f, "{v}"),
            ValueRef::Date(v) => write!(f, "{v}"),
            ValueRef::Decimal4(v) => write!(f, "{v}"),
            ValueRef::Decimal8(v) => write!(f, "{v}"),
            ValueRef::Decimal16(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! implement_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }

        impl From<$ty> for ValueRef<'_> {
            fn from(value: $ty) -> Self {
                ValueRef::$variant(value)
            }
        }
    };
}

implement_from!(bool, Bool);
implement_from!(i8, Int8);
implement_from!(i16, Int16);
implement_from!(i32, Int32);
implement_from!(i64, Int64);
implement_from!(f32, Float);
implement_from!(f64, Double);
implement_from!(Timestamp, Timestamp);
implement_from!(Date, Date);

macro_rules! implement_from_decimal {
    ($ty:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Decimal(value.to_le_bytes().to_vec())
            }
        }

        impl From<$ty> for ValueRef<'_> {
            fn from(value: $ty) -> Self {
                ValueRef::$ty(value)
            }
        }
    };
}

implement_from_decimal!(Decimal4);
implement_from_decimal!(Decimal8);
implement_from_decimal!(Decimal16);

impl<'a> From<&'a [u8]> for ValueRef<'a> {
    fn from(value: &'a [u8]) -> Self {
        ValueRef::Bytes(value)
    }
}

impl<'a> From<&'a str> for ValueRef<'a> {
    fn from(value: &'a str) -> Self {
        ValueRef::Bytes(value.as_bytes())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Bytes(value.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;

    #[test]
    fn decimal_value_borrows_by_width() {
        let value = Decimal8(-12345).to_value();
        assert_eq!(
            value.as_value_ref(),
            Some(ValueRef::Decimal8(Decimal8(-12345)))
        );
        assert!(value.matches(&ColumnType::decimal(18, 2)));
        assert!(!value.matches(&ColumnType::decimal(9, 2)));
    }

    #[test]
    fn odd_width_decimal_does_not_borrow() {
        let value = Value::Decimal(vec![1, 2, 3]);
        assert_eq!(value.as_value_ref(), None);
        assert!(!value.matches(&ColumnType::decimal(9, 2)));
        assert_eq!(value.to_string(), "decimal[1, 2, 3]");
    }

    #[test]
    fn value_ref_round_trips_to_owned() {
        let bytes = b"tonbo".as_slice();
        let value = ValueRef::from(bytes).to_value();
        assert_eq!(value, Value::Bytes(b"tonbo".to_vec()));
        assert_eq!(
            value.as_value_ref().and_then(|v| v.as_bytes_opt()),
            Some(bytes)
        );
    }

    #[test]
    fn integer_refs_widen() {
        assert_eq!(ValueRef::Int8(-3).as_i64_opt(), Some(-3));
        assert_eq!(ValueRef::Int32(i32::MAX).as_i64_opt(), Some(i32::MAX as i64));
        assert_eq!(ValueRef::Double(1.0).as_i64_opt(), None);
    }
}
