//! Column type metadata consumed by the filter factory.
//!
//! The planner is the only producer of [`ColumnType`]; every value of this
//! type names a kind the filters support, so the factory never has to reject
//! one at runtime.

use std::fmt;

use arrow::datatypes::DataType as ArrowDataType;

use crate::error::FilterError;

/// Largest precision a 16-byte decimal can hold.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Logical type of the column a filter is built from or evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    /// Variable-length byte string, compared in lexicographic byte order.
    String,
    Timestamp,
    Date,
    /// Fixed-point decimal. The storage width is derived from `precision`,
    /// the `scale` is only needed to project values to `f64`.
    Decimal { precision: u8, scale: u8 },
}

impl ColumnType {
    /// Build a decimal column type.
    ///
    /// Panics when `precision` is outside `1..=38` or `scale > precision`.
    pub fn decimal(precision: u8, scale: u8) -> Self {
        assert!(
            (1..=MAX_DECIMAL_PRECISION).contains(&precision),
            "invalid decimal precision: {precision}"
        );
        assert!(
            scale <= precision,
            "decimal scale {scale} exceeds precision {precision}"
        );
        ColumnType::Decimal { precision, scale }
    }

    /// Integer kind of this column, if it is one of the four signed integers.
    pub fn int_kind(&self) -> Option<IntKind> {
        match self {
            ColumnType::Int8 => Some(IntKind::Int8),
            ColumnType::Int16 => Some(IntKind::Int16),
            ColumnType::Int32 => Some(IntKind::Int32),
            ColumnType::Int64 => Some(IntKind::Int64),
            _ => None,
        }
    }

    /// Storage width of a decimal column.
    pub fn decimal_width(&self) -> Option<DecimalWidth> {
        match self {
            ColumnType::Decimal { precision, .. } => Some(DecimalWidth::from_precision(*precision)),
            _ => None,
        }
    }

    /// Decimal scale, `0` for every other kind.
    pub fn scale(&self) -> u8 {
        match self {
            ColumnType::Decimal { scale, .. } => *scale,
            _ => 0,
        }
    }

    /// Name of the scalar kind a filter over this column tracks.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "Bool",
            ColumnType::Int8 => "TinyInt",
            ColumnType::Int16 => "SmallInt",
            ColumnType::Int32 => "Int",
            ColumnType::Int64 => "BigInt",
            ColumnType::Float => "Float",
            ColumnType::Double => "Double",
            ColumnType::String => "String",
            ColumnType::Timestamp => "Timestamp",
            ColumnType::Date => "Date",
            ColumnType::Decimal { .. } => "Decimal",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Decimal { precision, scale } => write!(f, "DECIMAL({precision},{scale})"),
            ColumnType::Boolean => write!(f, "BOOLEAN"),
            ColumnType::Int8 => write!(f, "TINYINT"),
            ColumnType::Int16 => write!(f, "SMALLINT"),
            ColumnType::Int32 => write!(f, "INT"),
            ColumnType::Int64 => write!(f, "BIGINT"),
            ColumnType::Float => write!(f, "FLOAT"),
            ColumnType::Double => write!(f, "DOUBLE"),
            ColumnType::String => write!(f, "STRING"),
            ColumnType::Timestamp => write!(f, "TIMESTAMP"),
            ColumnType::Date => write!(f, "DATE"),
        }
    }
}

impl TryFrom<&ArrowDataType> for ColumnType {
    type Error = FilterError;

    fn try_from(datatype: &ArrowDataType) -> Result<Self, Self::Error> {
        match datatype {
            ArrowDataType::Boolean => Ok(ColumnType::Boolean),
            ArrowDataType::Int8 => Ok(ColumnType::Int8),
            ArrowDataType::Int16 => Ok(ColumnType::Int16),
            ArrowDataType::Int32 => Ok(ColumnType::Int32),
            ArrowDataType::Int64 => Ok(ColumnType::Int64),
            ArrowDataType::Float32 => Ok(ColumnType::Float),
            ArrowDataType::Float64 => Ok(ColumnType::Double),
            ArrowDataType::Utf8
            | ArrowDataType::LargeUtf8
            | ArrowDataType::Binary
            | ArrowDataType::LargeBinary => Ok(ColumnType::String),
            ArrowDataType::Timestamp(_, _) => Ok(ColumnType::Timestamp),
            ArrowDataType::Date32 => Ok(ColumnType::Date),
            ArrowDataType::Decimal128(precision, scale)
                if (1..=MAX_DECIMAL_PRECISION).contains(precision)
                    && *scale >= 0
                    && (*scale as u8) <= *precision =>
            {
                Ok(ColumnType::decimal(*precision, *scale as u8))
            }
            other => Err(FilterError::UnsupportedDataType(other.to_string())),
        }
    }
}

/// Fixed storage size of a decimal value.
///
/// Different precisions share the same bit layout, so filters are keyed by
/// width rather than by the declared decimal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalWidth {
    W4,
    W8,
    W16,
}

impl DecimalWidth {
    /// Width needed to store a decimal of `precision` digits.
    pub fn from_precision(precision: u8) -> Self {
        match precision {
            1..=9 => DecimalWidth::W4,
            10..=18 => DecimalWidth::W8,
            19..=MAX_DECIMAL_PRECISION => DecimalWidth::W16,
            _ => panic!("invalid decimal precision: {precision}"),
        }
    }

    /// Width matching a byte count, if it is one of 4, 8 or 16.
    pub fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            4 => Some(DecimalWidth::W4),
            8 => Some(DecimalWidth::W8),
            16 => Some(DecimalWidth::W16),
            _ => None,
        }
    }

    pub fn bytes(&self) -> usize {
        match self {
            DecimalWidth::W4 => 4,
            DecimalWidth::W8 => 8,
            DecimalWidth::W16 => 16,
        }
    }
}

/// Signed integer kinds a filter can be cast between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    Int8,
    Int16,
    Int32,
    Int64,
}

impl IntKind {
    pub fn min_value(&self) -> i64 {
        match self {
            IntKind::Int8 => i8::MIN as i64,
            IntKind::Int16 => i16::MIN as i64,
            IntKind::Int32 => i32::MIN as i64,
            IntKind::Int64 => i64::MIN,
        }
    }

    pub fn max_value(&self) -> i64 {
        match self {
            IntKind::Int8 => i8::MAX as i64,
            IntKind::Int16 => i16::MAX as i64,
            IntKind::Int32 => i32::MAX as i64,
            IntKind::Int64 => i64::MAX,
        }
    }
}

impl From<IntKind> for ColumnType {
    fn from(kind: IntKind) -> Self {
        match kind {
            IntKind::Int8 => ColumnType::Int8,
            IntKind::Int16 => ColumnType::Int16,
            IntKind::Int32 => ColumnType::Int32,
            IntKind::Int64 => ColumnType::Int64,
        }
    }
}
