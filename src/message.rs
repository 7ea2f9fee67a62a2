//! Wire form of a filter and the merge algebra over it.
//!
//! Aggregation nodes combine the messages of many producers without ever
//! building a filter: [`FilterMessage::or_into`] only compares the two bounds
//! it needs, on borrowed views of the encoded values.

use std::{cmp::Ordering, io, mem::size_of};

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::{
    error::CodecError,
    scalar::{Date, Timestamp, NANOS_PER_DAY},
    serdes::{Decode, Encode},
    types::{ColumnType, DecimalWidth},
    value::{Value, ValueRef},
};

const ALWAYS_FALSE: u8 = 0b001;
const ALWAYS_TRUE: u8 = 0b010;
const HAS_BOUNDS: u8 = 0b100;

const TAG_BOOL: u8 = 0;
const TAG_INT8: u8 = 1;
const TAG_INT16: u8 = 2;
const TAG_INT32: u8 = 3;
const TAG_INT64: u8 = 4;
const TAG_FLOAT: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_BYTES: u8 = 7;
const TAG_TIMESTAMP: u8 = 8;
const TAG_DATE: u8 = 9;
const TAG_DECIMAL: u8 = 10;

/// Serialized state of a min/max filter.
///
/// `min` and `max` are only meaningful when both flags are `false`. The
/// message carries no type tag: producer and consumer agree on the
/// [`ColumnType`] out of band.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMessage {
    pub always_false: bool,
    pub always_true: bool,
    pub min: Option<Value>,
    pub max: Option<Value>,
}

impl Default for FilterMessage {
    fn default() -> Self {
        Self::bottom()
    }
}

impl FilterMessage {
    pub fn bottom() -> Self {
        FilterMessage {
            always_false: true,
            always_true: false,
            min: None,
            max: None,
        }
    }

    pub fn top() -> Self {
        FilterMessage {
            always_false: false,
            always_true: true,
            min: None,
            max: None,
        }
    }

    pub fn ranged(min: Value, max: Value) -> Self {
        FilterMessage {
            always_false: false,
            always_true: false,
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_ranged(&self) -> bool {
        !self.always_false && !self.always_true
    }

    /// Copy the flags of `input` and, when it is ranged, its bounds.
    pub fn copy_from(&mut self, input: &FilterMessage) {
        self.always_false = input.always_false;
        self.always_true = input.always_true;
        if input.is_ranged() {
            self.min.clone_from(&input.min);
            self.max.clone_from(&input.max);
        }
    }

    /// Merge `input` into `self`.
    ///
    /// `column` selects how bounds compare; for decimals it fixes the byte
    /// width, which the message alone does not encode. Panics if a bound of
    /// a ranged operand is missing or does not match `column`.
    pub fn or_into(&mut self, input: &FilterMessage, column: &ColumnType) {
        if self.always_false {
            self.copy_from(input);
        } else if self.always_true || input.always_true {
            self.always_true = true;
            self.min = None;
            self.max = None;
        } else if !input.always_false {
            let (min, max) = (bound(&self.min, column), bound(&self.max, column));
            let (in_min, in_max) = (bound(&input.min, column), bound(&input.max, column));

            let new_min = (compare(in_min, min) == Ordering::Less).then(|| in_min.to_value());
            let new_max = (compare(in_max, max) == Ordering::Greater).then(|| in_max.to_value());
            if let Some(v) = new_min {
                self.min = Some(v);
            }
            if let Some(v) = new_max {
                self.max = Some(v);
            }
        }
    }

    pub fn or(lhs: &FilterMessage, rhs: &FilterMessage, column: &ColumnType) -> FilterMessage {
        let mut out = lhs.clone();
        out.or_into(rhs, column);
        out
    }
}

fn bound<'a>(value: &'a Option<Value>, column: &ColumnType) -> ValueRef<'a> {
    let value = value
        .as_ref()
        .unwrap_or_else(|| panic!("ranged {column} filter message without a bound"));
    value
        .as_value_ref()
        .filter(|_| value.matches(column))
        .unwrap_or_else(|| {
            panic!(
                "{} bound does not match column type {column}",
                value.type_name()
            )
        })
}

/// Order two bounds of the same column type.
///
/// Floats compare the way [`MinMaxFilter`](crate::filter::MinMaxFilter)
/// compares them, so `-0.0` and `0.0` tie. A filter never stores NaN as a
/// bound.
fn compare(lhs: ValueRef<'_>, rhs: ValueRef<'_>) -> Ordering {
    match (lhs, rhs) {
        (ValueRef::Bool(a), ValueRef::Bool(b)) => a.cmp(&b),
        (ValueRef::Int8(a), ValueRef::Int8(b)) => a.cmp(&b),
        (ValueRef::Int16(a), ValueRef::Int16(b)) => a.cmp(&b),
        (ValueRef::Int32(a), ValueRef::Int32(b)) => a.cmp(&b),
        (ValueRef::Int64(a), ValueRef::Int64(b)) => a.cmp(&b),
        (ValueRef::Float(a), ValueRef::Float(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (ValueRef::Double(a), ValueRef::Double(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (ValueRef::Bytes(a), ValueRef::Bytes(b)) => a.cmp(b),
        (ValueRef::Timestamp(a), ValueRef::Timestamp(b)) => a.cmp(&b),
        (ValueRef::Date(a), ValueRef::Date(b)) => a.cmp(&b),
        (ValueRef::Decimal4(a), ValueRef::Decimal4(b)) => a.cmp(&b),
        (ValueRef::Decimal8(a), ValueRef::Decimal8(b)) => a.cmp(&b),
        (ValueRef::Decimal16(a), ValueRef::Decimal16(b)) => a.cmp(&b),
        (lhs, rhs) => unreachable!("comparing {lhs:?} with {rhs:?}"),
    }
}

impl Encode for Value {
    type Error = CodecError;

    async fn encode<W>(&self, writer: &mut W) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        match self {
            Value::Bool(v) => {
                TAG_BOOL.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Int8(v) => {
                TAG_INT8.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Int16(v) => {
                TAG_INT16.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Int32(v) => {
                TAG_INT32.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Int64(v) => {
                TAG_INT64.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Float(v) => {
                TAG_FLOAT.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Double(v) => {
                TAG_DOUBLE.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Bytes(v) => {
                TAG_BYTES.encode(writer).await?;
                v.encode(writer).await?;
            }
            Value::Timestamp(v) => {
                TAG_TIMESTAMP.encode(writer).await?;
                v.days().encode(writer).await?;
                v.nanos_of_day().encode(writer).await?;
            }
            Value::Date(v) => {
                TAG_DATE.encode(writer).await?;
                v.0.encode(writer).await?;
            }
            Value::Decimal(bytes) => {
                let width = DecimalWidth::from_bytes(bytes.len())
                    .ok_or(CodecError::InvalidDecimalWidth(bytes.len() as u8))?;
                TAG_DECIMAL.encode(writer).await?;
                (width.bytes() as u8).encode(writer).await?;
                // already little-endian two's complement
                writer.write_all(bytes).await?;
            }
        }
        Ok(())
    }

    fn size(&self) -> usize {
        size_of::<u8>()
            + match self {
                Value::Bool(v) => v.size(),
                Value::Int8(v) => v.size(),
                Value::Int16(v) => v.size(),
                Value::Int32(v) => v.size(),
                Value::Int64(v) => v.size(),
                Value::Float(v) => v.size(),
                Value::Double(v) => v.size(),
                Value::Bytes(v) => v.size(),
                Value::Timestamp(_) => size_of::<i32>() + size_of::<i64>(),
                Value::Date(v) => v.0.size(),
                Value::Decimal(bytes) => size_of::<u8>() + bytes.len(),
            }
    }
}

impl Decode for Value {
    type Error = CodecError;

    async fn decode<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: AsyncRead + Unpin,
    {
        let value = match u8::decode(reader).await? {
            TAG_BOOL => Value::Bool(bool::decode(reader).await?),
            TAG_INT8 => Value::Int8(i8::decode(reader).await?),
            TAG_INT16 => Value::Int16(i16::decode(reader).await?),
            TAG_INT32 => Value::Int32(i32::decode(reader).await?),
            TAG_INT64 => Value::Int64(i64::decode(reader).await?),
            TAG_FLOAT => Value::Float(f32::decode(reader).await?),
            TAG_DOUBLE => Value::Double(f64::decode(reader).await?),
            TAG_BYTES => Value::Bytes(Vec::<u8>::decode(reader).await?),
            TAG_TIMESTAMP => {
                let days = i32::decode(reader).await?;
                let nanos_of_day = i64::decode(reader).await?;
                if !(0..NANOS_PER_DAY).contains(&nanos_of_day) {
                    return Err(CodecError::Io(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "timestamp nanos_of_day out of range",
                    )));
                }
                Value::Timestamp(Timestamp::new(days, nanos_of_day))
            }
            TAG_DATE => Value::Date(Date(i32::decode(reader).await?)),
            TAG_DECIMAL => {
                let width = u8::decode(reader).await?;
                let bytes = match DecimalWidth::from_bytes(width as usize) {
                    Some(DecimalWidth::W4) => i32::decode(reader).await?.to_le_bytes().to_vec(),
                    Some(DecimalWidth::W8) => i64::decode(reader).await?.to_le_bytes().to_vec(),
                    Some(DecimalWidth::W16) => i128::decode(reader).await?.to_le_bytes().to_vec(),
                    None => return Err(CodecError::InvalidDecimalWidth(width)),
                };
                Value::Decimal(bytes)
            }
            tag => return Err(CodecError::InvalidValueTag(tag)),
        };
        Ok(value)
    }
}

impl Encode for FilterMessage {
    type Error = CodecError;

    async fn encode<W>(&self, writer: &mut W) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        if self.always_false && self.always_true {
            return Err(CodecError::ConflictingFlags);
        }
        let bounds = match (self.is_ranged(), &self.min, &self.max) {
            (false, _, _) => None,
            (true, Some(min), Some(max)) => Some((min, max)),
            (true, _, _) => return Err(CodecError::MissingBound),
        };

        let mut flags = 0;
        if self.always_false {
            flags |= ALWAYS_FALSE;
        }
        if self.always_true {
            flags |= ALWAYS_TRUE;
        }
        if bounds.is_some() {
            flags |= HAS_BOUNDS;
        }
        flags.encode(writer).await?;

        if let Some((min, max)) = bounds {
            min.encode(writer).await?;
            max.encode(writer).await?;
        }
        Ok(())
    }

    fn size(&self) -> usize {
        let bounds = match (self.is_ranged(), &self.min, &self.max) {
            (true, Some(min), Some(max)) => min.size() + max.size(),
            _ => 0,
        };
        size_of::<u8>() + bounds
    }
}

impl Decode for FilterMessage {
    type Error = CodecError;

    async fn decode<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: AsyncRead + Unpin,
    {
        let flags = u8::decode(reader).await?;
        let always_false = flags & ALWAYS_FALSE != 0;
        let always_true = flags & ALWAYS_TRUE != 0;
        if always_false && always_true {
            return Err(CodecError::ConflictingFlags);
        }

        let (min, max) = if flags & HAS_BOUNDS != 0 {
            (
                Some(Value::decode(reader).await?),
                Some(Value::decode(reader).await?),
            )
        } else {
            (None, None)
        };
        if !always_false && !always_true && min.is_none() {
            return Err(CodecError::MissingBound);
        }

        Ok(FilterMessage {
            always_false,
            always_true,
            min,
            max,
        })
    }
}
