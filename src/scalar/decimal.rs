use std::fmt;

use super::{approximate_ratio, Scalar};
use crate::{types::ColumnType, value::Value};

macro_rules! implement_decimal {
    ($name:ident, $native:ty, $bytes:literal) => {
        /// Unscaled fixed-point decimal stored in
        #[doc = concat!(stringify!($bytes), " bytes.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $native);

        impl $name {
            /// Project to `f64` using the declared `scale`.
            pub fn to_f64(&self, scale: u8) -> f64 {
                self.0 as f64 / 10f64.powi(scale as i32)
            }

            pub fn to_le_bytes(&self) -> [u8; $bytes] {
                self.0.to_le_bytes()
            }

            /// Panics unless `bytes` holds exactly
            #[doc = concat!(stringify!($bytes), " bytes.")]
            pub fn from_le_slice(bytes: &[u8]) -> Self {
                let array: [u8; $bytes] = bytes.try_into().unwrap_or_else(|_| {
                    panic!(
                        "{} expects {} bytes, got {}",
                        stringify!($name),
                        $bytes,
                        bytes.len()
                    )
                });
                $name(<$native>::from_le_bytes(array))
            }

            /// Narrow an `i128` unscaled value, `None` if it does not fit.
            pub fn from_i128(value: i128) -> Option<Self> {
                <$native>::try_from(value).ok().map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Scalar for $name {
            const NAME: &'static str = "Decimal";

            fn to_value(&self) -> Value {
                Value::Decimal(self.to_le_bytes().to_vec())
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Decimal(bytes) if bytes.len() == $bytes => {
                        Some($name::from_le_slice(bytes))
                    }
                    _ => None,
                }
            }

            fn overlap_ratio(
                column: &ColumnType,
                filter_min: &Self,
                filter_max: &Self,
                data_min: &Self,
                data_max: &Self,
            ) -> f32 {
                let scale = column.scale();
                approximate_ratio(
                    filter_min.to_f64(scale),
                    filter_max.to_f64(scale),
                    data_min.to_f64(scale),
                    data_max.to_f64(scale),
                )
            }
        }
    };
}

implement_decimal!(Decimal4, i32, 4);
implement_decimal!(Decimal8, i64, 8);
implement_decimal!(Decimal16, i128, 16);
