use std::{borrow::Cow, fmt};

use super::{discrete_ratio, Scalar};
use crate::{types::ColumnType, value::Value};

/// Number of leading bytes projected to an integer for the overlap ratio.
const PREFIX_LEN: usize = 8;

/// A byte string bound that either borrows the batch it was read from or owns
/// its bytes.
///
/// Ordering is lexicographic on the bytes regardless of ownership.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes<'a>(Cow<'a, [u8]>);

impl<'a> Bytes<'a> {
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Bytes(Cow::Borrowed(bytes))
    }

    pub fn owned(bytes: Vec<u8>) -> Bytes<'static> {
        Bytes(Cow::Owned(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self.0, Cow::Borrowed(_))
    }

    /// Detach from the source batch, copying the bytes if they are borrowed.
    pub fn into_static(self) -> Bytes<'static> {
        Bytes(Cow::Owned(self.0.into_owned()))
    }

    /// Order-preserving projection of the first bytes onto a `u64`.
    ///
    /// Shorter strings are padded with zero bytes, so the projection is
    /// monotonic but not injective.
    pub(crate) fn prefix_u64(bytes: &[u8]) -> u64 {
        let mut buf = [0u8; PREFIX_LEN];
        let len = bytes.len().min(PREFIX_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);
        u64::from_be_bytes(buf)
    }
}

impl<'a> From<&'a [u8]> for Bytes<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Bytes::borrowed(bytes)
    }
}

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Scalar for Bytes<'_> {
    const NAME: &'static str = "String";

    fn to_value(&self) -> Value {
        Value::Bytes(self.0.to_vec())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bytes(bytes) => Some(Bytes(Cow::Owned(bytes.clone()))),
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
            Self::prefix_u64(&filter_min.0) as i128,
            Self::prefix_u64(&filter_max.0) as i128,
            Self::prefix_u64(&data_min.0) as i128,
            Self::prefix_u64(&data_max.0) as i128,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ignores_ownership() {
        let batch = b"apple".to_vec();
        let borrowed = Bytes::borrowed(&batch);
        let owned = Bytes::owned(b"apricot".to_vec());
        assert!(borrowed < owned);
        assert!(borrowed.is_borrowed());
        assert!(!borrowed.clone().into_static().is_borrowed());
        assert!(Bytes::borrowed(b"ab") < Bytes::borrowed(b"abc"));
    }

    #[test]
    fn prefix_projection_is_monotonic() {
        assert_eq!(Bytes::prefix_u64(b""), 0);
        assert_eq!(Bytes::prefix_u64(b"\x01"), 1 << 56);
        assert!(Bytes::prefix_u64(b"abc") < Bytes::prefix_u64(b"abd"));
        assert_eq!(
            Bytes::prefix_u64(b"abcdefgh-tail"),
            Bytes::prefix_u64(b"abcdefgh")
        );
    }

    #[test]
    fn ratio_over_prefixes() {
        let ratio = Bytes::overlap_ratio(
            &ColumnType::String,
            &Bytes::borrowed(b"\x00\x00\x00\x00\x00\x00\x00\x00"),
            &Bytes::borrowed(b"\x00\x00\x00\x00\x00\x00\x00\x09"),
            &Bytes::borrowed(b"\x00\x00\x00\x00\x00\x00\x00\x05"),
            &Bytes::borrowed(b"\x00\x00\x00\x00\x00\x00\x00\x0e"),
        );
        assert_eq!(ratio, 0.5);
    }
}
