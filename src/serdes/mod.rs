//! Binary encoding of the wire form.
//!
//! All integers are little-endian; variable-length payloads carry a `u32`
//! length prefix.

mod boolean;
mod bytes;
mod num;

use std::{future::Future, io};

use tokio::io::{AsyncRead, AsyncWrite};

pub trait Encode {
    type Error: From<io::Error> + std::error::Error + Send + Sync + 'static;

    fn encode<W>(&self, writer: &mut W) -> impl Future<Output = Result<(), Self::Error>> + Send
    where
        W: AsyncWrite + Unpin + Send;

    /// Encoded length in bytes.
    fn size(&self) -> usize;
}

impl<T: Encode + Sync + ?Sized> Encode for &T {
    type Error = T::Error;

    async fn encode<W>(&self, writer: &mut W) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        Encode::encode(*self, writer).await
    }

    fn size(&self) -> usize {
        Encode::size(*self)
    }
}

pub trait Decode: Sized {
    type Error: From<io::Error> + std::error::Error + Send + Sync + 'static;

    fn decode<R>(reader: &mut R) -> impl Future<Output = Result<Self, Self::Error>>
    where
        R: AsyncRead + Unpin;
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, SeekFrom};

    use tokio::io::AsyncSeekExt;

    use super::*;

    #[tokio::test]
    async fn test_encode_decode() {
        struct Range(i32, i32);

        impl Encode for Range {
            type Error = io::Error;

            async fn encode<W>(&self, writer: &mut W) -> Result<(), Self::Error>
            where
                W: AsyncWrite + Unpin + Send,
            {
                self.0.encode(writer).await?;
                self.1.encode(writer).await
            }

            fn size(&self) -> usize {
                2 * std::mem::size_of::<i32>()
            }
        }

        impl Decode for Range {
            type Error = io::Error;

            async fn decode<R>(reader: &mut R) -> Result<Self, Self::Error>
            where
                R: AsyncRead + Unpin,
            {
                Ok(Range(i32::decode(reader).await?, i32::decode(reader).await?))
            }
        }

        let original = Range(-7, 42);
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);
        original.encode(&mut cursor).await.unwrap();
        assert_eq!(cursor.position() as usize, original.size());

        cursor.seek(SeekFrom::Start(0)).await.unwrap();
        let decoded = Range::decode(&mut cursor).await.unwrap();

        assert_eq!((original.0, original.1), (decoded.0, decoded.1));
    }
}
