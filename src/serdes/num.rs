use std::{io, mem::size_of};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{Decode, Encode};

macro_rules! implement_encode_decode {
    ($ty:ty) => {
        impl Encode for $ty {
            type Error = io::Error;

            async fn encode<W>(&self, writer: &mut W) -> Result<(), Self::Error>
            where
                W: AsyncWrite + Unpin + Send,
            {
                writer.write_all(&self.to_le_bytes()).await
            }

            fn size(&self) -> usize {
                size_of::<Self>()
            }
        }

        impl Decode for $ty {
            type Error = io::Error;

            async fn decode<R>(reader: &mut R) -> Result<Self, Self::Error>
            where
                R: AsyncRead + Unpin,
            {
                let mut buf = [0; size_of::<Self>()];
                reader.read_exact(&mut buf).await?;

                Ok(Self::from_le_bytes(buf))
            }
        }
    };
}

implement_encode_decode!(i8);
implement_encode_decode!(i16);
implement_encode_decode!(i32);
implement_encode_decode!(i64);
implement_encode_decode!(i128);
implement_encode_decode!(u8);
implement_encode_decode!(u32);
implement_encode_decode!(f32);
implement_encode_decode!(f64);

#[cfg(test)]
mod tests {
    use std::io::{Cursor, SeekFrom};

    use tokio::io::AsyncSeekExt;

    use crate::serdes::{Decode, Encode};

    #[tokio::test]
    async fn test_little_endian_layout() {
        let mut bytes = Vec::new();
        let mut cursor = Cursor::new(&mut bytes);

        0x0102_0304i32.encode(&mut cursor).await.unwrap();
        (-1i8).encode(&mut cursor).await.unwrap();
        1.5f64.encode(&mut cursor).await.unwrap();

        cursor.seek(SeekFrom::Start(0)).await.unwrap();
        assert_eq!(i32::decode(&mut cursor).await.unwrap(), 0x0102_0304);
        assert_eq!(i8::decode(&mut cursor).await.unwrap(), -1);
        assert_eq!(f64::decode(&mut cursor).await.unwrap(), 1.5);

        assert_eq!(&bytes[..5], &[0x04, 0x03, 0x02, 0x01, 0xff]);
    }

    #[tokio::test]
    async fn test_short_read_is_io_error() {
        let mut cursor = Cursor::new(vec![0u8; 3]);
        let err = i32::decode(&mut cursor).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
