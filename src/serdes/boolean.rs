use std::{io, mem::size_of};

use tokio::io::{AsyncRead, AsyncWrite};

use crate::serdes::{Decode, Encode};

impl Encode for bool {
    type Error = io::Error;

    async fn encode<W>(&self, writer: &mut W) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        u8::from(*self).encode(writer).await
    }

    fn size(&self) -> usize {
        size_of::<u8>()
    }
}

impl Decode for bool {
    type Error = io::Error;

    async fn decode<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: AsyncRead + Unpin,
    {
        Ok(u8::decode(reader).await? != 0)
    }
}
