use ssz_decoder::DecodeError;
use ssz_merkle::Hasher;
use ssz_types::Schema;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::driver::RootDriver;
use crate::root::Root;

impl<H: Hasher> RootDriver<H> {
  /// Root of the bytes produced by an async reader.
  ///
  /// The reader is drained into memory, then the slice path is taken.
  /// Reading suspends; hashing does not, so very large inputs hold the
  /// task for the duration of the merkleization.
  ///
  /// # Errors
  ///
  /// - [`DecodeError::Io`] if the reader fails.
  /// - Any parser error, as for [`root_from_slice`](Self::root_from_slice).
  pub async fn root_from_async_reader<R>(&self, schema: &Schema, mut reader: R) -> Result<Root, DecodeError>
  where
    R: AsyncRead + Unpin,
  {
    let mut bytes = Vec::with_capacity(self.config().effective_drain_capacity());
    reader.read_to_end(&mut bytes).await?;
    tracing::debug!(len = bytes.len(), "drained async reader");
    self.root_from_slice(schema, &bytes)
  }
}

/// Root of the bytes produced by an async reader, using SHA-256.
///
/// # Errors
///
/// See [`RootDriver::root_from_async_reader`].
pub async fn compute_root_from_async_reader<R>(schema: &Schema, reader: R) -> Result<Root, DecodeError>
where
  R: AsyncRead + Unpin,
{
  RootDriver::new().root_from_async_reader(schema, reader).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::driver::compute_root_from_slice;
  use ssz_decoder::ErrorKind;

  #[tokio::test]
  async fn async_matches_slice() {
    let schema = Schema::bitlist();
    let data = [0xFFu8, 0x10];
    let root = compute_root_from_async_reader(&schema, &data[..]).await.unwrap();
    assert_eq!(root, compute_root_from_slice(&schema, &data).unwrap());
  }

  #[tokio::test]
  async fn async_over_duplex_stream() {
    let (mut tx, rx) = tokio::io::duplex(16);
    let data: Vec<u8> = (0..96).collect();
    let expected = compute_root_from_slice(&Schema::bytes(), &data).unwrap();

    let writer = tokio::spawn(async move {
      use tokio::io::AsyncWriteExt;
      tx.write_all(&data).await.unwrap();
    });
    let root = compute_root_from_async_reader(&Schema::bytes(), rx).await.unwrap();
    writer.await.unwrap();
    assert_eq!(root, expected);
  }

  #[tokio::test]
  async fn async_parse_error() {
    let err = compute_root_from_async_reader(&Schema::bitlist(), &[0x00u8][..])
      .await
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BitlistPadding);
  }
}
