use super::*;

/// An unparsed chunk from a PNG.
///
/// Everything here borrows from the source bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawChunk<'b> {
  pub(crate) ty: ChunkTy,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
  pub(crate) bytes: &'b [u8],
}
impl Debug for RawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> RawChunk<'b> {
  /// The chunk's type.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkTy {
    self.ty
  }

  /// The data field only.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }

  /// The CRC that was stored in the datastream.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }

  /// The whole chunk exactly as it appeared: length, type, data, and CRC.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &'b [u8] {
    self.bytes
  }

  /// The CRC computed from the type and data.
  #[inline]
  #[must_use]
  pub fn compute_crc(&self) -> u32 {
    chunk_crc(self.ty, self.data)
  }

  #[inline]
  #[must_use]
  pub fn crc_is_valid(&self) -> bool {
    self.compute_crc() == self.declared_crc
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// If a chunk would run past the end of the data you get a single
/// [`TruncatedStream`](ApngError::TruncatedStream) error and then the
/// iterator is done. Arbitrary input never makes it panic.
#[derive(Debug, Clone)]
pub struct RawChunkIter<'b> {
  spare: &'b [u8],
}
impl<'b> RawChunkIter<'b> {
  /// Pass the full PNG bytes, the first 8 bytes are skipped without being
  /// checked.
  ///
  /// Use [`is_png_signature_correct`] if you care about the signature.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self { spare: rest },
      _ => Self { spare: &[] },
    }
  }

  /// Iterate bytes that start directly with a chunk.
  #[inline]
  #[must_use]
  pub const fn from_chunk_bytes(spare: &'b [u8]) -> Self {
    Self { spare }
  }

  /// Bytes not yet iterated.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.spare
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = ApngResult<RawChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.spare.is_empty() {
      return None;
    }
    match pull_chunk(self.spare) {
      Ok((chunk, rest)) => {
        self.spare = rest;
        Some(Ok(chunk))
      }
      Err(e) => {
        self.spare = &[];
        Some(Err(e))
      }
    }
  }
}
impl core::iter::FusedIterator for RawChunkIter<'_> {}

fn pull_chunk(bytes: &[u8]) -> ApngResult<(RawChunk<'_>, &[u8])> {
  let (length, rest) = try_pull_pod::<U32BE>(bytes)?;
  let (ty, rest) = try_pull_byte_array::<4>(rest)?;
  let length = usize::try_from(length.get()).map_err(|_| ApngError::TruncatedStream)?;
  let (data, rest) = try_split_at(rest, length)?;
  let (declared_crc, rest) = try_pull_pod::<U32BE>(rest)?;
  let whole = &bytes[..bytes.len() - rest.len()];
  Ok((RawChunk { ty: ChunkTy(ty), data, declared_crc: declared_crc.get(), bytes: whole }, rest))
}

#[cfg(test)]
const IEND_CHUNK: [u8; 12] = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];

#[test]
fn test_raw_chunk_iter_reads_chunks() {
  let mut bytes = [0_u8; 8 + 13 + 12];
  bytes[..8].copy_from_slice(&PNG_SIGNATURE);
  bytes[8..12].copy_from_slice(&1_u32.to_be_bytes());
  bytes[12..16].copy_from_slice(b"sRGB");
  bytes[16] = 0;
  bytes[17..21].copy_from_slice(&chunk_crc(ChunkTy(*b"sRGB"), &[0]).to_be_bytes());
  bytes[21..].copy_from_slice(&IEND_CHUNK);

  let mut it = RawChunkIter::new(&bytes);
  let srgb = it.next().unwrap().unwrap();
  assert_eq!(srgb.ty(), ChunkTy(*b"sRGB"));
  assert_eq!(srgb.data(), &[0]);
  assert_eq!(srgb.as_bytes(), &bytes[8..21]);
  assert!(srgb.crc_is_valid());
  let iend = it.next().unwrap().unwrap();
  assert_eq!(iend.ty(), ChunkTy::IEND);
  assert_eq!(iend.as_bytes(), &IEND_CHUNK);
  assert!(iend.crc_is_valid());
  assert!(it.next().is_none());
}

#[test]
fn test_raw_chunk_iter_truncation_is_reported_once() {
  // declares 200 data bytes but there's none
  let bytes = [0, 0, 0, 200, b't', b'E', b'X', b't', 1, 2, 3];
  let mut it = RawChunkIter::from_chunk_bytes(&bytes);
  assert_eq!(it.next(), Some(Err(ApngError::TruncatedStream)));
  assert_eq!(it.next(), None);
  assert!(it.remaining().is_empty());

  // the CRC is cut short
  let mut it = RawChunkIter::from_chunk_bytes(&IEND_CHUNK[..10]);
  assert_eq!(it.next(), Some(Err(ApngError::TruncatedStream)));

  // a few stray bytes after a good chunk
  let mut bytes = [0_u8; 15];
  bytes[..12].copy_from_slice(&IEND_CHUNK);
  let mut it = RawChunkIter::from_chunk_bytes(&bytes);
  assert!(it.next().unwrap().is_ok());
  assert_eq!(it.next(), Some(Err(ApngError::TruncatedStream)));
}

#[test]
fn test_raw_chunk_iter_keeps_bad_crc() {
  let mut bytes = IEND_CHUNK;
  bytes[11] ^= 0xFF;
  let chunk = RawChunkIter::from_chunk_bytes(&bytes).next().unwrap().unwrap();
  assert!(!chunk.crc_is_valid());
  assert_eq!(chunk.compute_crc(), 0xAE42_6082);
}
