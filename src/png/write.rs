use alloc::vec::Vec;

use super::*;

/// Bytes taken up by a chunk with this much data.
#[inline]
#[must_use]
pub const fn encoded_chunk_len(data_len: usize) -> usize {
  data_len + 12
}

/// Appends a new chunk with a freshly computed length and CRC.
#[inline]
pub fn write_chunk(out: &mut Vec<u8>, ty: ChunkTy, data: &[u8]) -> ApngResult<()> {
  write_chunk_parts(out, ty, &[data])
}

/// As [`write_chunk`], with the data given in pieces that are written back to
/// back.
pub fn write_chunk_parts(out: &mut Vec<u8>, ty: ChunkTy, parts: &[&[u8]]) -> ApngResult<()> {
  let data_len: usize = parts.iter().map(|p| p.len()).sum();
  let length = u32::try_from(data_len)
    .ok()
    .filter(|&len| len <= i32::MAX as u32)
    .ok_or(ApngError::ChunkTooLarge(ty))?;
  out.try_reserve(encoded_chunk_len(data_len))?;
  out.extend_from_slice(&length.to_be_bytes());
  out.extend_from_slice(ty.as_bytes());
  let mut crc = Crc32::new();
  crc.update(ty.as_bytes());
  for part in parts {
    out.extend_from_slice(part);
    crc.update(part);
  }
  out.extend_from_slice(&crc.finish().to_be_bytes());
  Ok(())
}

/// Writes one frame as a standalone PNG.
///
/// The output is, in order:
/// 1. The PNG signature.
/// 2. A new `IHDR`: the animation's header with the frame's width and height.
/// 3. Every pass-through chunk, byte for byte.
/// 4. One new `IDAT` per piece of the frame's image data.
/// 5. The source `IEND`, byte for byte.
pub fn encode_frame(
  header: &ImageHeader<'_>, frame: &Frame<'_>, pass_through: &[RawChunk<'_>], iend: &RawChunk<'_>,
) -> ApngResult<Vec<u8>> {
  let mut out = Vec::new();
  encode_frame_into(header, frame, pass_through, iend, &mut out)?;
  Ok(out)
}

/// As [`encode_frame`], appending to an existing buffer.
///
/// The exact space needed is reserved up front. If an error is returned the
/// buffer may hold a partial frame.
pub fn encode_frame_into(
  header: &ImageHeader<'_>, frame: &Frame<'_>, pass_through: &[RawChunk<'_>], iend: &RawChunk<'_>,
  out: &mut Vec<u8>,
) -> ApngResult<()> {
  let header = header.resized(frame.control.width, frame.control.height);
  let needed = PNG_SIGNATURE.len()
    + encoded_chunk_len(header.payload_len())
    + pass_through.iter().map(|c| c.as_bytes().len()).sum::<usize>()
    + frame.image_data.iter().map(|d| encoded_chunk_len(d.len())).sum::<usize>()
    + iend.as_bytes().len();
  out.try_reserve(needed)?;

  out.extend_from_slice(&PNG_SIGNATURE);
  write_chunk_parts(out, ChunkTy::IHDR, &header.payload())?;
  for chunk in pass_through {
    out.extend_from_slice(chunk.as_bytes());
  }
  for data in frame.image_data.iter() {
    write_chunk(out, ChunkTy::IDAT, data)?;
  }
  out.extend_from_slice(iend.as_bytes());
  Ok(())
}

#[test]
fn test_write_chunk_iend() {
  let mut out = Vec::new();
  write_chunk(&mut out, ChunkTy::IEND, &[]).unwrap();
  assert_eq!(out, [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
}

#[test]
fn test_write_chunk_parts_same_as_whole() {
  let mut whole = Vec::new();
  write_chunk(&mut whole, ChunkTy(*b"tEXt"), b"Title\0Ball").unwrap();
  let mut parts = Vec::new();
  write_chunk_parts(&mut parts, ChunkTy(*b"tEXt"), &[&b"Title"[..], b"\0", b"", b"Ball"]).unwrap();
  assert_eq!(whole, parts);
  assert_eq!(whole.len(), encoded_chunk_len(10));
  let chunk = RawChunkIter::from_chunk_bytes(&whole).next().unwrap().unwrap();
  assert!(chunk.crc_is_valid());
  assert_eq!(chunk.data(), b"Title\0Ball");
}
