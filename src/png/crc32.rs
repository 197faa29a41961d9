use super::*;

// https://www.w3.org/TR/png/#D-CRCAppendix
const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

/// A running CRC-32, for when the bytes to check aren't all in one slice.
///
/// ```
/// # use apng_split::png::{Crc32, crc32};
/// let mut crc = Crc32::new();
/// crc.update(b"IE");
/// crc.update(b"ND");
/// assert_eq!(crc.finish(), crc32(b"IEND"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crc32(u32);
impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl Crc32 {
  /// A fresh register.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(u32::MAX)
  }

  /// Feed more bytes into the register.
  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    let mut c = self.0;
    for &byte in bytes {
      c = CRC_TABLE[((c ^ u32::from(byte)) & 0xFF) as usize] ^ (c >> 8);
    }
    self.0 = c;
  }

  /// The CRC of everything fed in so far.
  #[inline]
  #[must_use]
  pub const fn finish(self) -> u32 {
    self.0 ^ u32::MAX
  }
}

/// CRC-32 of a byte slice, as PNG computes it.
#[inline]
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(bytes);
  crc.finish()
}

/// The CRC a chunk with this type and data must carry.
#[inline]
#[must_use]
pub fn chunk_crc(ty: ChunkTy, data: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(ty.as_bytes());
  crc.update(data);
  crc.finish()
}

#[test]
fn test_crc32_check_value() {
  assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
  assert_eq!(crc32(&[]), 0);
}

#[test]
fn test_crc_table_entries() {
  assert_eq!(CRC_TABLE[0], 0);
  assert_eq!(CRC_TABLE[1], 0x7707_3096);
  assert_eq!(CRC_TABLE[255], 0x2D02_EF8D);
}

#[test]
fn test_chunk_crc_matches_known_chunks() {
  // every PNG ends with these exact bytes
  assert_eq!(chunk_crc(ChunkTy::IEND, &[]), 0xAE42_6082);
  // 1x1 RGBA, 8 bits per channel
  let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0];
  assert_eq!(chunk_crc(ChunkTy::IHDR, &ihdr), 0x1F15_C489);
}

#[test]
fn test_crc32_split_updates() {
  let bytes = b"The quick brown fox jumps over the lazy dog";
  for split in 0..bytes.len() {
    let (a, b) = bytes.split_at(split);
    let mut crc = Crc32::default();
    crc.update(a);
    crc.update(b);
    assert_eq!(crc.finish(), 0x414F_A339, "failed split: {split}");
  }
}
