use super::*;

/// The four ascii letters naming a chunk type.
///
/// Bit 5 of each letter (upper vs lower case) carries a property of the
/// chunk, see the `is_` methods.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTy {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Palette
  pub const PLTE: Self = Self(*b"PLTE");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image trailer
  pub const IEND: Self = Self(*b"IEND");
  /// Animation control
  pub const acTL: Self = Self(*b"acTL");
  /// Frame control
  pub const fcTL: Self = Self(*b"fcTL");
  /// Frame data
  pub const fdAT: Self = Self(*b"fdAT");

  /// The raw type bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }

  /// Decoders must understand critical chunks to show the image.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0x20) == 0
  }

  /// Public chunks are registered with the PNG spec, private ones aren't.
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    (self.0[1] & 0x20) == 0
  }

  /// Editors that change critical chunks may still copy this chunk unchanged.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & 0x20) != 0
  }
}
impl Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('"')
  }
}
impl core::fmt::Display for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // non-ascii bytes still print, they just won't look like letters
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for ChunkTy {
  #[inline]
  fn from(bytes: [u8; 4]) -> Self {
    Self(bytes)
  }
}

#[test]
fn test_chunk_ty_property_bits() {
  assert!(ChunkTy::IHDR.is_critical());
  assert!(ChunkTy::IEND.is_critical());
  assert!(!ChunkTy::acTL.is_critical());
  assert!(!ChunkTy::fdAT.is_critical());
  assert!(ChunkTy(*b"tEXt").is_public());
  assert!(!ChunkTy(*b"prVt").is_public());
  assert!(ChunkTy(*b"tEXt").is_safe_to_copy());
  assert!(!ChunkTy(*b"gAMA").is_safe_to_copy());
}

#[test]
fn test_chunk_ty_formatting() {
  extern crate std;
  use std::format;
  assert_eq!(format!("{}", ChunkTy::fcTL), "fcTL");
  assert_eq!(format!("{:?}", ChunkTy::fcTL), "\"fcTL\"");
}
