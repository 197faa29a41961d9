//! Module for working with PNG and APNG chunk data.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! ## Chunks
//!
//! After the 8 byte signature, a PNG is a series of chunks laid out back to
//! back with no padding:
//!
//! * 4 bytes: big-endian length of the data field
//! * 4 bytes: chunk type (ascii letters)
//! * `length` bytes: data
//! * 4 bytes: big-endian CRC-32 of the type and data bytes
//!
//! An APNG adds `acTL` before the first `IDAT`, and then one `fcTL` per frame.
//! The frame's image data follows its `fcTL`, either as `IDAT` (only possible
//! for the first frame, which is then also the default image) or as `fdAT`,
//! which is an `IDAT` payload with a 4 byte sequence number on the front.
//!
//! ## What Gets Checked
//!
//! Parsing is structural. Chunk lengths are respected and the handful of
//! chunks needed to rebuild frames must have enough data for their fixed
//! layouts, but nothing else about chunk content is validated. Input CRCs
//! and sequence numbers are not checked unless you ask for it with
//! [`SplitOptions`](crate::png::SplitOptions).

use core::fmt::{Debug, Write};

use crate::{try_pull_byte_array, try_pull_pod, try_split_at, ApngError, ApngResult, U16BE, U32BE};

mod crc32;
pub use crc32::*;

mod chunk_ty;
pub use chunk_ty::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod actl;
pub use actl::*;

mod fctl;
pub use fctl::*;

#[cfg(feature = "alloc")]
mod frame;
#[cfg(feature = "alloc")]
pub use frame::*;

#[cfg(feature = "alloc")]
mod write;
#[cfg(feature = "alloc")]
pub use write::*;

#[cfg(feature = "alloc")]
mod apng;
#[cfg(feature = "alloc")]
pub use apng::*;

#[cfg(feature = "alloc")]
mod splitter;
#[cfg(feature = "alloc")]
pub use splitter::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG signature is correct.
#[inline]
#[must_use]
pub fn is_png_signature_correct(bytes: &[u8]) -> bool {
  bytes.starts_with(&PNG_SIGNATURE)
}

#[test]
fn test_is_png_signature_correct() {
  assert!(is_png_signature_correct(&PNG_SIGNATURE));
  assert!(is_png_signature_correct(&[137, 80, 78, 71, 13, 10, 26, 10, 0, 0]));
  assert!(!is_png_signature_correct(&[137, 80, 78, 71, 13, 10, 26]));
  assert!(!is_png_signature_correct(&[137, 80, 78, 71, 13, 10, 26, 11]));
  assert!(!is_png_signature_correct(&[]));
}
