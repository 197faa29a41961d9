use alloc::vec::Vec;

use super::*;

/// One frame of an animation, before it's turned into a PNG.
///
/// The image data pieces are the payloads of the frame's `IDAT` or `fdAT`
/// chunks (minus the `fdAT` sequence number), in datastream order. Together
/// they form one zlib stream, so the order must never change.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Frame<'b> {
  pub control: FrameControl,
  pub image_data: Vec<&'b [u8]>,
}
impl Debug for Frame<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Frame")
      .field("control", &self.control)
      .field("image_data", &(self.image_data.len(), self.image_data_len()))
      .finish()
  }
}
impl<'b> Frame<'b> {
  #[inline]
  #[must_use]
  pub const fn new(control: FrameControl) -> Self {
    Self { control, image_data: Vec::new() }
  }

  /// Total bytes of compressed image data.
  #[inline]
  #[must_use]
  pub fn image_data_len(&self) -> usize {
    self.image_data.iter().map(|d| d.len()).sum()
  }
}

/// A frame that's been written out as a standalone PNG.
///
/// This owns its bytes and doesn't borrow the source data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedFrame {
  pub control: FrameControl,
  pub png: Vec<u8>,
}
