use alloc::vec::Vec;

use super::*;

/// The size and looping of the whole animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationDescriptor {
  /// Canvas width, from `IHDR`.
  pub width: u32,
  /// Canvas height, from `IHDR`.
  pub height: u32,
  pub num_plays: NumPlays,
}

/// An APNG that's been split into frames.
///
/// This borrows the source bytes. Frames are only turned into PNG data when
/// you ask for them, and each call writes a fresh buffer, so encoding the same
/// frame twice gives the same bytes.
#[derive(Debug, Clone)]
pub struct Apng<'b> {
  pub(crate) header: ImageHeader<'b>,
  pub(crate) animation: AnimationControl,
  pub(crate) frames: Vec<Frame<'b>>,
  pub(crate) pass_through: Vec<RawChunk<'b>>,
  pub(crate) iend: RawChunk<'b>,
}
impl<'b> Apng<'b> {
  #[inline]
  #[must_use]
  pub const fn descriptor(&self) -> AnimationDescriptor {
    AnimationDescriptor {
      width: self.header.width(),
      height: self.header.height(),
      num_plays: self.animation.num_plays,
    }
  }

  /// The source `IHDR`, which is the template for every frame's header.
  #[inline]
  #[must_use]
  pub const fn header(&self) -> &ImageHeader<'b> {
    &self.header
  }

  #[inline]
  #[must_use]
  pub const fn animation_control(&self) -> &AnimationControl {
    &self.animation
  }

  /// Frames in the order their `fcTL` chunks appeared.
  #[inline]
  #[must_use]
  pub fn frames(&self) -> &[Frame<'b>] {
    &self.frames
  }

  /// Chunks copied unchanged into every frame, in source order.
  #[inline]
  #[must_use]
  pub fn pass_through(&self) -> &[RawChunk<'b>] {
    &self.pass_through
  }

  #[inline]
  #[must_use]
  pub const fn iend(&self) -> &RawChunk<'b> {
    &self.iend
  }

  /// Writes any frame (from this animation or not) using this animation's
  /// header, pass-through chunks, and `IEND`.
  #[inline]
  pub fn encode(&self, frame: &Frame<'_>) -> ApngResult<Vec<u8>> {
    encode_frame(&self.header, frame, &self.pass_through, &self.iend)
  }

  /// Writes the frame at `index` as a standalone PNG.
  pub fn encode_frame(&self, index: usize) -> ApngResult<Vec<u8>> {
    let frame = self
      .frames
      .get(index)
      .ok_or(ApngError::FrameOutOfBounds { index, total: self.frames.len() })?;
    self.encode(frame)
  }

  /// Writes each frame in turn.
  #[inline]
  pub fn encode_frames(&self) -> impl Iterator<Item = ApngResult<Vec<u8>>> + '_ {
    self.frames.iter().map(|frame| self.encode(frame))
  }

  /// Writes all frames on the rayon thread pool. Output order matches
  /// [`frames`](Self::frames).
  #[cfg(feature = "rayon")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "rayon")))]
  pub fn encode_frames_par(&self) -> ApngResult<Vec<EncodedFrame>> {
    use rayon::prelude::*;
    self
      .frames
      .par_iter()
      .map(|frame| -> ApngResult<EncodedFrame> {
        Ok(EncodedFrame { control: frame.control, png: self.encode(frame)? })
      })
      .collect()
  }

  /// Writes all frames into owned buffers that no longer borrow the source.
  pub fn encoded_frames(&self) -> ApngResult<Vec<EncodedFrame>> {
    let mut out = Vec::new();
    out.try_reserve(self.frames.len())?;
    for frame in self.frames.iter() {
      out.push(EncodedFrame { control: frame.control, png: self.encode(frame)? });
    }
    Ok(out)
  }
}
