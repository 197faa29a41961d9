use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct IhdrLayout {
  width: U32BE,
  height: U32BE,
  bit_depth: u8,
  color_type: u8,
  compression_method: u8,
  filter_method: u8,
  interlace_method: u8,
}

/// The `IHDR` of the animation, used as the template for each frame's header.
///
/// Each frame gets a copy with only the width and height changed, see
/// [`resized`](Self::resized).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader<'b> {
  layout: IhdrLayout,
  // IHDR is always 13 bytes in practice, anything extra is carried along.
  trailing: &'b [u8],
}
impl<'b> TryFrom<&'b [u8]> for ImageHeader<'b> {
  type Error = ApngError;
  #[inline]
  fn try_from(data: &'b [u8]) -> Result<Self, Self::Error> {
    let (layout, trailing) =
      try_pull_pod::<IhdrLayout>(data).map_err(|_| ApngError::MalformedChunk(ChunkTy::IHDR))?;
    Ok(Self { layout, trailing })
  }
}
impl<'b> ImageHeader<'b> {
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.layout.width.get()
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.layout.height.get()
  }
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.layout.bit_depth
  }
  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> u8 {
    self.layout.color_type
  }
  #[inline]
  #[must_use]
  pub const fn compression_method(&self) -> u8 {
    self.layout.compression_method
  }
  #[inline]
  #[must_use]
  pub const fn filter_method(&self) -> u8 {
    self.layout.filter_method
  }
  #[inline]
  #[must_use]
  pub const fn interlace_method(&self) -> u8 {
    self.layout.interlace_method
  }

  /// A copy of this header with new dimensions, all other fields unchanged.
  #[inline]
  #[must_use]
  pub const fn resized(&self, width: u32, height: u32) -> Self {
    let mut layout = self.layout;
    layout.width = U32BE::new(width);
    layout.height = U32BE::new(height);
    Self { layout, trailing: self.trailing }
  }

  /// The chunk data, as two pieces: the 13 byte fixed layout, and whatever
  /// followed it in the source chunk (normally nothing).
  #[inline]
  #[must_use]
  pub fn payload(&self) -> [&[u8]; 2] {
    [bytemuck::bytes_of(&self.layout), self.trailing]
  }

  /// Length of the chunk data.
  #[inline]
  #[must_use]
  pub const fn payload_len(&self) -> usize {
    core::mem::size_of::<IhdrLayout>() + self.trailing.len()
  }
}

#[test]
fn test_image_header_resized() {
  let data: [u8; 13] = [0, 0, 1, 0, 0, 0, 0, 200, 8, 3, 0, 0, 1];
  let header = ImageHeader::try_from(&data[..]).unwrap();
  assert_eq!((header.width(), header.height()), (256, 200));
  assert_eq!(header.payload_len(), 13);

  let small = header.resized(16, 9);
  assert_eq!((small.width(), small.height()), (16, 9));
  assert_eq!(small.payload()[0], &[0, 0, 0, 16, 0, 0, 0, 9, 8, 3, 0, 0, 1]);
  assert!(small.payload()[1].is_empty());
  // the template itself is untouched
  assert_eq!(header.payload()[0], &data[..]);
  assert_eq!(small.interlace_method(), 1);
  assert_eq!(small.color_type(), 3);
}

#[test]
fn test_image_header_too_short() {
  assert_eq!(
    ImageHeader::try_from(&[0_u8; 12][..]),
    Err(ApngError::MalformedChunk(ChunkTy::IHDR))
  );
}
