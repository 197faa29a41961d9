use core::time::Duration;

use super::*;

#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct FctlLayout {
  sequence_number: U32BE,
  width: U32BE,
  height: U32BE,
  x_offset: U32BE,
  y_offset: U32BE,
  delay_num: U16BE,
  delay_den: U16BE,
  dispose_op: u8,
  blend_op: u8,
}

/// What to do with the frame's region of the canvas once the frame's delay is
/// over, before the next frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisposeOp {
  /// Leave the canvas as it is.
  None,
  /// Clear the region to fully transparent black.
  Background,
  /// Put the region back to what it was before this frame was drawn.
  Previous,
}
impl DisposeOp {
  #[inline]
  #[must_use]
  pub const fn from_code(code: u8) -> Option<Self> {
    Some(match code {
      0 => Self::None,
      1 => Self::Background,
      2 => Self::Previous,
      _ => return None,
    })
  }
}

/// How the frame's pixels combine with the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOp {
  /// Overwrite the region, alpha included.
  Source,
  /// Alpha-composite the frame over the region.
  Over,
}
impl BlendOp {
  #[inline]
  #[must_use]
  pub const fn from_code(code: u8) -> Option<Self> {
    Some(match code {
      0 => Self::Source,
      1 => Self::Over,
      _ => return None,
    })
  }
}

/// `fcTL`: Frame control
///
/// Spec: [fcTL](https://www.w3.org/TR/png/#fcTL-chunk)
///
/// The op codes are kept raw, use [`dispose`](Self::dispose) and
/// [`blend`](Self::blend) for the typed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameControl {
  pub sequence_number: u32,
  pub width: u32,
  pub height: u32,
  pub x_offset: u32,
  pub y_offset: u32,
  pub delay_num: u16,
  /// A denominator of 0 means 100 (the delay is in hundredths of a second).
  pub delay_den: u16,
  pub dispose_op: u8,
  pub blend_op: u8,
}
impl TryFrom<&[u8]> for FrameControl {
  type Error = ApngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let (layout, _) =
      try_pull_pod::<FctlLayout>(data).map_err(|_| ApngError::MalformedChunk(ChunkTy::fcTL))?;
    Ok(Self {
      sequence_number: layout.sequence_number.get(),
      width: layout.width.get(),
      height: layout.height.get(),
      x_offset: layout.x_offset.get(),
      y_offset: layout.y_offset.get(),
      delay_num: layout.delay_num.get(),
      delay_den: layout.delay_den.get(),
      dispose_op: layout.dispose_op,
      blend_op: layout.blend_op,
    })
  }
}
impl FrameControl {
  #[inline]
  #[must_use]
  const fn effective_delay_den(&self) -> u16 {
    if self.delay_den == 0 {
      100
    } else {
      self.delay_den
    }
  }

  /// How long the frame stays up, in milliseconds. Can be fractional.
  #[inline]
  #[must_use]
  pub fn delay_millis(&self) -> f64 {
    f64::from(self.delay_num) / f64::from(self.effective_delay_den()) * 1000.0
  }

  /// How long the frame stays up.
  #[inline]
  #[must_use]
  pub fn delay(&self) -> Duration {
    Duration::from_secs_f64(f64::from(self.delay_num) / f64::from(self.effective_delay_den()))
  }

  /// `None` if the code isn't one the APNG spec defines.
  #[inline]
  #[must_use]
  pub const fn dispose(&self) -> Option<DisposeOp> {
    DisposeOp::from_code(self.dispose_op)
  }

  /// `None` if the code isn't one the APNG spec defines.
  #[inline]
  #[must_use]
  pub const fn blend(&self) -> Option<BlendOp> {
    BlendOp::from_code(self.blend_op)
  }
}

#[cfg(test)]
fn fctl_data(delay_num: u16, delay_den: u16) -> [u8; 26] {
  let mut data = [0_u8; 26];
  data[0..4].copy_from_slice(&7_u32.to_be_bytes());
  data[4..8].copy_from_slice(&32_u32.to_be_bytes());
  data[8..12].copy_from_slice(&24_u32.to_be_bytes());
  data[12..16].copy_from_slice(&4_u32.to_be_bytes());
  data[16..20].copy_from_slice(&2_u32.to_be_bytes());
  data[20..22].copy_from_slice(&delay_num.to_be_bytes());
  data[22..24].copy_from_slice(&delay_den.to_be_bytes());
  data[24] = 1;
  data[25] = 1;
  data
}

#[test]
fn test_frame_control_field_offsets() {
  let fctl = FrameControl::try_from(&fctl_data(3, 4)[..]).unwrap();
  assert_eq!(
    fctl,
    FrameControl {
      sequence_number: 7,
      width: 32,
      height: 24,
      x_offset: 4,
      y_offset: 2,
      delay_num: 3,
      delay_den: 4,
      dispose_op: 1,
      blend_op: 1,
    }
  );
  assert_eq!(fctl.dispose(), Some(DisposeOp::Background));
  assert_eq!(fctl.blend(), Some(BlendOp::Over));
}

#[test]
fn test_frame_control_delay() {
  let half = FrameControl::try_from(&fctl_data(1, 2)[..]).unwrap();
  assert_eq!(half.delay_millis(), 500.0);
  assert_eq!(half.delay(), Duration::from_millis(500));

  let tenth = FrameControl::try_from(&fctl_data(1, 10)[..]).unwrap();
  assert_eq!(tenth.delay_millis(), 100.0);

  // zero denominator is treated as 100
  let zero_den = FrameControl::try_from(&fctl_data(5, 0)[..]).unwrap();
  assert_eq!(zero_den.delay_millis(), 50.0);

  let no_delay = FrameControl::try_from(&fctl_data(0, 0)[..]).unwrap();
  assert_eq!(no_delay.delay(), Duration::ZERO);
}

#[test]
fn test_frame_control_bad_ops_and_length() {
  let mut data = fctl_data(1, 1);
  data[24] = 3;
  data[25] = 9;
  let fctl = FrameControl::try_from(&data[..]).unwrap();
  assert_eq!((fctl.dispose(), fctl.blend()), (None, None));
  assert_eq!(fctl.dispose_op, 3);

  assert_eq!(FrameControl::try_from(&data[..25]), Err(ApngError::MalformedChunk(ChunkTy::fcTL)));
}
