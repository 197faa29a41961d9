use core::num::NonZeroU32;

use super::*;

#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct ActlLayout {
  num_frames: U32BE,
  num_plays: U32BE,
}

/// How many times the animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumPlays {
  /// Loop forever.
  Infinite,
  /// Play this many times and then stop on the last frame.
  Count(NonZeroU32),
}
impl NumPlays {
  /// In `acTL`, a play count of 0 means forever.
  #[inline]
  #[must_use]
  pub const fn from_raw(num_plays: u32) -> Self {
    match NonZeroU32::new(num_plays) {
      Some(n) => Self::Count(n),
      None => Self::Infinite,
    }
  }

  /// Back to the `acTL` encoding.
  #[inline]
  #[must_use]
  pub const fn to_raw(self) -> u32 {
    match self {
      Self::Infinite => 0,
      Self::Count(n) => n.get(),
    }
  }
}
impl core::fmt::Display for NumPlays {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::Infinite => f.write_str("infinite"),
      Self::Count(n) => write!(f, "{} time{}", n, if n.get() == 1 { "" } else { "s" }),
    }
  }
}

/// `acTL`: Animation control
///
/// Spec: [acTL](https://www.w3.org/TR/png/#acTL-chunk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationControl {
  /// Declared frame count. Informational only, the frames actually present
  /// are what get split out.
  pub num_frames: u32,
  pub num_plays: NumPlays,
}
impl TryFrom<&[u8]> for AnimationControl {
  type Error = ApngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let (layout, _) =
      try_pull_pod::<ActlLayout>(data).map_err(|_| ApngError::MalformedChunk(ChunkTy::acTL))?;
    Ok(Self { num_frames: layout.num_frames.get(), num_plays: NumPlays::from_raw(layout.num_plays.get()) })
  }
}

#[test]
fn test_animation_control_num_plays() {
  let forever = AnimationControl::try_from(&[0_u8, 0, 0, 3, 0, 0, 0, 0][..]).unwrap();
  assert_eq!(forever.num_frames, 3);
  assert_eq!(forever.num_plays, NumPlays::Infinite);

  let twice = AnimationControl::try_from(&[0_u8, 0, 0, 3, 0, 0, 0, 2][..]).unwrap();
  assert_eq!(twice.num_plays, NumPlays::Count(NonZeroU32::new(2).unwrap()));
  assert_eq!(twice.num_plays.to_raw(), 2);

  assert_eq!(
    AnimationControl::try_from(&[0_u8, 0, 0, 3, 0, 0, 0][..]),
    Err(ApngError::MalformedChunk(ChunkTy::acTL))
  );
}
