use bytemuck::{Pod, Zeroable};

macro_rules! big_endian_int {
  ($(#[$meta:meta])* $name:ident, $int:ty, $n:literal) => {
    $(#[$meta])*
    ///
    /// This stores only an array of bytes, so unlike the native integer it has
    /// an alignment of 1, and it can sit at any offset of a `#[repr(C)]` chunk
    /// layout.
    #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
    #[repr(transparent)]
    pub struct $name([u8; $n]);
    impl $name {
      /// Convert to the native integer.
      #[inline]
      #[must_use]
      pub const fn get(self) -> $int {
        <$int>::from_be_bytes(self.0)
      }
      /// Store a native integer.
      #[inline]
      #[must_use]
      pub const fn new(value: $int) -> Self {
        Self(value.to_be_bytes())
      }
    }
    impl core::fmt::Debug for $name {
      #[inline]
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple(stringify!($name)).field(&self.get()).finish()
      }
    }
    impl From<$int> for $name {
      #[inline]
      fn from(value: $int) -> Self {
        Self::new(value)
      }
    }
    impl From<$name> for $int {
      #[inline]
      fn from(value: $name) -> Self {
        value.get()
      }
    }
  };
}

big_endian_int!(
  /// A `u16` stored as big-endian bytes.
  U16BE, u16, 2
);
big_endian_int!(
  /// A `u32` stored as big-endian bytes.
  U32BE, u32, 4
);

#[test]
fn test_big_endian_byte_order() {
  assert_eq!(bytemuck::bytes_of(&U32BE::new(0x0102_0304)), &[1, 2, 3, 4]);
  assert_eq!(bytemuck::bytes_of(&U16BE::new(0xABCD)), &[0xAB, 0xCD]);
  assert_eq!(u32::from(U32BE::from(77)), 77);
  assert_eq!(core::mem::align_of::<U32BE>(), 1);
}
