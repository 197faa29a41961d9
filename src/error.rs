use crate::png::ChunkTy;

/// An error from the `apng_split` crate.
///
/// Every error is found during the one pass over the input, and none of them
/// are recoverable: there's no partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ApngError {
  /// The first 8 bytes of the data aren't the PNG signature.
  #[error("the data doesn't start with the PNG signature")]
  InvalidSignature,

  /// A chunk declared more bytes than are left in the data.
  #[error("the data ends in the middle of a chunk")]
  TruncatedStream,

  /// A required chunk was never seen.
  #[error("no `{0}` chunk")]
  MissingChunk(ChunkTy),

  /// A chunk showed up where it can't be used (`fdAT` before any `fcTL`).
  #[error("unexpected `{0}` chunk")]
  UnexpectedChunk(ChunkTy),

  /// A chunk's data is too short for the fixed layout of that chunk type.
  #[error("the `{0}` chunk is too short")]
  MalformedChunk(ChunkTy),

  /// A chunk being written has more data than a chunk length can express.
  #[error("the `{0}` chunk data doesn't fit in a chunk")]
  ChunkTooLarge(ChunkTy),

  /// Strict sequence checking found a gap or repeat.
  #[error("sequence number {found} where {expected} was expected")]
  SequenceMismatch {
    /// The next number in the sequence.
    expected: u32,
    /// What the chunk actually had.
    found: u32,
  },

  /// CRC verification found a damaged chunk.
  #[error("the `{chunk}` chunk declares CRC {declared:#010X} but the data gives {actual:#010X}")]
  CrcMismatch {
    /// Type of the damaged chunk.
    chunk: ChunkTy,
    /// The CRC stored after the chunk data.
    declared: u32,
    /// The CRC computed over the chunk type and data.
    actual: u32,
  },

  /// The animation has more frames than the configured limit.
  #[error("more than {limit} frames")]
  TooManyFrames {
    /// The configured limit.
    limit: u32,
  },

  /// Asked for a frame that doesn't exist.
  #[error("frame {index} out of bounds (total: {total})")]
  FrameOutOfBounds {
    /// The requested frame index.
    index: usize,
    /// How many frames there are.
    total: usize,
  },

  /// The allocator couldn't give us enough space.
  #[error("the allocator couldn't give us enough space")]
  Alloc,
}

#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for ApngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}

/// Result alias used throughout the crate.
pub type ApngResult<T> = Result<T, ApngError>;
