use alloc::vec::Vec;

use tracing::{debug, trace, warn};

use super::*;

/// How `fcTL` and `fdAT` sequence numbers are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceCheck {
  /// Sequence numbers are parsed but not checked. Frame order is always the
  /// order of the `fcTL` chunks in the datastream.
  #[default]
  Permissive,
  /// Sequence numbers must count up by one from 0 across all `fcTL` and
  /// `fdAT` chunks, otherwise
  /// [`SequenceMismatch`](ApngError::SequenceMismatch).
  Strict,
}

/// Settings for splitting an APNG.
///
/// The default is permissive: no CRC checks, no sequence checks, no frame
/// limit.
///
/// ```no_run
/// use apng_split::png::{SequenceCheck, SplitOptions};
/// let bytes: &[u8] = unimplemented!("data from somewhere");
/// let apng = SplitOptions::new()
///   .sequence_check(SequenceCheck::Strict)
///   .verify_crc(true)
///   .max_frames(1000)
///   .split(bytes)?;
/// # Ok::<(), apng_split::ApngError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SplitOptions {
  /// How `fcTL`/`fdAT` sequence numbers are treated.
  pub sequence_check: SequenceCheck,
  /// Check every input chunk's CRC.
  pub verify_crc: bool,
  /// Most `fcTL` chunks allowed, `None` for no limit.
  pub max_frames: Option<u32>,
}
impl SplitOptions {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { sequence_check: SequenceCheck::Permissive, verify_crc: false, max_frames: None }
  }

  #[inline]
  #[must_use]
  pub const fn sequence_check(mut self, sequence_check: SequenceCheck) -> Self {
    self.sequence_check = sequence_check;
    self
  }

  #[inline]
  #[must_use]
  pub const fn verify_crc(mut self, verify_crc: bool) -> Self {
    self.verify_crc = verify_crc;
    self
  }

  /// Fail with [`TooManyFrames`](ApngError::TooManyFrames) past this many
  /// `fcTL` chunks.
  #[inline]
  #[must_use]
  pub const fn max_frames(mut self, limit: u32) -> Self {
    self.max_frames = Some(limit);
    self
  }

  /// Splits APNG bytes into frames.
  ///
  /// This is a single pass over the chunks. `IDAT` data that comes before the
  /// first `fcTL` is the default image for non-APNG decoders and isn't part of
  /// the animation, so it's dropped.
  #[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
  pub fn split<'b>(&self, bytes: &'b [u8]) -> ApngResult<Apng<'b>> {
    if !is_png_signature_correct(bytes) {
      return Err(ApngError::InvalidSignature);
    }
    let mut scan = Scan::new(*self);
    let state = RawChunkIter::new(bytes)
      .try_fold(ScanState::Idle, |state, chunk| scan.step(state, chunk?))?;
    if let ScanState::Open(frame) = state {
      scan.emit(frame);
    }
    scan.finish()
  }
}

/// Splits APNG bytes into frames using the default [`SplitOptions`].
#[inline]
pub fn split(bytes: &[u8]) -> ApngResult<Apng<'_>> {
  SplitOptions::default().split(bytes)
}

/// Where the scan is between `fcTL` chunks.
enum ScanState<'b> {
  /// No `fcTL` seen yet.
  Idle,
  /// Collecting image data for this frame.
  Open(Frame<'b>),
}

struct Scan<'b> {
  options: SplitOptions,
  ihdr: Option<RawChunk<'b>>,
  actl: Option<RawChunk<'b>>,
  iend: Option<RawChunk<'b>>,
  pass_through: Vec<RawChunk<'b>>,
  frames: Vec<Frame<'b>>,
  frames_opened: u32,
  next_sequence_number: u32,
  default_image_chunks: usize,
}
impl<'b> Scan<'b> {
  fn new(options: SplitOptions) -> Self {
    Self {
      options,
      ihdr: None,
      actl: None,
      iend: None,
      pass_through: Vec::new(),
      frames: Vec::new(),
      frames_opened: 0,
      next_sequence_number: 0,
      default_image_chunks: 0,
    }
  }

  fn step(&mut self, state: ScanState<'b>, chunk: RawChunk<'b>) -> ApngResult<ScanState<'b>> {
    trace!(chunk = %chunk.ty(), len = chunk.data().len(), "chunk");
    if self.options.verify_crc {
      let actual = chunk.compute_crc();
      if actual != chunk.declared_crc() {
        return Err(ApngError::CrcMismatch {
          chunk: chunk.ty(),
          declared: chunk.declared_crc(),
          actual,
        });
      }
    }
    if self.iend.is_some() {
      warn!(chunk = %chunk.ty(), "chunk after IEND");
    }
    Ok(match chunk.ty() {
      ChunkTy::IHDR => {
        keep_last(&mut self.ihdr, chunk);
        state
      }
      ChunkTy::acTL => {
        keep_last(&mut self.actl, chunk);
        state
      }
      ChunkTy::IEND => {
        keep_last(&mut self.iend, chunk);
        state
      }
      ChunkTy::fcTL => {
        let control = FrameControl::try_from(chunk.data())?;
        self.check_sequence(control.sequence_number)?;
        self.frames_opened += 1;
        if let Some(limit) = self.options.max_frames {
          if self.frames_opened > limit {
            return Err(ApngError::TooManyFrames { limit });
          }
        }
        if let ScanState::Open(frame) = state {
          self.emit(frame);
        }
        ScanState::Open(Frame::new(control))
      }
      ChunkTy::IDAT => match state {
        ScanState::Open(mut frame) => {
          frame.image_data.push(chunk.data());
          ScanState::Open(frame)
        }
        ScanState::Idle => {
          self.default_image_chunks += 1;
          debug!(len = chunk.data().len(), "dropping default image IDAT");
          ScanState::Idle
        }
      },
      ChunkTy::fdAT => match state {
        ScanState::Open(mut frame) => {
          let (sequence_number, data) = try_pull_pod::<U32BE>(chunk.data())
            .map_err(|_| ApngError::MalformedChunk(ChunkTy::fdAT))?;
          self.check_sequence(sequence_number.get())?;
          frame.image_data.push(data);
          ScanState::Open(frame)
        }
        ScanState::Idle => return Err(ApngError::UnexpectedChunk(ChunkTy::fdAT)),
      },
      _ => {
        self.pass_through.push(chunk);
        state
      }
    })
  }

  fn check_sequence(&mut self, found: u32) -> ApngResult<()> {
    if self.options.sequence_check == SequenceCheck::Strict {
      let expected = self.next_sequence_number;
      if found != expected {
        return Err(ApngError::SequenceMismatch { expected, found });
      }
      self.next_sequence_number = expected.wrapping_add(1);
    }
    Ok(())
  }

  fn emit(&mut self, frame: Frame<'b>) {
    debug!(
      index = self.frames.len(),
      sequence_number = frame.control.sequence_number,
      width = frame.control.width,
      height = frame.control.height,
      pieces = frame.image_data.len(),
      "frame"
    );
    self.frames.push(frame);
  }

  fn finish(self) -> ApngResult<Apng<'b>> {
    let ihdr = self.ihdr.ok_or(ApngError::MissingChunk(ChunkTy::IHDR))?;
    let actl = self.actl.ok_or(ApngError::MissingChunk(ChunkTy::acTL))?;
    let iend = self.iend.ok_or(ApngError::MissingChunk(ChunkTy::IEND))?;
    let header = ImageHeader::try_from(ihdr.data())?;
    let animation = AnimationControl::try_from(actl.data())?;
    if usize::try_from(animation.num_frames).ok() != Some(self.frames.len()) {
      warn!(declared = animation.num_frames, found = self.frames.len(), "acTL frame count mismatch");
    }
    debug!(
      frames = self.frames.len(),
      pass_through = self.pass_through.len(),
      default_image_chunks = self.default_image_chunks,
      "split"
    );
    Ok(Apng { header, animation, frames: self.frames, pass_through: self.pass_through, iend })
  }
}

fn keep_last<'b>(slot: &mut Option<RawChunk<'b>>, chunk: RawChunk<'b>) {
  if slot.is_some() {
    warn!(chunk = %chunk.ty(), "duplicate chunk replaces earlier one");
  }
  *slot = Some(chunk);
}
