#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![forbid(unsafe_code)]

//! Splits an Animated PNG (APNG) into standalone PNG frames.
//!
//! An APNG is a normal PNG with three extra chunk types mixed in: `acTL`
//! (animation control), `fcTL` (frame control) and `fdAT` (frame data). A
//! plain PNG decoder ignores those and shows the default image. This crate
//! walks the chunks, groups the image data that belongs to each `fcTL`, and
//! then writes each group back out as its own complete PNG datastream, along
//! with the timing and placement info a player needs.
//!
//! Pixels are never touched. The compressed image data is moved from chunk to
//! chunk as-is, so any PNG decoder can be used on the output.
//!
//! ```no_run
//! use apng_split::png::split;
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let apng = split(bytes)?;
//! println!("{:?}", apng.descriptor());
//! for (frame, png) in apng.frames().iter().zip(apng.encode_frames()) {
//!   let png: Vec<u8> = png?;
//!   println!("{}ms: {} bytes", frame.control.delay_millis(), png.len());
//! }
//! # Ok::<(), apng_split::ApngError>(())
//! ```
//!
//! ## Crate Features
//! * `alloc` (default): the splitter and re-encoder. Without it you still get
//!   the CRC, the raw chunk iterator, and the fixed-layout chunk parsers.
//! * `rayon`: [`Apng::encode_frames_par`](png::Apng::encode_frames_par).

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

mod int_endian;
pub use int_endian::*;

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod png;
