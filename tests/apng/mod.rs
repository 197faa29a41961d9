use std::num::NonZeroU32;

use apng_split::{
  png::{
    encode_frame, split, BlendOp, ChunkTy, DisposeOp, NumPlays, RawChunk, RawChunkIter,
    SequenceCheck, SplitOptions, PNG_SIGNATURE,
  },
  ApngError,
};

use super::{init_logging, ApngBuilder};

/// The two frame example: first frame's data in `IDAT`, second in `fdAT`.
fn two_frame_apng() -> Vec<u8> {
  ApngBuilder::new()
    .ihdr(4, 4)
    .actl(2, 1)
    .simple_fctl(0, 4, 4, 1, 2)
    .idat(&[0xAA])
    .simple_fctl(1, 4, 4, 1, 10)
    .fdat(1, &[0xBB])
    .iend()
    .build()
}

fn chunks_of(png: &[u8]) -> Vec<RawChunk<'_>> {
  assert!(png.starts_with(&PNG_SIGNATURE));
  RawChunkIter::new(png).collect::<Result<_, _>>().unwrap()
}

#[test]
fn test_two_frame_split() {
  init_logging();
  let bytes = two_frame_apng();
  let apng = split(&bytes).unwrap();
  let frames = apng.frames();
  assert_eq!(frames.len(), 2);

  assert_eq!(frames[0].image_data, vec![&[0xAA][..]]);
  assert_eq!(frames[0].control.delay_millis(), 500.0);
  assert_eq!(frames[1].image_data, vec![&[0xBB][..]]);
  assert_eq!(frames[1].control.delay_millis(), 100.0);

  let descriptor = apng.descriptor();
  assert_eq!((descriptor.width, descriptor.height), (4, 4));
  assert_eq!(descriptor.num_plays, NumPlays::Count(NonZeroU32::new(1).unwrap()));
  assert_eq!(apng.animation_control().num_frames, 2);
}

#[test]
fn test_num_plays() {
  for (raw, expected) in [
    (0, NumPlays::Infinite),
    (1, NumPlays::Count(NonZeroU32::new(1).unwrap())),
    (7, NumPlays::Count(NonZeroU32::new(7).unwrap())),
    (u32::MAX, NumPlays::Count(NonZeroU32::new(u32::MAX).unwrap())),
  ] {
    let bytes = ApngBuilder::new().ihdr(1, 1).actl(0, raw).iend().build();
    let apng = split(&bytes).unwrap();
    assert_eq!(apng.descriptor().num_plays, expected, "failed raw: {raw}");
    assert!(apng.frames().is_empty());
  }
  assert_eq!(NumPlays::Infinite.to_string(), "infinite");
  assert_eq!(NumPlays::from_raw(3).to_string(), "3 times");
}

#[test]
fn test_missing_and_unexpected_chunks() {
  let no_actl = ApngBuilder::new().ihdr(1, 1).simple_fctl(0, 1, 1, 1, 1).idat(&[1]).iend().build();
  assert_eq!(split(&no_actl).unwrap_err(), ApngError::MissingChunk(ChunkTy::acTL));

  let no_ihdr = ApngBuilder::new().actl(0, 0).iend().build();
  assert_eq!(split(&no_ihdr).unwrap_err(), ApngError::MissingChunk(ChunkTy::IHDR));

  let no_iend = ApngBuilder::new().ihdr(1, 1).actl(0, 0).build();
  assert_eq!(split(&no_iend).unwrap_err(), ApngError::MissingChunk(ChunkTy::IEND));

  let early_fdat = ApngBuilder::new().ihdr(1, 1).actl(1, 0).fdat(0, &[1]).iend().build();
  assert_eq!(split(&early_fdat).unwrap_err(), ApngError::UnexpectedChunk(ChunkTy::fdAT));

  let mut bad_signature = two_frame_apng();
  bad_signature[3] = b'p';
  assert_eq!(split(&bad_signature).unwrap_err(), ApngError::InvalidSignature);
  assert_eq!(split(&PNG_SIGNATURE[..5]).unwrap_err(), ApngError::InvalidSignature);
}

#[test]
fn test_truncated_and_malformed() {
  let bytes = two_frame_apng();
  assert_eq!(split(&bytes[..bytes.len() - 1]).unwrap_err(), ApngError::TruncatedStream);
  // cut inside the fdAT CRC
  assert_eq!(split(&bytes[..bytes.len() - 14]).unwrap_err(), ApngError::TruncatedStream);

  let short_fctl = ApngBuilder::new().ihdr(1, 1).actl(1, 0).chunk(b"fcTL", &[0; 25]).iend().build();
  assert_eq!(split(&short_fctl).unwrap_err(), ApngError::MalformedChunk(ChunkTy::fcTL));

  let short_fdat = ApngBuilder::new()
    .ihdr(1, 1)
    .actl(1, 0)
    .simple_fctl(0, 1, 1, 1, 1)
    .chunk(b"fdAT", &[0, 0, 1])
    .iend()
    .build();
  assert_eq!(split(&short_fdat).unwrap_err(), ApngError::MalformedChunk(ChunkTy::fdAT));

  let short_ihdr = ApngBuilder::new().chunk(b"IHDR", &[0; 8]).actl(0, 0).iend().build();
  assert_eq!(split(&short_ihdr).unwrap_err(), ApngError::MalformedChunk(ChunkTy::IHDR));
}

#[test]
fn test_default_image_idat_is_dropped() {
  let bytes = ApngBuilder::new()
    .ihdr(8, 8)
    .actl(1, 0)
    .idat(&[0x01, 0x02])
    .idat(&[0x03])
    .simple_fctl(0, 2, 2, 1, 1)
    .fdat(1, &[0xCC, 0xDD])
    .iend()
    .build();
  let apng = split(&bytes).unwrap();
  assert_eq!(apng.frames().len(), 1);
  assert_eq!(apng.frames()[0].image_data, vec![&[0xCC, 0xDD][..]]);
  assert!(apng.pass_through().is_empty());
}

#[test]
fn test_frame_order_is_datastream_order() {
  // sequence numbers out of order don't reorder anything when permissive
  let bytes = ApngBuilder::new()
    .ihdr(2, 2)
    .actl(2, 0)
    .simple_fctl(5, 2, 2, 1, 1)
    .fdat(9, &[1])
    .simple_fctl(3, 2, 2, 1, 1)
    .fdat(4, &[2])
    .iend()
    .build();
  let apng = split(&bytes).unwrap();
  let seqs: Vec<u32> = apng.frames().iter().map(|f| f.control.sequence_number).collect();
  assert_eq!(seqs, [5, 3]);
  assert_eq!(apng.frames()[1].image_data, vec![&[2][..]]);
}

#[test]
fn test_strict_sequence_check() {
  let strict = SplitOptions::new().sequence_check(SequenceCheck::Strict);
  let good = ApngBuilder::new()
    .ihdr(2, 2)
    .actl(2, 0)
    .simple_fctl(0, 2, 2, 1, 1)
    .idat(&[1])
    .simple_fctl(1, 2, 2, 1, 1)
    .fdat(2, &[2])
    .fdat(3, &[3])
    .iend()
    .build();
  assert_eq!(strict.split(&good).unwrap().frames().len(), 2);

  // the two frame example reuses sequence number 1 for its fdAT
  let bytes = two_frame_apng();
  assert!(split(&bytes).is_ok());
  assert_eq!(strict.split(&bytes).unwrap_err(), ApngError::SequenceMismatch { expected: 2, found: 1 });
}

#[test]
fn test_crc_verification() {
  let mut bytes = two_frame_apng();
  // damage the IEND CRC
  let last = bytes.len() - 1;
  bytes[last] ^= 0x01;
  assert!(split(&bytes).is_ok());
  let err = SplitOptions::new().verify_crc(true).split(&bytes).unwrap_err();
  assert!(matches!(err, ApngError::CrcMismatch { chunk: ChunkTy::IEND, actual: 0xAE42_6082, .. }));
  assert!(SplitOptions::new().verify_crc(true).split(&two_frame_apng()).is_ok());
}

#[test]
fn test_max_frames() {
  let bytes = two_frame_apng();
  assert!(SplitOptions::new().max_frames(2).split(&bytes).is_ok());
  assert_eq!(
    SplitOptions::new().max_frames(1).split(&bytes).unwrap_err(),
    ApngError::TooManyFrames { limit: 1 }
  );
}

#[test]
fn test_encoded_frame_layout() {
  let bytes = ApngBuilder::new()
    .ihdr(16, 16)
    .chunk(b"sRGB", &[0])
    .actl(2, 0)
    .chunk(b"tEXt", b"Title\0Ball")
    .fctl(0, 16, 16, 0, 0, 1, 25, 0, 0)
    .idat(&[0x10, 0x11])
    .idat(&[0x12])
    .fctl(1, 8, 4, 3, 5, 1, 25, 1, 1)
    .fdat(2, &[0x20])
    .fdat(3, &[0x21, 0x22])
    .chunk(b"zzZz", &[9, 9])
    .iend()
    .build();
  let apng = split(&bytes).unwrap();
  let source_chunks = chunks_of(&bytes);
  let pass_through: Vec<&[u8]> =
    apng.pass_through().iter().map(|c| c.as_bytes()).collect();
  assert_eq!(pass_through, [source_chunks[1].as_bytes(), source_chunks[3].as_bytes(), source_chunks[10].as_bytes()]);

  let second = &apng.frames()[1];
  assert_eq!((second.control.x_offset, second.control.y_offset), (3, 5));
  assert_eq!(second.control.dispose(), Some(DisposeOp::Background));
  assert_eq!(second.control.blend(), Some(BlendOp::Over));

  let png = apng.encode_frame(1).unwrap();
  let chunks = chunks_of(&png);
  let tys: Vec<ChunkTy> = chunks.iter().map(|c| c.ty()).collect();
  assert_eq!(
    tys,
    [
      ChunkTy::IHDR,
      ChunkTy(*b"sRGB"),
      ChunkTy(*b"tEXt"),
      ChunkTy(*b"zzZz"),
      ChunkTy::IDAT,
      ChunkTy::IDAT,
      ChunkTy::IEND
    ]
  );
  // new IHDR has the frame size and the source's other fields
  assert_eq!(chunks[0].data(), &[0, 0, 0, 8, 0, 0, 0, 4, 8, 6, 0, 0, 0]);
  // pass-through chunks are byte for byte
  for (out, src) in chunks[1..4].iter().zip(apng.pass_through()) {
    assert_eq!(out.as_bytes(), src.as_bytes());
  }
  // one IDAT per piece, in order, without the fdAT sequence numbers
  assert_eq!(chunks[4].data(), &[0x20]);
  assert_eq!(chunks[5].data(), &[0x21, 0x22]);
  // the file ends with the original IEND
  assert!(png.ends_with(apng.iend().as_bytes()));
  assert_eq!(chunks[6].as_bytes(), source_chunks[source_chunks.len() - 1].as_bytes());
  // every chunk the encoder wrote carries a correct CRC
  assert!(chunks.iter().all(|c| c.crc_is_valid()));

  // the animation's own header is never changed by encoding
  assert_eq!((apng.header().width(), apng.header().height()), (16, 16));
  let first_png = apng.encode_frame(0).unwrap();
  assert_eq!(chunks_of(&first_png)[0].data(), &[0, 0, 0, 16, 0, 0, 0, 16, 8, 6, 0, 0, 0]);
}

#[test]
fn test_encoding_is_repeatable() {
  let bytes = two_frame_apng();
  let apng = split(&bytes).unwrap();
  for i in 0..apng.frames().len() {
    let a = apng.encode_frame(i).unwrap();
    let b = apng.encode_frame(i).unwrap();
    assert_eq!(a, b);
    let c = encode_frame(apng.header(), &apng.frames()[i], apng.pass_through(), apng.iend()).unwrap();
    assert_eq!(a, c);
  }
  let owned = apng.encoded_frames().unwrap();
  let streamed: Vec<Vec<u8>> = apng.encode_frames().collect::<Result<_, _>>().unwrap();
  assert_eq!(owned.len(), 2);
  for ((o, s), f) in owned.iter().zip(streamed.iter()).zip(apng.frames()) {
    assert_eq!(&o.png, s);
    assert_eq!(o.control, f.control);
  }
  assert_eq!(
    apng.encode_frame(2).unwrap_err(),
    ApngError::FrameOutOfBounds { index: 2, total: 2 }
  );
}

#[cfg(feature = "rayon")]
#[test]
fn test_parallel_encoding_matches() {
  let bytes = two_frame_apng();
  let apng = split(&bytes).unwrap();
  assert_eq!(apng.encode_frames_par().unwrap(), apng.encoded_frames().unwrap());
}

#[test]
fn test_zlib_stream_survives_regrouping() {
  // a real zlib stream split across one IDAT and two fdAT pieces must come
  // back out as the same stream
  let pixels: Vec<u8> = (0..4_u8)
    .flat_map(|y| core::iter::once(0).chain((0..16_u8).map(move |x| x.wrapping_mul(y))))
    .collect();
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&pixels, 6);
  assert!(zlib.len() >= 3);
  let (a, rest) = zlib.split_at(zlib.len() / 3);
  let (b, c) = rest.split_at(rest.len() / 2);

  let bytes = ApngBuilder::new()
    .ihdr(4, 4)
    .actl(2, 0)
    .simple_fctl(0, 4, 4, 1, 1)
    .idat(&zlib)
    .simple_fctl(1, 4, 4, 1, 1)
    .fdat(2, a)
    .fdat(3, b)
    .fdat(4, c)
    .iend()
    .build();
  let apng = split(&bytes).unwrap();
  for png in apng.encode_frames() {
    let png = png.unwrap();
    let stream: Vec<u8> = chunks_of(&png)
      .iter()
      .filter(|c| c.ty() == ChunkTy::IDAT)
      .flat_map(|c| c.data().iter().copied())
      .collect();
    assert_eq!(stream, zlib);
    assert_eq!(miniz_oxide::inflate::decompress_to_vec_zlib(&stream).unwrap(), pixels);
  }
}

#[test]
fn test_duplicate_singletons_keep_last() {
  let bytes = ApngBuilder::new()
    .ihdr(3, 3)
    .ihdr(9, 9)
    .actl(1, 0)
    .actl(1, 5)
    .simple_fctl(0, 3, 3, 1, 1)
    .idat(&[1])
    .iend()
    .iend()
    .build();
  let apng = split(&bytes).unwrap();
  assert_eq!((apng.descriptor().width, apng.descriptor().height), (9, 9));
  assert_eq!(apng.descriptor().num_plays, NumPlays::Count(NonZeroU32::new(5).unwrap()));
  assert_eq!(apng.frames().len(), 1);
  assert!(apng.pass_through().is_empty());
  // the second IEND, at the very end of the input
  let last_iend = &bytes[bytes.len() - 12..];
  assert!(core::ptr::eq(apng.iend().as_bytes(), last_iend));
}
