use bytemuck::{pod_read_unaligned, Pod};

use crate::{ApngError, ApngResult};
use core::mem::size_of;

#[inline]
pub(crate) fn try_split_at(bytes: &[u8], n: usize) -> ApngResult<(&[u8], &[u8])> {
  if bytes.len() >= n {
    Ok(bytes.split_at(n))
  } else {
    Err(ApngError::TruncatedStream)
  }
}

#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(bytes: &[u8]) -> ApngResult<([u8; N], &[u8])> {
  let (head, tail) = try_split_at(bytes, N)?;
  let mut a = [0_u8; N];
  a.copy_from_slice(head);
  Ok((a, tail))
}

/// Reads a fixed-layout value off the front of the bytes.
#[inline]
pub(crate) fn try_pull_pod<T: Pod>(bytes: &[u8]) -> ApngResult<(T, &[u8])> {
  let (head, tail) = try_split_at(bytes, size_of::<T>())?;
  Ok((pod_read_unaligned(head), tail))
}
