use crate::{NinePatchError, NinePatchResult};

/// A big-endian cursor over a byte slice.
///
/// Reads either fully succeed and advance the cursor, or fail with
/// [`NinePatchError::TruncatedData`] and leave the cursor where it was.
/// Skipping never fails, it just leaves the cursor past the end so that the
/// next read fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteReader<'b> {
  bytes: &'b [u8],
  pos: usize,
}
impl<'b> ByteReader<'b> {
  /// Makes a reader at the start of the bytes.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, pos: 0 }
  }

  /// Byte offset of the cursor from the start of the data.
  ///
  /// After an over-long skip this can exceed the data length.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.pos
  }

  /// All bytes after the cursor.
  #[inline]
  #[must_use]
  pub fn remaining(&self) -> &'b [u8] {
    self.bytes.get(self.pos..).unwrap_or(&[])
  }

  /// Moves the cursor forward `n` bytes.
  #[inline]
  pub fn skip(&mut self, n: usize) {
    self.pos = self.pos.saturating_add(n);
  }

  #[inline]
  fn try_pull_byte_array<const N: usize>(&mut self) -> NinePatchResult<[u8; N]> {
    let a: [u8; N] = *self.remaining().first_chunk::<N>().ok_or(NinePatchError::TruncatedData)?;
    self.pos += N;
    Ok(a)
  }

  /// Reads one byte.
  #[inline]
  pub fn read_u8(&mut self) -> NinePatchResult<u8> {
    let [u] = self.try_pull_byte_array::<1>()?;
    Ok(u)
  }

  /// Reads a big-endian `u32`.
  #[inline]
  pub fn read_u32_be(&mut self) -> NinePatchResult<u32> {
    self.try_pull_byte_array::<4>().map(u32::from_be_bytes)
  }

  /// Reads `count` big-endian `u32` values.
  ///
  /// The length is checked against the remaining bytes before anything is
  /// allocated, so a bogus count can't trigger a huge allocation.
  pub fn read_u32_be_array(&mut self, count: usize) -> NinePatchResult<Vec<u32>> {
    let byte_len = count.checked_mul(4).ok_or(NinePatchError::TruncatedData)?;
    let data = self.remaining().get(..byte_len).ok_or(NinePatchError::TruncatedData)?;
    let out = data.chunks_exact(4).map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]])).collect();
    self.pos += byte_len;
    Ok(out)
  }
}
