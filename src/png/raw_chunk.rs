use super::png_crc;
use crate::ChunkTag;

/// A chunk of PNG bytes, without any interpretation of the data.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PngRawChunk<'b> {
  tag: ChunkTag,
  data: &'b [u8],
  declared_crc: u32,
}
impl<'b> PngRawChunk<'b> {
  /// The chunk's four byte type tag.
  #[inline]
  #[must_use]
  pub const fn tag(&self) -> ChunkTag {
    self.tag
  }
  /// The chunk's data bytes.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC stored after the data.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// Computes what the CRC should be for this tag and data.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.tag.0.iter().chain(self.data).copied())
  }
}
impl core::fmt::Debug for PngRawChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("tag", &self.tag)
      .field("data_len", &self.data.len())
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// Iterates the raw chunks of PNG bytes.
///
/// Iteration stops at the first chunk that doesn't fit in the bytes left.
#[derive(Debug, Clone)]
pub struct PngRawChunkIter<'b>(&'b [u8]);
impl<'b> PngRawChunkIter<'b> {
  /// Starts iterating the chunks of full PNG bytes.
  ///
  /// The first 8 bytes are assumed to be the signature, and skipped without
  /// being checked.
  #[inline]
  pub fn new(png: &'b [u8]) -> Self {
    Self(png.get(8..).unwrap_or(&[]))
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;

  fn next(&mut self) -> Option<Self::Item> {
    let (len, rest) = self.0.split_first_chunk::<4>()?;
    let len = u32::from_be_bytes(*len) as usize;
    let (tag, rest) = rest.split_first_chunk::<4>()?;
    let data = rest.get(..len)?;
    let (crc, rest) = rest.get(len..)?.split_first_chunk::<4>()?;
    self.0 = rest;
    Some(PngRawChunk { tag: ChunkTag(*tag), data, declared_crc: u32::from_be_bytes(*crc) })
  }
}
