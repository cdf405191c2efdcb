use core::fmt::{Debug, Write};

use log::{debug, trace};

use crate::{ByteReader, NinePatchError, NinePatchResult};

/// Bytes before the first chunk header (the PNG signature).
const CHUNK_LIST_OFFSET: usize = 8;

/// The 4-byte type tag of a PNG chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTag(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTag {
  /// Compiled nine-patch data, `0x6e705463`.
  pub const npTc: Self = Self(*b"npTc");
  /// Optical layout bounds, `0x6e704c62`.
  pub const npLb: Self = Self(*b"npLb");

  /// The tag as a big-endian integer.
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes(self.0)
  }
}
impl From<u32> for ChunkTag {
  #[inline]
  #[must_use]
  fn from(value: u32) -> Self {
    Self(value.to_be_bytes())
  }
}
impl Debug for ChunkTag {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for b in self.0 {
      if b.is_ascii_graphic() {
        f.write_char(b as char)?;
      } else {
        write!(f, "\\x{b:02x}")?;
      }
    }
    Ok(())
  }
}

fn next_chunk_header(reader: &mut ByteReader<'_>) -> NinePatchResult<(u32, ChunkTag)> {
  let length = reader.read_u32_be()?;
  let tag = ChunkTag::from(reader.read_u32_be()?);
  Ok((length, tag))
}

/// Finds the first chunk with the given tag in PNG bytes.
///
/// The first 8 bytes are skipped without being checked, then each chunk is
/// `[length][tag][data][crc]`. On success the reader is positioned at the
/// start of the chunk's data. The reader is *not* limited to the chunk, reads
/// can continue on past the chunk's declared length.
///
/// Neither the declared lengths nor the CRC values are validated. A chunk
/// that lies about its length will throw off the rest of the scan, which
/// generally ends with the chunk not being found.
///
/// ## Failure
/// * [`NinePatchError::ChunkNotFound`] if the data runs out before a match.
pub fn find_chunk(bytes: &[u8], tag: ChunkTag) -> NinePatchResult<ByteReader<'_>> {
  let mut reader = ByteReader::new(bytes);
  reader.skip(CHUNK_LIST_OFFSET);
  loop {
    let (length, found) =
      next_chunk_header(&mut reader).map_err(|_| NinePatchError::ChunkNotFound(tag))?;
    if found == tag {
      debug!("found {tag:?} chunk at offset {}, {length} bytes", reader.position());
      return Ok(reader);
    }
    trace!("skipping {found:?} chunk, {length} bytes");
    // data plus the trailing crc
    reader.skip((length as usize).saturating_add(4));
  }
}
