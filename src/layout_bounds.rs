//! Optical layout bounds, the `npLb` chunk.
//!
//! Added in Android 4.3, these are insets from each edge marking where the
//! visible content actually is, so that layouts can align on the visual edge
//! rather than the pixel edge (eg: ignoring a drop shadow).

use crate::{find_chunk, ByteReader, ChunkTag, NinePatchError, NinePatchResult};

/// Optical insets from each edge of the image, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LayoutBounds {
  /// Inset from the left edge.
  pub left: u32,
  /// Inset from the top edge.
  pub top: u32,
  /// Inset from the right edge.
  pub right: u32,
  /// Inset from the bottom edge.
  pub bottom: u32,
}
impl LayoutBounds {
  /// Tag of the chunk holding this data.
  pub const TAG: ChunkTag = ChunkTag::npLb;

  /// Parses the bounds from a reader positioned at the start of an `npLb`
  /// chunk's data.
  pub fn read(reader: &mut ByteReader<'_>) -> NinePatchResult<Self> {
    let left = reader.read_u32_be()?;
    let top = reader.read_u32_be()?;
    let right = reader.read_u32_be()?;
    let bottom = reader.read_u32_be()?;
    Ok(Self { left, top, right, bottom })
  }

  /// Finds and parses the `npLb` chunk within full PNG bytes.
  ///
  /// Most images don't have one, so a missing chunk gives `Ok(None)`. A chunk
  /// that's present but too short is still an error.
  pub fn find_in(png: &[u8]) -> NinePatchResult<Option<Self>> {
    match find_chunk(png, Self::TAG) {
      Ok(mut reader) => Self::read(&mut reader).map(Some),
      Err(NinePatchError::ChunkNotFound(_)) => Ok(None),
      Err(e) => Err(e),
    }
  }
}
