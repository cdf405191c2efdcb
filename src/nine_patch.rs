//! The compiled nine-patch chunk, `npTc`.
//!
//! The chunk data is the serialized form of the framework's nine-patch
//! header, always big-endian:
//!
//! ```text
//! offset  size  field
//!      0     1  was deserialized (ignored)
//!      1     1  number of x divs
//!      2     1  number of y divs
//!      3     1  number of colors
//!      4     8  x divs offset, y divs offset (ignored)
//!     12    16  padding left, right, top, bottom
//!     28     4  colors offset (ignored)
//!     32  4*nx  x divs
//!      …  4*ny  y divs
//!      …  4*nc  colors (not read)
//! ```
//!
//! The "offset" fields are pointers from when the struct was live in memory,
//! they mean nothing once serialized.

use crate::{find_chunk, ByteReader, ChunkTag, NinePatchResult};

/// Stretch regions and content padding of a nine-patch image.
///
/// All values are in pixels of the source image (the image without its
/// border). Divs come in `[start, end)` pairs, one pair per stretchable
/// segment, with segments laid one after the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NinePatchData {
  /// Content padding from the left edge.
  pub padding_left: u32,
  /// Content padding from the right edge.
  pub padding_right: u32,
  /// Content padding from the top edge.
  pub padding_top: u32,
  /// Content padding from the bottom edge.
  pub padding_bottom: u32,
  /// Horizontal stretch regions, as `[start, end)` pairs.
  pub x_divs: Vec<u32>,
  /// Vertical stretch regions, as `[start, end)` pairs.
  pub y_divs: Vec<u32>,
  /// Count of region colors that follow the divs in the chunk.
  pub num_colors: u8,
}
impl NinePatchData {
  /// Tag of the chunk holding this data.
  pub const TAG: ChunkTag = ChunkTag::npTc;

  /// Parses the data from a reader positioned at the start of an `npTc`
  /// chunk's data.
  pub fn read(reader: &mut ByteReader<'_>) -> NinePatchResult<Self> {
    reader.skip(1);
    let num_x_divs = reader.read_u8()?;
    let num_y_divs = reader.read_u8()?;
    let num_colors = reader.read_u8()?;
    reader.skip(8);
    let padding_left = reader.read_u32_be()?;
    let padding_right = reader.read_u32_be()?;
    let padding_top = reader.read_u32_be()?;
    let padding_bottom = reader.read_u32_be()?;
    reader.skip(4);
    let x_divs = reader.read_u32_be_array(num_x_divs.into())?;
    let y_divs = reader.read_u32_be_array(num_y_divs.into())?;
    Ok(Self {
      padding_left,
      padding_right,
      padding_top,
      padding_bottom,
      x_divs,
      y_divs,
      num_colors,
    })
  }

  /// Finds and parses the `npTc` chunk within full PNG bytes.
  pub fn find_in(png: &[u8]) -> NinePatchResult<Self> {
    Self::read(&mut find_chunk(png, Self::TAG)?)
  }

  /// Horizontal stretch regions as `(start, end)` pairs.
  ///
  /// An unpaired trailing div is ignored.
  #[inline]
  pub fn x_regions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
    self.x_divs.chunks_exact(2).map(|pair| (pair[0], pair[1]))
  }

  /// Vertical stretch regions as `(start, end)` pairs.
  ///
  /// An unpaired trailing div is ignored.
  #[inline]
  pub fn y_regions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
    self.y_divs.chunks_exact(2).map(|pair| (pair[0], pair[1]))
  }
}
