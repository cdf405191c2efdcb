//! The full decode: compiled nine-patch PNG in, bordered PNG out.

use std::io::{Read, Write};

use log::debug;

use crate::{
  png::{png_encode_rgba, png_try_bitmap_rgba},
  render_nine_patch, LayoutBounds, NinePatchData, NinePatchError, NinePatchResult,
};

/// Something that turns one stream of bytes into another.
pub trait StreamDecoder {
  /// Reads all of `input` and writes the decoded form to `output`.
  ///
  /// If this returns an error then nothing was written to `output`.
  fn decode<R: Read, W: Write>(&self, input: R, output: W) -> NinePatchResult<()>;
}

/// Restores the marker border of a compiled nine-patch PNG.
///
/// The input must be a PNG with an `npTc` chunk. The output is a PNG one
/// pixel larger on each side, the form a `*.9.png` has before compilation.
/// Empty input gives empty output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NinePatchDecoder;

impl StreamDecoder for NinePatchDecoder {
  fn decode<R: Read, W: Write>(&self, mut input: R, mut output: W) -> NinePatchResult<()> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    if let Some(png) = decode_nine_patch(&data)? {
      output.write_all(&png)?;
    }
    Ok(())
  }
}

/// Decodes compiled nine-patch PNG bytes into bordered PNG bytes.
///
/// Gives `Ok(None)` for empty input.
///
/// ## Failure
/// * [`Decode`](NinePatchError::Decode): the bytes aren't a PNG we can read.
/// * [`ChunkNotFound`](NinePatchError::ChunkNotFound): there's no `npTc`
///   chunk. A missing `npLb` chunk is fine.
/// * [`TruncatedData`](NinePatchError::TruncatedData): a chunk is cut short.
/// * [`Encode`](NinePatchError::Encode) or
///   [`Alloc`](NinePatchError::Alloc): the output couldn't be built.
pub fn decode_nine_patch(data: &[u8]) -> NinePatchResult<Option<Vec<u8>>> {
  if data.is_empty() {
    return Ok(None);
  }
  let source = png_try_bitmap_rgba(data).map_err(NinePatchError::Decode)?;
  let nine_patch = NinePatchData::find_in(data)?;
  let layout_bounds = LayoutBounds::find_in(data)?;
  if layout_bounds.is_none() {
    debug!("no optical bounds, skipping them");
  }
  let bordered = render_nine_patch(&source, &nine_patch, layout_bounds.as_ref())?;
  debug!("rendered {}x{} into {}x{}", source.width, source.height, bordered.width, bordered.height);
  png_encode_rgba(&bordered).map(Some).map_err(NinePatchError::Encode)
}
