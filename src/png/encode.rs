use log::trace;

use super::{png_crc, PngColorType, PngError, IHDR, PNG_SIGNATURE};
use crate::{Bitmap, ChunkTag};

/// Zlib level for image data, miniz's default.
const COMPRESSION_LEVEL: u8 = 6;

/// Appends a full chunk (length, tag, data, CRC) to the output.
///
/// ## Failure
/// * `data` is longer than `u32::MAX` bytes, which a chunk can't express.
pub fn png_write_chunk(out: &mut Vec<u8>, tag: ChunkTag, data: &[u8]) -> Result<(), PngError> {
  let len = u32::try_from(data.len()).map_err(|_| PngError::ChunkTooLong)?;
  out.extend_from_slice(&len.to_be_bytes());
  out.extend_from_slice(&tag.0);
  out.extend_from_slice(data);
  out.extend_from_slice(&png_crc(tag.0.iter().chain(data).copied()).to_be_bytes());
  Ok(())
}

/// Encodes an RGBA8 bitmap as PNG bytes.
///
/// The output is 8-bit RGBA, not interlaced, with every line using filter
/// type 0 and the image data in a single `IDAT`.
///
/// ## Failure
/// * The bitmap is zero sized, or its pixel count doesn't match.
/// * Allocation failure.
pub fn png_encode_rgba(bitmap: &Bitmap) -> Result<Vec<u8>, PngError> {
  if bitmap.width == 0 || bitmap.height == 0 {
    return Err(PngError::WidthOrHeightZero);
  }
  let pixel_count =
    (bitmap.width as usize).checked_mul(bitmap.height as usize).ok_or(PngError::Alloc)?;
  if bitmap.pixels.len() != pixel_count {
    return Err(PngError::PixelCount);
  }
  let ihdr = IHDR {
    width: bitmap.width,
    height: bitmap.height,
    bit_depth: 8,
    color_type: PngColorType::RGBA,
    is_interlaced: false,
  };

  let mut filtered: Vec<u8> = Vec::new();
  filtered
    .try_reserve_exact(ihdr.get_zlib_decompression_requirement())
    .map_err(|_| PngError::Alloc)?;
  for row in bitmap.rows() {
    filtered.push(0);
    for p in row {
      filtered.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
  }
  let idat = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, COMPRESSION_LEVEL);
  trace!("compressed {} bytes of image data to {}", filtered.len(), idat.len());

  let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + 13 + idat.len());
  out.extend_from_slice(&PNG_SIGNATURE);
  png_write_chunk(&mut out, ChunkTag::IHDR, &ihdr.to_bytes())?;
  png_write_chunk(&mut out, ChunkTag::IDAT, &idat)?;
  png_write_chunk(&mut out, ChunkTag::IEND, &[])?;
  Ok(out)
}
