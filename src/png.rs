#![forbid(unsafe_code)]

//! Module for working with PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! This is only as much PNG as the nine-patch decoder needs:
//!
//! * [`png_try_bitmap_rgba`] decodes any valid PNG (all color types, all bit
//!   depths, interlaced or not) into RGBA8 pixels.
//! * [`png_encode_rgba`] writes RGBA8 pixels as a plain non-interlaced PNG.
//! * [`PngRawChunkIter`] walks the chunks of PNG bytes.
//!
//! ## Parsing Errors
//!
//! Quoting [section 13.2 of the PNG
//! spec](https://www.w3.org/TR/2003/REC-PNG-20031110/#13Decoders.Errors):
//!
//! > Errors that have little or no effect on the processing of the image may be
//! > ignored, while those that affect critical data shall be dealt with in a
//! > manner appropriate to the application.
//!
//! The decoder ignores the signature bytes, chunk ordering, duplicate chunks,
//! and both checksum systems (chunk CRC and zlib Adler-32). A zlib stream that
//! ends early just leaves the rest of the image as zeroes, and data past what
//! the header calls for is ignored. An image without a header, with a broken
//! zlib stream, or with far too little image data to fill the header's size
//! is an error.

use bitfrob::u8_replicate_bits;
use log::{debug, warn};
use miniz_oxide::inflate::TINFLStatus;
use pixel_formats::r8g8b8a8_Srgb;

use crate::{Bitmap, ChunkTag};

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod unfilter;

mod encode;
pub use encode::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Largest width or height the decoder will accept.
///
/// This is to prevent accidental out-of-memory problems.
pub const MAX_DIMENSION: u32 = 16_384;

/// Deflate can't expand data by more than about 1032 to 1.
const MAX_DEFLATE_RATIO: usize = 1032;

/// An error from PNG decoding or encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum PngError {
  /// There's no valid `IHDR` chunk.
  #[error("no image header")]
  NoImageHeader,

  /// The declared width and/or height of this image is 0.
  #[error("image width or height is 0")]
  WidthOrHeightZero,

  /// The image is larger than [`MAX_DIMENSION`] on a side.
  #[error("{0}x{1} is larger than the decoder allows")]
  DimensionsTooLarge(u32, u32),

  /// The allocator couldn't give us enough space.
  #[error("not enough memory")]
  Alloc,

  /// The image data isn't a zlib stream that can be inflated.
  #[error("image data could not be decompressed")]
  Decompression,

  /// There's less decompressed data than the header calls for.
  #[error("image data is shorter than the header requires")]
  Unfilter,

  /// A bitmap's pixel count doesn't match its dimensions.
  #[error("pixel count doesn't match the image dimensions")]
  PixelCount,

  /// Chunk data over `u32::MAX` bytes.
  #[error("chunk data is too long")]
  ChunkTooLong,
}

#[allow(nonstandard_style)]
impl ChunkTag {
  /// Image Header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Palette
  pub const PLTE: Self = Self(*b"PLTE");
  /// Image Data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image End
  pub const IEND: Self = Self(*b"IEND");
  /// Transparency
  pub const tRNS: Self = Self(*b"tRNS");
}

/// Checks if the PNG's initial 8 bytes are correct.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Gets the [IHDR] out of the PNG bytes.
pub fn png_get_header(bytes: &[u8]) -> Option<IHDR> {
  PngRawChunkIter::new(bytes)
    .filter(|raw_chunk| raw_chunk.tag() == ChunkTag::IHDR)
    .find_map(|raw_chunk| IHDR::try_from(raw_chunk.data()).ok())
}

/// Gets the palette out of the PNG bytes.
///
/// Each `[u8;3]` in the palette is an `[r8, g8, b8]` color entry.
pub fn png_get_palette(bytes: &[u8]) -> Option<&[[u8; 3]]> {
  PngRawChunkIter::new(bytes)
    .filter(|raw_chunk| raw_chunk.tag() == ChunkTag::PLTE)
    .find_map(|raw_chunk| bytemuck::try_cast_slice::<u8, [u8; 3]>(raw_chunk.data()).ok())
}

/// Gets the transparency chunk for the PNG bytes, if any.
pub fn png_get_transparency(bytes: &[u8]) -> Option<tRNS<'_>> {
  PngRawChunkIter::new(bytes)
    .find(|raw_chunk| raw_chunk.tag() == ChunkTag::tRNS)
    .map(|raw_chunk| tRNS(raw_chunk.data()))
}

/// Gets an iterator over all the `IDAT` slices in the PNG bytes.
pub fn png_get_idat(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
  PngRawChunkIter::new(bytes)
    .filter(|raw_chunk| raw_chunk.tag() == ChunkTag::IDAT)
    .map(|raw_chunk| raw_chunk.data())
}

/// Transparency data.
///
/// What the bytes mean depends on the image's color type, so there's a method
/// for each interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct tRNS<'b>(&'b [u8]);
impl<'b> tRNS<'b> {
  /// Gets the grayscale value that is transparent.
  #[inline]
  pub const fn try_to_grayscale(&self) -> Option<u16> {
    match self.0 {
      [y0, y1] => Some(u16::from_be_bytes([*y0, *y1])),
      _ => None,
    }
  }
  /// Gets the RGB value that is transparent.
  #[inline]
  pub const fn try_to_rgb(&self) -> Option<[u16; 3]> {
    match self.0 {
      [r0, r1, g0, g1, b0, b1] => Some([
        u16::from_be_bytes([*r0, *r1]),
        u16::from_be_bytes([*g0, *g1]),
        u16::from_be_bytes([*b0, *b1]),
      ]),
      _ => None,
    }
  }
  /// Gets the alpha values for each palette index.
  #[inline]
  pub const fn to_alphas(&self) -> &'b [u8] {
    self.0
  }
}

/// Converts one pixel as given by the unfilter pass into RGBA8.
fn pixel_to_rgba8(
  ihdr: &IHDR, palette: &[[u8; 3]], trns: Option<tRNS<'_>>, data: &[u8],
) -> r8g8b8a8_Srgb {
  let wide = ihdr.bit_depth == 16;
  // 16-bit channels just keep their high byte
  let channel = |i: usize| if wide { data[i * 2] } else { data[i] };
  let full = |i: usize| {
    if wide {
      u16::from_be_bytes([data[i * 2], data[i * 2 + 1]])
    } else {
      u16::from(data[i])
    }
  };
  match ihdr.color_type {
    PngColorType::Y => {
      let y = match ihdr.bit_depth {
        1 | 2 | 4 => u8_replicate_bits(u32::from(ihdr.bit_depth), data[0]),
        _ => channel(0),
      };
      let a = if trns.and_then(|t| t.try_to_grayscale()) == Some(full(0)) { 0 } else { 0xFF };
      r8g8b8a8_Srgb { r: y, g: y, b: y, a }
    }
    PngColorType::RGB => {
      let key = Some([full(0), full(1), full(2)]);
      let a = if trns.and_then(|t| t.try_to_rgb()) == key { 0 } else { 0xFF };
      r8g8b8a8_Srgb { r: channel(0), g: channel(1), b: channel(2), a }
    }
    PngColorType::Index => {
      let i = usize::from(data[0]);
      let [r, g, b] = palette.get(i).copied().unwrap_or_default();
      let a = trns.and_then(|t| t.to_alphas().get(i).copied()).unwrap_or(0xFF);
      r8g8b8a8_Srgb { r, g, b, a }
    }
    PngColorType::YA => {
      let y = channel(0);
      r8g8b8a8_Srgb { r: y, g: y, b: y, a: channel(1) }
    }
    PngColorType::RGBA => {
      r8g8b8a8_Srgb { r: channel(0), g: channel(1), b: channel(2), a: channel(3) }
    }
  }
}

/// Decodes PNG bytes into an RGBA8 bitmap.
///
/// ## Failure
/// * No [IHDR] in the bytes, or the header is zero or too large on a side.
/// * Allocation failure.
/// * The `IDAT` data isn't zlib, or is too small to ever inflate to the size
///   the header calls for. This is checked before any buffer is allocated.
pub fn png_try_bitmap_rgba(bytes: &[u8]) -> Result<Bitmap, PngError> {
  let ihdr = png_get_header(bytes).ok_or(PngError::NoImageHeader)?;
  if ihdr.width == 0 || ihdr.height == 0 {
    return Err(PngError::WidthOrHeightZero);
  }
  if ihdr.width > MAX_DIMENSION || ihdr.height > MAX_DIMENSION {
    return Err(PngError::DimensionsTooLarge(ihdr.width, ihdr.height));
  }
  debug!("decoding {ihdr:?}");

  let zlib_len = ihdr.get_zlib_decompression_requirement();
  let idat_len = png_get_idat(bytes).fold(0_usize, |total, idat| total.saturating_add(idat.len()));
  if idat_len.saturating_mul(MAX_DEFLATE_RATIO) < zlib_len {
    debug!("{idat_len} bytes of image data can't inflate to {zlib_len}");
    return Err(PngError::Decompression);
  }
  let mut zlib_buffer: Vec<u8> = Vec::new();
  zlib_buffer.try_reserve_exact(zlib_len).map_err(|_| PngError::Alloc)?;
  zlib_buffer.resize(zlib_len, 0);
  match miniz_oxide::inflate::decompress_slice_iter_to_slice(
    &mut zlib_buffer,
    png_get_idat(bytes),
    true,
    true,
  ) {
    Ok(decompressed) if decompressed < zlib_len => {
      warn!("image data inflated to {decompressed} bytes, expected {zlib_len}");
    }
    Ok(_) => (),
    // the stream ended early, or kept going after the buffer was full
    Err(status @ (TINFLStatus::FailedCannotMakeProgress | TINFLStatus::HasMoreOutput)) => {
      warn!("image data didn't inflate cleanly ({status:?}), using what there is");
    }
    Err(status) => {
      debug!("inflate failed: {status:?}");
      return Err(PngError::Decompression);
    }
  }

  let mut image = Bitmap::try_new_filled(ihdr.width, ihdr.height, r8g8b8a8_Srgb::default())
    .ok_or(PngError::Alloc)?;
  let palette: &[[u8; 3]] = if ihdr.color_type == PngColorType::Index {
    png_get_palette(bytes).unwrap_or(&[])
  } else {
    &[]
  };
  let trns = png_get_transparency(bytes);
  ihdr.unfilter_decompressed_data(&mut zlib_buffer, |x, y, data| {
    if let Some(p) = image.get_mut(x, y) {
      *p = pixel_to_rgba8(&ihdr, palette, trns, data);
    }
  })?;
  Ok(image)
}
