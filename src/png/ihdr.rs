/// The kinds of color that a PNG can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y | Self::Index => 1,
      Self::YA => 2,
      Self::RGB => 3,
      Self::RGBA => 4,
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = ();
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::Y,
      2 => Self::RGB,
      3 => Self::Index,
      4 => Self::YA,
      6 => Self::RGBA,
      _ => return Err(()),
    })
  }
}

/// Image Header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored as 7 Adam7 reduced images.
  pub is_interlaced: bool,
}

/// One of the reduced images that make up the image data.
///
/// A non-interlaced image is a single "reduced" image covering everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReducedImage {
  /// Where the first pixel lands in the full image.
  pub x0: u32,
  pub y0: u32,
  /// Step between pixels in the full image.
  pub dx: u32,
  pub dy: u32,
  /// Size of this reduced image. Either can be 0 for small images.
  pub width: u32,
  pub height: u32,
}

const ADAM7: [(u32, u32, u32, u32); 7] = [
  (0, 0, 8, 8),
  (4, 0, 8, 8),
  (0, 4, 4, 8),
  (2, 0, 4, 4),
  (0, 2, 2, 4),
  (1, 0, 2, 2),
  (0, 1, 1, 2),
];
const NOT_INTERLACED: [(u32, u32, u32, u32); 1] = [(0, 0, 1, 1)];

/// Count of positions `start, start+step, ...` that are less than `full`.
#[inline]
const fn span(full: u32, start: u32, step: u32) -> u32 {
  if full <= start {
    0
  } else {
    (full - start - 1) / step + 1
  }
}

impl IHDR {
  /// Bits for a single pixel of this image.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Bytes in a single filtered line of the given pixel width.
  ///
  /// Each line is a filter byte then the pixel data, rounded up to a whole
  /// byte.
  #[inline]
  #[must_use]
  pub const fn bytes_per_filterline(&self, width: u32) -> usize {
    1 + (self.bits_per_pixel().saturating_mul(width as usize).saturating_add(7)) / 8
  }

  /// Gets the buffer size required to perform Zlib decompression.
  #[must_use]
  pub fn get_zlib_decompression_requirement(&self) -> usize {
    self
      .reduced_images()
      .filter(|r| r.width != 0 && r.height != 0)
      .map(|r| self.bytes_per_filterline(r.width).saturating_mul(r.height as usize))
      .fold(0, usize::saturating_add)
  }

  /// The reduced images of this image, in the order they're stored.
  pub(crate) fn reduced_images(&self) -> impl Iterator<Item = ReducedImage> {
    let passes: &'static [(u32, u32, u32, u32)] =
      if self.is_interlaced { &ADAM7 } else { &NOT_INTERLACED };
    let (full_width, full_height) = (self.width, self.height);
    passes.iter().map(move |&(x0, y0, dx, dy)| ReducedImage {
      x0,
      y0,
      dx,
      dy,
      width: span(full_width, x0, dx),
      height: span(full_height, y0, dy),
    })
  }

  /// The 13 bytes of `IHDR` chunk data for this header.
  ///
  /// Compression and filter method are always 0, the only defined values.
  #[must_use]
  pub fn to_bytes(&self) -> [u8; 13] {
    let mut out = [0; 13];
    out[0..4].copy_from_slice(&self.width.to_be_bytes());
    out[4..8].copy_from_slice(&self.height.to_be_bytes());
    out[8] = self.bit_depth;
    out[9] = self.color_type as u8;
    out[12] = u8::from(self.is_interlaced);
    out
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = ();
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [
        w0,
        w1,
        w2,
        w3,
        h0,
        h1,
        h2,
        h3,
        bit_depth,
        color_type,
        _compression_method,
        _filter_method,
        interlace_method,
      ] => {
        let color_type = PngColorType::try_from(*color_type)?;
        let depth_ok = match color_type {
          PngColorType::Y => [1, 2, 4, 8, 16].contains(bit_depth),
          PngColorType::Index => [1, 2, 4, 8].contains(bit_depth),
          _ => [8, 16].contains(bit_depth),
        };
        if !depth_ok {
          return Err(());
        }
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: *bit_depth,
          color_type,
          is_interlaced: match interlace_method {
            0 => false,
            1 => true,
            _ => return Err(()),
          },
        })
      }
      _ => Err(()),
    }
  }
}
