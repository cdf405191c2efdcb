//! Reverses the per-line filtering of decompressed image data.

use super::{PngError, ReducedImage, IHDR};

/// The Paeth predictor, picks whichever neighbor is closest to `a + b - c`.
#[inline]
#[must_use]
pub(crate) const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let p = a as i16 + b as i16 - c as i16;
  let pa = (p - a as i16).abs();
  let pb = (p - b as i16).abs();
  let pc = (p - c as i16).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Undoes one line's filter in place.
///
/// `unit` is the byte distance to the "left" pixel: the bytes per pixel,
/// rounded up to 1 for packed pixels. The line above the first line of an
/// image counts as all zeroes. An unknown filter type leaves the line as is.
fn unfilter_line(filter: u8, line: &mut [u8], above: Option<&[u8]>, unit: usize) {
  let up = |i: usize| above.and_then(|a| a.get(i).copied()).unwrap_or(0);
  for i in 0..line.len() {
    let a = if i >= unit { line[i - unit] } else { 0 };
    let b = up(i);
    let c = if i >= unit { up(i - unit) } else { 0 };
    let predicted = match filter {
      1 => a,
      2 => b,
      3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
      4 => paeth_predict(a, b, c),
      _ => 0,
    };
    line[i] = line[i].wrapping_add(predicted);
  }
}

impl IHDR {
  /// Unfilters the decompressed image data and passes each pixel to `op`.
  ///
  /// The arguments to `op` are `(x, y, pixel_bytes)`, with the position in
  /// the full image. Pixels of 8 or 16 bits per channel get their bytes
  /// as stored (big-endian for 16-bit). Packed pixels of 1, 2, or 4 bits get a
  /// single byte holding the value in its low bits.
  ///
  /// ## Failure
  /// * The image is zero sized.
  /// * `decompressed` is shorter than the header calls for.
  pub fn unfilter_decompressed_data<F: FnMut(u32, u32, &[u8])>(
    &self, mut decompressed: &mut [u8], mut op: F,
  ) -> Result<(), PngError> {
    if self.width == 0 || self.height == 0 {
      return Err(PngError::WidthOrHeightZero);
    }
    let unit = self.bits_per_pixel().div_ceil(8).max(1);
    for reduced in self.reduced_images() {
      if reduced.width == 0 || reduced.height == 0 {
        continue;
      }
      let line_len = self.bytes_per_filterline(reduced.width);
      let image_len = line_len.saturating_mul(reduced.height as usize);
      if decompressed.len() < image_len {
        return Err(PngError::Unfilter);
      }
      let (this_image, rest) = core::mem::take(&mut decompressed).split_at_mut(image_len);
      decompressed = rest;

      let mut above: Option<&[u8]> = None;
      for (reduced_y, line) in (0_u32..).zip(this_image.chunks_exact_mut(line_len)) {
        let Some((filter, pixels)) = line.split_first_mut() else { continue };
        unfilter_line(*filter, pixels, above, unit);
        let pixels: &[u8] = pixels;
        self.send_out_line(&reduced, reduced_y, pixels, &mut op);
        above = Some(pixels);
      }
    }
    Ok(())
  }

  fn send_out_line<F: FnMut(u32, u32, &[u8])>(
    &self, reduced: &ReducedImage, reduced_y: u32, pixels: &[u8], op: &mut F,
  ) {
    let y = reduced.y0 + reduced_y * reduced.dy;
    let full_x = |reduced_x: u32| reduced.x0 + reduced_x * reduced.dx;
    match self.bit_depth {
      1 | 2 | 4 => {
        let depth = u32::from(self.bit_depth);
        let per_byte = 8 / depth;
        let mask = (1_u8 << depth) - 1;
        for reduced_x in 0..reduced.width {
          let Some(byte) = pixels.get((reduced_x / per_byte) as usize) else { return };
          // packed pixels fill each byte from the high bits down
          let shift = 8 - depth * (reduced_x % per_byte + 1);
          op(full_x(reduced_x), y, &[(byte >> shift) & mask]);
        }
      }
      _ => {
        let bytes_per_pixel = (self.bits_per_pixel() / 8).max(1);
        for (reduced_x, px) in (0..reduced.width).zip(pixels.chunks_exact(bytes_per_pixel)) {
          op(full_x(reduced_x), y, px);
        }
      }
    }
  }
}
