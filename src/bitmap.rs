//! Provides the heap-allocated image type.

use pixel_formats::r8g8b8a8_Srgb;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize).wrapping_mul(width as usize).wrapping_add(x as usize)
}

/// An owned direct-color image, row-major, top row first.
///
/// The fields are public, but if `pixels` isn't `width * height` long then
/// the accessor methods will just act like the missing pixels are out of
/// bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct Bitmap<P = r8g8b8a8_Srgb> {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<P>,
}
impl<P: Clone> Bitmap<P> {
  /// Allocates an image with every pixel set to `fill`.
  ///
  /// Gives `None` if the size overflows or the allocator refuses.
  pub fn try_new_filled(width: u32, height: u32, fill: P) -> Option<Self> {
    let count = (width as usize).checked_mul(height as usize)?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(count).ok()?;
    pixels.resize(count, fill);
    Some(Self { width, height, pixels })
  }
}
impl<P> Bitmap<P> {
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&P> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
    if x < self.width && y < self.height {
      self.pixels.get_mut(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Iterates the full rows of the image, top to bottom.
  ///
  /// A zero-width image has no rows.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
    let width = (self.width as usize).max(1);
    let height = if self.width == 0 { 0 } else { self.height as usize };
    self.pixels.chunks_exact(width).take(height)
  }
}
