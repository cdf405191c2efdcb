//! Painting the one-pixel marker border around an image.
//!
//! The output is one pixel larger on every side than the source. Its edges
//! carry:
//! * **Top row, left column:** the stretch regions.
//! * **Bottom row, right column:** the content padding, with any optical
//!   bounds ticks painted over it.
//!
//! Every write is bounds checked against the output, and a write that lands
//! outside of it is simply dropped. Real images always have in-range values,
//! but nothing stops a hostile chunk from claiming a padding of `u32::MAX`.

use pixel_formats::r8g8b8a8_Srgb;

use crate::{Bitmap, LayoutBounds, NinePatchData, NinePatchError, NinePatchResult};

/// Color of stretch region and padding ticks, opaque black.
pub const NINE_PATCH_TICK: r8g8b8a8_Srgb = r8g8b8a8_Srgb { r: 0, g: 0, b: 0, a: 0xFF };

/// Color of optical bounds ticks, opaque red.
pub const LAYOUT_BOUNDS_TICK: r8g8b8a8_Srgb = r8g8b8a8_Srgb { r: 0xFF, g: 0, b: 0, a: 0xFF };

/// Builds the bordered form of a nine-patch image.
///
/// The source pixel `(x, y)` lands at `(x + 1, y + 1)` in the output, and the
/// border is painted according to the nine-patch data and, if there is any,
/// the optical bounds data.
pub fn render_nine_patch(
  source: &Bitmap, nine_patch: &NinePatchData, layout_bounds: Option<&LayoutBounds>,
) -> NinePatchResult<Bitmap> {
  let mut out = framed_copy(source)?;
  draw_padding(&mut out, nine_patch);
  draw_stretch_regions(&mut out, nine_patch);
  if let Some(layout_bounds) = layout_bounds {
    draw_layout_bounds(&mut out, layout_bounds);
  }
  Ok(out)
}

/// Copies the source into the middle of a new image with a 1 pixel
/// transparent frame.
fn framed_copy(source: &Bitmap) -> NinePatchResult<Bitmap> {
  let width = source.width.saturating_add(2);
  let height = source.height.saturating_add(2);
  let mut out = Bitmap::try_new_filled(width, height, r8g8b8a8_Srgb::default())
    .ok_or(NinePatchError::Alloc(width, height))?;
  for (y, row) in source.rows().enumerate() {
    let start = crate::xy_width_to_index(1, y as u32 + 1, width);
    if let Some(dest) = out.pixels.get_mut(start..start + row.len()) {
      dest.copy_from_slice(row);
    }
  }
  Ok(out)
}

/// Source dimensions of a framed image.
#[inline]
#[must_use]
fn inner_size(out: &Bitmap) -> (u32, u32) {
  (out.width.saturating_sub(2), out.height.saturating_sub(2))
}

/// Paints `x1..=x2` on row `y`.
fn draw_h_line(out: &mut Bitmap, y: u32, x1: u32, x2: u32, color: r8g8b8a8_Srgb) {
  let x2 = x2.min(out.width.saturating_sub(1));
  for x in x1..=x2 {
    if let Some(p) = out.get_mut(x, y) {
      *p = color;
    }
  }
}

/// Paints `y1..=y2` on column `x`.
fn draw_v_line(out: &mut Bitmap, x: u32, y1: u32, y2: u32, color: r8g8b8a8_Srgb) {
  let y2 = y2.min(out.height.saturating_sub(1));
  for y in y1..=y2 {
    if let Some(p) = out.get_mut(x, y) {
      *p = color;
    }
  }
}

fn draw_padding(out: &mut Bitmap, np: &NinePatchData) {
  let (width, height) = inner_size(out);
  draw_h_line(
    out,
    height + 1,
    np.padding_left.saturating_add(1),
    width.saturating_sub(np.padding_right),
    NINE_PATCH_TICK,
  );
  draw_v_line(
    out,
    width + 1,
    np.padding_top.saturating_add(1),
    height.saturating_sub(np.padding_bottom),
    NINE_PATCH_TICK,
  );
}

fn draw_stretch_regions(out: &mut Bitmap, np: &NinePatchData) {
  let (width, height) = inner_size(out);
  if np.x_divs.is_empty() {
    draw_h_line(out, 0, 1, width, NINE_PATCH_TICK);
  } else {
    for (start, end) in np.x_regions() {
      draw_h_line(out, 0, start.saturating_add(1), end, NINE_PATCH_TICK);
    }
  }
  if np.y_divs.is_empty() {
    draw_v_line(out, 0, 1, height, NINE_PATCH_TICK);
  } else {
    for (start, end) in np.y_regions() {
      draw_v_line(out, 0, start.saturating_add(1), end, NINE_PATCH_TICK);
    }
  }
}

fn draw_layout_bounds(out: &mut Bitmap, lb: &LayoutBounds) {
  let (width, height) = inner_size(out);
  let (bottom_row, right_col) = (height + 1, width + 1);
  let mut tick = |x: u32, y: u32| {
    if let Some(p) = out.get_mut(x, y) {
      *p = LAYOUT_BOUNDS_TICK;
    }
  };
  // Counts are capped by the output size, anything beyond that would only
  // ever land out of bounds.
  for i in 0..lb.left.min(width + 2) {
    tick(1 + i, bottom_row);
  }
  for i in 0..lb.right.min(width + 1) {
    tick(width - i, bottom_row);
  }
  for i in 0..lb.top.min(height + 2) {
    tick(right_col, 1 + i);
  }
  for i in 0..lb.bottom.min(height + 1) {
    tick(right_col, height - i);
  }
}
