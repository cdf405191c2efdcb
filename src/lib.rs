#![forbid(unsafe_code)]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for decoding compiled nine-patch images.
//!
//! When the Android resource compiler processes a `*.9.png` it strips the
//! one-pixel marker border from the image and stores what the border meant in
//! a private `npTc` chunk (and, for optical insets, an `npLb` chunk). This
//! crate reverses that: it reads those chunks and paints the border back on,
//! giving you a PNG that is one pixel larger on every side.
//!
//! For most uses you want [`decode_nine_patch`] (bytes in, bytes out) or the
//! [`NinePatchDecoder`] (any `Read` in, any `Write` out). The lower level
//! pieces are public too:
//!
//! * [`ByteReader`] is a big-endian cursor over a byte slice.
//! * [`find_chunk`] walks the chunk list of PNG bytes for a tag.
//! * [`NinePatchData`] and [`LayoutBounds`] parse the two chunk payloads.
//! * [`render_nine_patch`] paints the border given already decoded pixels.

pub mod bitmap;
pub use bitmap::*;

mod byte_reader;
pub use byte_reader::*;

mod chunk_locator;
pub use chunk_locator::*;

mod error;
pub use error::*;

pub mod nine_patch;
pub use nine_patch::NinePatchData;

pub mod layout_bounds;
pub use layout_bounds::LayoutBounds;

pub mod border;
pub use border::*;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod png;

#[cfg(feature = "png")]
mod decoder;
#[cfg(feature = "png")]
pub use decoder::*;

pub use pixel_formats::r8g8b8a8_Srgb;
