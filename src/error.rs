use crate::ChunkTag;

#[cfg(feature = "png")]
use crate::png::PngError;

/// An error from the `ninepatch` crate.
#[derive(Debug, thiserror::Error)]
pub enum NinePatchError {
  /// A read went past the end of the available bytes.
  #[error("unexpected end of data")]
  TruncatedData,

  /// The requested chunk isn't anywhere in the PNG's chunk list.
  ///
  /// For the `npLb` chunk this is a normal outcome, and the decoder treats it
  /// as "no optical bounds".
  #[error("no {0:?} chunk found")]
  ChunkNotFound(ChunkTag),

  /// The allocator couldn't give us enough space for the output image.
  #[error("not enough memory for a {0}x{1} image")]
  Alloc(u32, u32),

  /// The source bytes aren't a PNG we can decode.
  #[cfg(feature = "png")]
  #[error("source image could not be decoded: {0}")]
  Decode(#[source] PngError),

  /// The output image couldn't be encoded.
  #[cfg(feature = "png")]
  #[error("output image could not be encoded: {0}")]
  Encode(#[source] PngError),

  /// Reading the source or writing the destination failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// Shorthand for a `Result` with a [`NinePatchError`].
pub type NinePatchResult<T> = Result<T, NinePatchError>;

impl NinePatchError {
  /// If this error only means that a chunk was missing.
  #[inline]
  #[must_use]
  pub const fn is_chunk_not_found(&self) -> bool {
    matches!(self, Self::ChunkNotFound(_))
  }
}
