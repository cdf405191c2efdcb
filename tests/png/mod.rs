use ninepatch::{
  png::{png_encode_rgba, png_try_bitmap_rgba, PngRawChunkIter},
  r8g8b8a8_Srgb, Bitmap,
};

#[test]
fn test_PngRawChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for v in super::all_test_files() {
    for _ in PngRawChunkIter::new(&v) {
      //
    }
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngRawChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_png_try_bitmap_rgba_no_panics() {
  for v in super::all_test_files() {
    let _ = png_try_bitmap_rgba(&v);
  }
  for _ in 0..10 {
    let v = super::rand_bytes(256);
    let _ = png_try_bitmap_rgba(&v);
    // a real header makes random data reach the inflate and unfilter steps
    let blank = Bitmap::try_new_filled(7, 5, r8g8b8a8_Srgb::default()).unwrap();
    let png = png_encode_rgba(&blank).unwrap();
    let _ = png_try_bitmap_rgba(&[&png[..33], &v[..]].concat());
  }
}

#[test]
fn test_random_pixels_survive_encoding() {
  let bytes = super::rand_bytes(13 * 9 * 4);
  let pixels =
    bytes.chunks_exact(4).map(|c| r8g8b8a8_Srgb { r: c[0], g: c[1], b: c[2], a: c[3] }).collect();
  let bitmap = Bitmap { width: 13, height: 9, pixels };
  let png = png_encode_rgba(&bitmap).unwrap();
  assert_eq!(png_try_bitmap_rgba(&png).unwrap(), bitmap);
}
