use ninepatch::{
  decode_nine_patch, ByteReader, NinePatchData,
  png::{png_encode_rgba, png_try_bitmap_rgba, png_write_chunk},
  r8g8b8a8_Srgb, Bitmap, ChunkTag, NinePatchDecoder, NinePatchError, StreamDecoder,
  LAYOUT_BOUNDS_TICK, NINE_PATCH_TICK,
};

const CLEAR: r8g8b8a8_Srgb = r8g8b8a8_Srgb { r: 0, g: 0, b: 0, a: 0 };

fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

/// A source image where every pixel is different.
fn source(width: u32, height: u32) -> Bitmap {
  let pixels = (0..width * height)
    .map(|i| r8g8b8a8_Srgb { r: i as u8, g: (i * 3) as u8, b: 200, a: 255 - i as u8 })
    .collect();
  Bitmap { width, height, pixels }
}

fn np_tc_payload(x_divs: &[u32], y_divs: &[u32], padding: [u32; 4]) -> Vec<u8> {
  let mut v = vec![1, x_divs.len() as u8, y_divs.len() as u8, 0];
  v.extend_from_slice(&[0; 8]);
  for p in padding {
    v.extend_from_slice(&p.to_be_bytes());
  }
  v.extend_from_slice(&[0; 4]);
  for d in x_divs.iter().chain(y_divs) {
    v.extend_from_slice(&d.to_be_bytes());
  }
  v
}

fn np_lb_payload(left: u32, top: u32, right: u32, bottom: u32) -> Vec<u8> {
  [left, top, right, bottom].iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Encodes the bitmap, with extra chunks placed between `IHDR` and `IDAT`.
fn compiled_png(bitmap: &Bitmap, chunks: &[(ChunkTag, Vec<u8>)]) -> Vec<u8> {
  let plain = png_encode_rgba(bitmap).unwrap();
  let after_ihdr = 8 + 12 + 13;
  let mut out = plain[..after_ihdr].to_vec();
  for (tag, data) in chunks {
    png_write_chunk(&mut out, *tag, data).unwrap();
  }
  out.extend_from_slice(&plain[after_ihdr..]);
  out
}

fn decode_to_bitmap(png: &[u8]) -> Bitmap {
  let mut out = Vec::new();
  NinePatchDecoder.decode(png, &mut out).unwrap();
  png_try_bitmap_rgba(&out).unwrap()
}

fn row(b: &Bitmap, y: u32) -> Vec<r8g8b8a8_Srgb> {
  (0..b.width).map(|x| *b.get(x, y).unwrap()).collect()
}

fn col(b: &Bitmap, x: u32) -> Vec<r8g8b8a8_Srgb> {
  (0..b.height).map(|y| *b.get(x, y).unwrap()).collect()
}

#[test]
fn test_four_by_four_scenario() {
  init_logger();
  let src = source(4, 4);
  let png = compiled_png(&src, &[(ChunkTag::npTc, np_tc_payload(&[], &[], [1, 1, 1, 1]))]);
  let out = decode_to_bitmap(&png);

  assert_eq!((out.width, out.height), (6, 6));
  const K: r8g8b8a8_Srgb = NINE_PATCH_TICK;
  assert_eq!(row(&out, 0), vec![CLEAR, K, K, K, K, CLEAR]);
  assert_eq!(col(&out, 0), vec![CLEAR, K, K, K, K, CLEAR]);
  assert_eq!(row(&out, 5), vec![CLEAR, CLEAR, K, K, CLEAR, CLEAR]);
  assert_eq!(col(&out, 5), vec![CLEAR, CLEAR, K, K, CLEAR, CLEAR]);
  for y in 0..4 {
    for x in 0..4 {
      assert_eq!(out.get(x + 1, y + 1), src.get(x, y));
    }
  }
}

/// An `npTc` payload laid out the way aapt serializes it: two stretch regions
/// per axis, nine region colors, and the offset fields filled in.
const AAPT_NP_TC: [u8; 84] = [
  0x00, // was deserialized
  0x02, 0x02, 0x09, // x divs, y divs, colors
  0x20, 0x00, 0x00, 0x00, // x divs offset
  0x28, 0x00, 0x00, 0x00, // y divs offset
  0x00, 0x00, 0x00, 0x05, // padding left
  0x00, 0x00, 0x00, 0x05, // padding right
  0x00, 0x00, 0x00, 0x04, // padding top
  0x00, 0x00, 0x00, 0x04, // padding bottom
  0x30, 0x00, 0x00, 0x00, // colors offset
  0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x23, // x divs
  0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x14, // y divs
  0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // colors
  0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
  0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
];

#[test]
fn test_aapt_np_tc_layout() {
  let np = NinePatchData::read(&mut ByteReader::new(&AAPT_NP_TC)).unwrap();
  assert_eq!(
    np,
    NinePatchData {
      padding_left: 5,
      padding_right: 5,
      padding_top: 4,
      padding_bottom: 4,
      x_divs: vec![5, 35],
      y_divs: vec![5, 20],
      num_colors: 9,
    }
  );

  let png = compiled_png(&source(40, 30), &[(ChunkTag::npTc, AAPT_NP_TC.to_vec())]);
  let out = decode_to_bitmap(&png);
  assert_eq!((out.width, out.height), (42, 32));
  let ticks = |points: Vec<(u32, u32)>| -> Vec<(u32, u32)> {
    points.into_iter().filter(|&(x, y)| out.get(x, y) == Some(&NINE_PATCH_TICK)).collect()
  };
  let top = ticks((0..42).map(|x| (x, 0)).collect());
  assert_eq!(top, (6..=35).map(|x| (x, 0)).collect::<Vec<_>>());
  let left = ticks((0..32).map(|y| (0, y)).collect());
  assert_eq!(left, (6..=20).map(|y| (0, y)).collect::<Vec<_>>());
  let bottom = ticks((0..42).map(|x| (x, 31)).collect());
  assert_eq!(bottom, (6..=35).map(|x| (x, 31)).collect::<Vec<_>>());
  let right = ticks((0..32).map(|y| (41, y)).collect());
  assert_eq!(right, (5..=26).map(|y| (41, y)).collect::<Vec<_>>());
}

#[test]
fn test_stretch_sub_ranges() {
  init_logger();
  let np = np_tc_payload(&[2, 4, 6, 7], &[0, 2], [0; 4]);
  let png = compiled_png(&source(8, 3), &[(ChunkTag::npTc, np)]);
  let out = decode_to_bitmap(&png);
  let ticked: Vec<u32> =
    (0..out.width).filter(|&x| out.get(x, 0) == Some(&NINE_PATCH_TICK)).collect();
  assert_eq!(ticked, vec![3, 4, 7]);
  let ticked: Vec<u32> =
    (0..out.height).filter(|&y| out.get(0, y) == Some(&NINE_PATCH_TICK)).collect();
  assert_eq!(ticked, vec![1, 2]);
}

#[test]
fn test_optical_bounds_are_optional() {
  init_logger();
  let src = source(5, 4);
  let np = np_tc_payload(&[1, 3], &[1, 2], [2, 1, 0, 1]);
  let without = decode_to_bitmap(&compiled_png(&src, &[(ChunkTag::npTc, np.clone())]));
  let with = decode_to_bitmap(&compiled_png(
    &src,
    &[(ChunkTag::npTc, np), (ChunkTag::npLb, np_lb_payload(1, 0, 1, 0))],
  ));

  // stretch rows are the same either way
  assert_eq!(row(&without, 0), row(&with, 0));
  assert_eq!(col(&without, 0), col(&with, 0));
  assert!(row(&without, 5).iter().chain(&col(&without, 6)).all(|p| *p != LAYOUT_BOUNDS_TICK));
  assert_eq!(with.get(1, 5), Some(&LAYOUT_BOUNDS_TICK));
  assert_eq!(with.get(5, 5), Some(&LAYOUT_BOUNDS_TICK));
  assert_eq!(with.get(3, 5), Some(&NINE_PATCH_TICK));
}

#[test]
fn test_chunk_order_does_not_matter() {
  init_logger();
  let src = source(3, 3);
  let np = (ChunkTag::npTc, np_tc_payload(&[], &[], [0; 4]));
  let lb = (ChunkTag::npLb, np_lb_payload(0, 1, 0, 0));
  let a = decode_to_bitmap(&compiled_png(&src, &[np.clone(), lb.clone()]));
  let b = decode_to_bitmap(&compiled_png(&src, &[lb, np]));
  assert_eq!(a, b);
  assert_eq!(a.get(4, 1), Some(&LAYOUT_BOUNDS_TICK));
}

#[test]
fn test_missing_np_tc_is_fatal() {
  init_logger();
  let png = compiled_png(&source(2, 2), &[(ChunkTag::npLb, np_lb_payload(1, 1, 1, 1))]);
  let mut out = Vec::new();
  let err = NinePatchDecoder.decode(&png[..], &mut out).unwrap_err();
  assert!(matches!(err, NinePatchError::ChunkNotFound(ChunkTag::npTc)));
  assert!(out.is_empty());
}

#[test]
fn test_empty_input_is_a_no_op() {
  let mut out = Vec::new();
  NinePatchDecoder.decode(std::io::empty(), &mut out).unwrap();
  assert!(out.is_empty());
  assert!(decode_nine_patch(&[]).unwrap().is_none());
}

#[test]
fn test_hostile_values_never_panic() {
  init_logger();
  let np = np_tc_payload(&[u32::MAX, 0, 3, u32::MAX - 7], &[9_000, 1], [u32::MAX; 4]);
  let lb = np_lb_payload(u32::MAX, u32::MAX, 0, 77);
  let png = compiled_png(&source(3, 2), &[(ChunkTag::npTc, np), (ChunkTag::npLb, lb)]);
  let out = decode_to_bitmap(&png);
  assert_eq!((out.width, out.height), (5, 4));

  // random bytes dressed up as each chunk
  for _ in 0..20 {
    let junk = super::rand_bytes(48);
    let _ = decode_nine_patch(&compiled_png(&source(3, 3), &[(ChunkTag::npTc, junk.clone())]));
    let ok_np = (ChunkTag::npTc, np_tc_payload(&[], &[], [0; 4]));
    let _ = decode_nine_patch(&compiled_png(&source(3, 3), &[ok_np, (ChunkTag::npLb, junk)]));
  }
}

#[test]
fn test_any_file_never_panics() {
  for v in super::all_test_files() {
    let _ = decode_nine_patch(&v);
  }
  for _ in 0..10 {
    let _ = decode_nine_patch(&super::rand_bytes(512));
  }
}
