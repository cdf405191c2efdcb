//! The CRC-32 that PNG puts at the end of every chunk.

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      c = if (c & 1) != 0 { 0xEDB8_8320_u32 ^ (c >> 1) } else { c >> 1 };
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

/// Computes the CRC of a chunk's tag and data bytes.
#[inline]
#[must_use]
pub fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  iter.fold(u32::MAX, |crc, byte| CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8))
    ^ u32::MAX
}

#[test]
fn test_known_crcs() {
  assert_eq!(png_crc(b"IEND".iter().copied()), 0xAE42_6082);
  assert_eq!(png_crc(b"123456789".iter().copied()), 0xCBF4_3926);
}
