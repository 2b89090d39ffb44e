//! Digest extraction and the [`Hash`] value returned by every hasher.

#![allow(clippy::indexing_slicing)] // `len` is validated to 1..=64 on construction

use core::fmt;

use crate::consts::OUT_MAX;

/// A BLAKE2b digest of 1 to 64 bytes.
///
/// Equality compares only the digest bytes, so two hashes of different
/// lengths are never equal.
#[derive(Clone, Copy)]
pub struct Hash {
  bytes: [u8; OUT_MAX],
  len: u8,
}

impl Hash {
  /// Serializes the state words little-endian and keeps the first `len` bytes.
  pub(crate) fn from_words(h: &[u64; 8], len: u8) -> Self {
    debug_assert!((1..=OUT_MAX as u8).contains(&len));
    let mut bytes = [0u8; OUT_MAX];
    for (dst, word) in bytes.chunks_exact_mut(8).zip(h) {
      dst.copy_from_slice(&word.to_le_bytes());
    }
    bytes[len as usize..].fill(0);
    Self { bytes, len }
  }

  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..self.len as usize]
  }

  /// Digest length in bytes, always in `1..=64`.
  #[inline]
  #[must_use]
  #[allow(clippy::len_without_is_empty)]
  pub fn len(&self) -> usize {
    self.len as usize
  }

  /// Lowercase hex rendering of the digest.
  #[cfg(feature = "alloc")]
  #[must_use]
  pub fn to_hex(&self) -> alloc::string::String {
    alloc::format!("{self:x}")
  }
}

impl AsRef<[u8]> for Hash {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl PartialEq for Hash {
  fn eq(&self, other: &Self) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl Eq for Hash {}

impl PartialEq<[u8]> for Hash {
  fn eq(&self, other: &[u8]) -> bool {
    self.as_bytes() == other
  }
}

impl fmt::LowerHex for Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.as_bytes() {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}

impl fmt::Display for Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::LowerHex::fmt(self, f)
  }
}

impl fmt::Debug for Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Hash({self:x})")
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::format;

  use super::*;

  const WORDS: [u64; 8] = [
    0x0706_0504_0302_0100,
    0x0f0e_0d0c_0b0a_0908,
    0x1716_1514_1312_1110,
    0x1f1e_1d1c_1b1a_1918,
    0x2726_2524_2322_2120,
    0x2f2e_2d2c_2b2a_2928,
    0x3736_3534_3332_3130,
    0x3f3e_3d3c_3b3a_3938,
  ];

  #[test]
  fn words_serialize_little_endian() {
    let h = Hash::from_words(&WORDS, 64);
    let expected: alloc::vec::Vec<u8> = (0u8..64).collect();
    assert_eq!(h.as_bytes(), &expected[..]);
  }

  #[test]
  fn truncates_to_requested_length() {
    for len in 1..=64u8 {
      let h = Hash::from_words(&WORDS, len);
      assert_eq!(h.len(), len as usize);
      assert_eq!(h.as_bytes().last().copied(), Some(len - 1));
    }
  }

  #[test]
  fn hex_formatting() {
    let h = Hash::from_words(&WORDS, 3);
    assert_eq!(format!("{h}"), "000102");
    assert_eq!(format!("{h:x}"), "000102");
    assert_eq!(format!("{h:?}"), "Hash(000102)");
  }

  #[test]
  fn different_lengths_are_not_equal() {
    let a = Hash::from_words(&WORDS, 32);
    let b = Hash::from_words(&WORDS, 33);
    assert_ne!(a, b);
    assert_eq!(a, Hash::from_words(&WORDS, 32));
  }
}
