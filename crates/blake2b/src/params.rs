//! BLAKE2b parameter block.
//!
//! [`Params`] is the configuration surface of the crate: digest length, key,
//! salt and personalization. Every setter validates eagerly, so a `Params`
//! value is always hashable. Tree parameters are fixed at sequential mode
//! (fanout 1, depth 1, zero offsets).

#![allow(clippy::indexing_slicing)] // Lengths are checked before every copy

use core::fmt;

use crate::{
  Error, Hash, InvalidParameter, State,
  consts::{BLOCK_LEN, IV, KEY_MAX, OUT_MAX, PERSONAL_LEN, SALT_LEN},
};

/// Builder for the BLAKE2b parameter block.
///
/// ```
/// # fn main() -> Result<(), blake2b::Error> {
/// let mut params = blake2b::Params::new();
/// params.hash_length(32)?.key(b"secret")?.personal(b"my-app")?;
///
/// let one_shot = params.hash(b"payload");
/// let mut state = params.to_state();
/// state.update(b"pay")?;
/// state.update(b"load")?;
/// assert_eq!(state.finalize()?, one_shot);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Params {
  hash_length: u8,
  key_length: u8,
  key_block: [u8; BLOCK_LEN],
  salt: [u8; SALT_LEN],
  personal: [u8; PERSONAL_LEN],
}

impl Params {
  /// Unkeyed, 64-byte digest, zero salt and personalization.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self::with_hash_length(OUT_MAX as u8)
  }

  /// Callers guarantee `len` is in `1..=64`.
  pub(crate) const fn with_hash_length(len: u8) -> Self {
    Self {
      hash_length: len,
      key_length: 0,
      key_block: [0u8; BLOCK_LEN],
      salt: [0u8; SALT_LEN],
      personal: [0u8; PERSONAL_LEN],
    }
  }

  /// Digest length in bytes, `1..=64`.
  pub fn hash_length(&mut self, len: usize) -> Result<&mut Self, Error> {
    if !(1..=OUT_MAX).contains(&len) {
      tracing::debug!(len, "rejecting blake2b digest length");
      return Err(InvalidParameter::HashLength(len).into());
    }
    self.hash_length = len as u8;
    Ok(self)
  }

  /// Key for MAC mode, up to 64 bytes. An empty key means unkeyed.
  pub fn key(&mut self, key: &[u8]) -> Result<&mut Self, Error> {
    if key.len() > KEY_MAX {
      tracing::debug!(len = key.len(), "rejecting blake2b key length");
      return Err(InvalidParameter::KeyLength(key.len()).into());
    }
    self.key_block = [0u8; BLOCK_LEN];
    self.key_block[..key.len()].copy_from_slice(key);
    self.key_length = key.len() as u8;
    Ok(self)
  }

  /// Salt, up to 16 bytes, zero-padded.
  pub fn salt(&mut self, salt: &[u8]) -> Result<&mut Self, Error> {
    if salt.len() > SALT_LEN {
      tracing::debug!(len = salt.len(), "rejecting blake2b salt length");
      return Err(InvalidParameter::SaltLength(salt.len()).into());
    }
    self.salt = [0u8; SALT_LEN];
    self.salt[..salt.len()].copy_from_slice(salt);
    Ok(self)
  }

  /// Personalization, up to 16 bytes, zero-padded.
  pub fn personal(&mut self, personal: &[u8]) -> Result<&mut Self, Error> {
    if personal.len() > PERSONAL_LEN {
      tracing::debug!(len = personal.len(), "rejecting blake2b personalization length");
      return Err(InvalidParameter::PersonalLength(personal.len()).into());
    }
    self.personal = [0u8; PERSONAL_LEN];
    self.personal[..personal.len()].copy_from_slice(personal);
    Ok(self)
  }

  #[inline]
  #[must_use]
  pub fn get_hash_length(&self) -> usize {
    self.hash_length as usize
  }

  #[inline]
  #[must_use]
  pub fn get_key_length(&self) -> usize {
    self.key_length as usize
  }

  /// Start a streaming computation with these parameters.
  #[must_use]
  pub fn to_state(&self) -> State {
    State::from_params(self)
  }

  /// Hash `input` in one shot.
  #[must_use]
  pub fn hash(&self, input: &[u8]) -> Hash {
    let mut state = self.to_state();
    state.absorb(input);
    state.finish()
  }

  /// IV XOR the 64-byte parameter block.
  pub(crate) fn initial_words(&self) -> [u64; 8] {
    let mut h = IV;
    // digest_length | key_length << 8 | fanout << 16 | depth << 24; leaf length zero.
    h[0] ^= u64::from(self.hash_length) | u64::from(self.key_length) << 8 | 1 << 16 | 1 << 24;
    // Words 1-3 (node offset, node depth, inner length, reserved) stay zero.
    for (word, chunk) in h[4..6].iter_mut().zip(self.salt.as_chunks::<8>().0) {
      *word ^= u64::from_le_bytes(*chunk);
    }
    for (word, chunk) in h[6..8].iter_mut().zip(self.personal.as_chunks::<8>().0) {
      *word ^= u64::from_le_bytes(*chunk);
    }
    h
  }

  /// The zero-padded key block, if a key is set.
  pub(crate) fn key_block(&self) -> Option<&[u8; BLOCK_LEN]> {
    (self.key_length > 0).then_some(&self.key_block)
  }
}

impl Default for Params {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Params {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Key bytes stay out of logs.
    f.debug_struct("Params")
      .field("hash_length", &self.hash_length)
      .field("key_length", &self.key_length)
      .field("salt", &self.salt)
      .field("personal", &self.personal)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::format;

  use super::*;

  #[test]
  fn default_block_matches_unkeyed_512() {
    let words = Params::new().initial_words();
    assert_eq!(words[0], IV[0] ^ 0x0101_0040);
    assert_eq!(words[1..], IV[1..]);
  }

  #[test]
  fn key_and_length_land_in_word_zero() {
    let mut p = Params::new();
    p.hash_length(32).unwrap().key(&[0xaa; 5]).unwrap();
    assert_eq!(p.initial_words()[0], IV[0] ^ 0x0101_0520);
    assert_eq!(p.get_hash_length(), 32);
    assert_eq!(p.get_key_length(), 5);
  }

  #[test]
  fn salt_and_personal_are_little_endian_words() {
    let mut p = Params::new();
    p.salt(&[1]).unwrap().personal(&[0, 0, 0, 0, 0, 0, 0, 0, 2]).unwrap();
    let w = p.initial_words();
    assert_eq!(w[4], IV[4] ^ 1);
    assert_eq!(w[5], IV[5]);
    assert_eq!(w[6], IV[6]);
    assert_eq!(w[7], IV[7] ^ 2);
  }

  #[test]
  fn rejects_out_of_range_values() {
    let mut p = Params::new();
    assert_eq!(p.hash_length(0).unwrap_err(), Error::from(InvalidParameter::HashLength(0)));
    assert_eq!(p.hash_length(65).unwrap_err(), Error::from(InvalidParameter::HashLength(65)));
    assert_eq!(p.key(&[0; 65]).unwrap_err(), Error::from(InvalidParameter::KeyLength(65)));
    assert_eq!(p.salt(&[0; 17]).unwrap_err(), Error::from(InvalidParameter::SaltLength(17)));
    assert_eq!(
      p.personal(&[0; 17]).unwrap_err(),
      Error::from(InvalidParameter::PersonalLength(17))
    );
    // Failed setters leave the previous configuration intact.
    assert_eq!(p.get_hash_length(), 64);
    assert_eq!(p.get_key_length(), 0);
  }

  #[test]
  fn accepts_boundaries() {
    let mut p = Params::new();
    p.hash_length(1).unwrap();
    p.hash_length(64).unwrap();
    p.key(&[7; 64]).unwrap();
    p.salt(&[7; 16]).unwrap();
    p.personal(&[7; 16]).unwrap();
    assert!(p.key_block().is_some());
    p.key(&[]).unwrap();
    assert!(p.key_block().is_none());
  }

  #[test]
  fn debug_omits_key_bytes() {
    let mut p = Params::new();
    p.key(&[0x5a; 4]).unwrap();
    let dbg = format!("{p:?}");
    assert!(dbg.contains("key_length: 4"));
    assert!(!dbg.contains("90, 90"));
  }
}
