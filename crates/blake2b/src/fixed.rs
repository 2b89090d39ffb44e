//! Fixed-size BLAKE2b hashers implementing [`traits::Digest`].
//!
//! The digest length is a compile-time constant, so construction and
//! finalization cannot fail.

use traits::Digest;

use crate::{Params, State};

macro_rules! fixed_blake2b {
  ($(#[$meta:meta])* $name:ident, $len:literal) => {
    $(#[$meta])*
    #[derive(Clone, Debug)]
    pub struct $name {
      state: State,
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self {
          state: Params::with_hash_length($len).to_state(),
        }
      }
    }

    impl Digest for $name {
      const OUTPUT_SIZE: usize = $len;
      type Output = [u8; $len];

      #[inline]
      fn new() -> Self {
        Self::default()
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.state.absorb(data);
      }

      fn finalize(&self) -> Self::Output {
        let mut out = [0u8; $len];
        out.copy_from_slice(self.state.finish().as_bytes());
        out
      }

      #[inline]
      fn reset(&mut self) {
        *self = Self::default();
      }
    }
  };
}

fixed_blake2b!(
  /// BLAKE2b with a 64-byte digest.
  Blake2b512,
  64
);

fixed_blake2b!(
  /// BLAKE2b with a 32-byte digest (BLAKE2b-256).
  ///
  /// Not a truncation of [`Blake2b512`]: the digest length is part of the
  /// parameter block.
  Blake2b256,
  32
);

#[cfg(test)]
mod tests {
  use hex_literal::hex;

  use super::*;

  #[test]
  fn empty_input() {
    assert_eq!(
      Blake2b512::digest(b""),
      hex!(
        "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419"
        "d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
      )
    );
    assert_eq!(
      Blake2b256::digest(b""),
      hex!("0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8")
    );
  }

  #[test]
  fn finalize_is_idempotent() {
    let mut h = Blake2b256::new();
    h.update(b"ab");
    let first = h.finalize();
    assert_eq!(first, h.finalize());

    h.update(b"c");
    assert_eq!(h.finalize(), Blake2b256::digest(b"abc"));
  }

  #[test]
  fn reset_restores_initial_state() {
    let mut h = Blake2b512::new();
    h.update(&[0x42; 300]);
    h.reset();
    assert_eq!(h.finalize(), Blake2b512::digest(b""));
  }

  #[test]
  fn not_a_prefix_of_the_longer_digest() {
    let long = Blake2b512::digest(b"abc");
    let short = Blake2b256::digest(b"abc");
    assert_ne!(long[..32], short[..]);
  }
}
