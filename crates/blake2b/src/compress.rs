//! Compression function F and its mixing primitive G.
//!
//! Everything here is straight-line `u64` arithmetic: additions wrap modulo
//! 2^64 and the only branch is on the round counter, never on message or
//! state bytes.

#![allow(clippy::indexing_slicing)] // Work vector and schedule use fixed indices

use crate::consts::{BLOCK_LEN, IV, ROUNDS, SIGMA};

/// Running count of compressed bytes: a 128-bit value held as `(lo, hi)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Counter {
  lo: u64,
  hi: u64,
}

impl Counter {
  pub const ZERO: Self = Self { lo: 0, hi: 0 };

  #[inline]
  #[must_use]
  pub const fn from_words(lo: u64, hi: u64) -> Self {
    Self { lo, hi }
  }

  /// `[lo, hi]`.
  #[inline]
  #[must_use]
  pub const fn words(self) -> [u64; 2] {
    [self.lo, self.hi]
  }

  #[inline]
  #[must_use]
  pub const fn as_u128(self) -> u128 {
    ((self.hi as u128) << 64) | self.lo as u128
  }

  /// The counter after `n` more bytes, wrapping modulo 2^128.
  #[inline]
  #[must_use]
  pub const fn advance(self, n: u64) -> Self {
    let (lo, carry) = self.lo.overflowing_add(n);
    Self {
      lo,
      hi: self.hi.wrapping_add(carry as u64),
    }
  }
}

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(32);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(24);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(63);
}

#[inline(always)]
fn round(v: &mut [u64; 16], m: &[u64; 16], s: &[usize; 16]) {
  // Columns.
  g(v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
  g(v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
  g(v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
  g(v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

  // Diagonals.
  g(v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
  g(v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
  g(v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
  g(v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
}

/// F with a caller-chosen number of rounds.
///
/// `h` is updated in place from the message words `m`, the byte counter `t`
/// and the final-block flag. With `rounds == ROUNDS` this is the standard
/// BLAKE2b compression; other counts exist for the EIP-152 precompile.
pub fn compress_rounds(rounds: u32, h: &mut [u64; 8], m: &[u64; 16], t: Counter, last: bool) {
  let mut v = [0u64; 16];
  v[..8].copy_from_slice(h);
  v[8..].copy_from_slice(&IV);

  v[12] ^= t.lo;
  v[13] ^= t.hi;
  // All-ones when `last`, zero otherwise.
  v[14] ^= 0u64.wrapping_sub(last as u64);

  for r in 0..rounds {
    round(&mut v, m, &SIGMA[(r % 10) as usize]);
  }

  for i in 0..8 {
    h[i] ^= v[i] ^ v[i + 8];
  }
}

/// Standard 12-round F over one 128-byte block.
#[inline]
pub fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: Counter, last: bool) {
  let (chunks, _) = block.as_chunks::<8>();
  let mut m = [0u64; 16];
  for (word, chunk) in m.iter_mut().zip(chunks) {
    *word = u64::from_le_bytes(*chunk);
  }
  compress_rounds(ROUNDS, h, &m, t, last);
}
