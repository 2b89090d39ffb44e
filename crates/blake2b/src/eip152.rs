//! BLAKE2b compression as exposed by the EIP-152 precompile.
//!
//! Input layout, 213 bytes:
//!
//! | Bytes     | Field                                   |
//! |-----------|-----------------------------------------|
//! | 0..4      | rounds, big-endian `u32`                |
//! | 4..68     | state `h`, 8 little-endian `u64`        |
//! | 68..196   | message `m`, 16 little-endian `u64`     |
//! | 196..212  | counter `t`, 2 little-endian `u64`      |
//! | 212       | final-block flag, `0` or `1`            |
//!
//! The output is the updated state, 64 bytes little-endian.

#![allow(clippy::indexing_slicing)] // Offsets are fixed once the length is checked

use crate::{
  Error, InvalidParameter,
  compress::{Counter, compress_rounds},
};

/// Exact precompile input length.
pub const INPUT_LEN: usize = 213;

/// Output length: the serialized state.
pub const OUTPUT_LEN: usize = 64;

fn le_words<const N: usize>(bytes: &[u8]) -> [u64; N] {
  let mut out = [0u64; N];
  for (word, chunk) in out.iter_mut().zip(bytes.as_chunks::<8>().0) {
    *word = u64::from_le_bytes(*chunk);
  }
  out
}

/// Run F over a 213-byte precompile input.
pub fn compress(input: &[u8]) -> Result<[u8; OUTPUT_LEN], Error> {
  if input.len() != INPUT_LEN {
    tracing::debug!(len = input.len(), "rejecting eip-152 input length");
    return Err(InvalidParameter::InputLength(input.len()).into());
  }

  let last = match input[212] {
    0 => false,
    1 => true,
    flag => {
      tracing::debug!(flag, "rejecting eip-152 final-block flag");
      return Err(InvalidParameter::FinalFlag(flag).into());
    }
  };

  let rounds = u32::from_be_bytes([input[0], input[1], input[2], input[3]]);
  let mut h = le_words::<8>(&input[4..68]);
  let m = le_words::<16>(&input[68..196]);
  let [lo, hi] = le_words::<2>(&input[196..212]);

  tracing::trace!(rounds, last, "eip-152 compression");
  compress_rounds(rounds, &mut h, &m, Counter::from_words(lo, hi), last);

  let mut out = [0u8; OUTPUT_LEN];
  for (dst, word) in out.chunks_exact_mut(8).zip(&h) {
    dst.copy_from_slice(&word.to_le_bytes());
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Params, consts::IV};

  /// Precompile input for a single final block holding `msg` (at most 128 bytes).
  fn input_for(rounds: u32, msg: &[u8], last: u8) -> [u8; INPUT_LEN] {
    let mut h = IV;
    h[0] ^= 0x0101_0040;

    let mut input = [0u8; INPUT_LEN];
    input[..4].copy_from_slice(&rounds.to_be_bytes());
    for (dst, word) in input[4..68].chunks_exact_mut(8).zip(&h) {
      dst.copy_from_slice(&word.to_le_bytes());
    }
    input[68..68 + msg.len()].copy_from_slice(msg);
    input[196..204].copy_from_slice(&(msg.len() as u64).to_le_bytes());
    input[212] = last;
    input
  }

  #[test]
  fn twelve_rounds_match_one_shot_hash() {
    let out = compress(&input_for(12, b"abc", 1)).unwrap();
    assert_eq!(&out[..], Params::new().hash(b"abc").as_bytes());
  }

  #[test]
  fn non_final_block_differs() {
    let a = compress(&input_for(12, b"abc", 1)).unwrap();
    let b = compress(&input_for(12, b"abc", 0)).unwrap();
    assert_ne!(a, b);
  }

  #[test]
  fn round_count_is_honored() {
    let twelve = compress(&input_for(12, b"abc", 1)).unwrap();
    let one = compress(&input_for(1, b"abc", 1)).unwrap();
    assert_ne!(twelve, one);
    // Zero rounds collapse the state to the IV mixed with counter and flag.
    let zero = compress(&input_for(0, b"abc", 1)).unwrap();
    assert_eq!(zero[..8], IV[0].to_le_bytes());
    assert_eq!(zero[32..40], (IV[4] ^ 3).to_le_bytes());
    assert_eq!(zero[48..56], (!IV[6]).to_le_bytes());
  }

  #[test]
  fn rejects_wrong_length() {
    assert_eq!(
      compress(&[0u8; 212]),
      Err(Error::InvalidParameter(InvalidParameter::InputLength(212)))
    );
    assert_eq!(
      compress(&[0u8; 214]),
      Err(Error::InvalidParameter(InvalidParameter::InputLength(214)))
    );
    assert_eq!(compress(&[]), Err(Error::InvalidParameter(InvalidParameter::InputLength(0))));
  }

  #[test]
  fn rejects_bad_final_flag() {
    assert_eq!(
      compress(&input_for(12, b"abc", 2)),
      Err(Error::InvalidParameter(InvalidParameter::FinalFlag(2)))
    );
  }
}
