//! Fuzz target for BLAKE2b.
//!
//! Arbitrary parameters and update splits must agree with the one-shot API,
//! and unkeyed variable-length output must agree with RustCrypto's `blake2`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  hash_length: u8,
  key: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<u16>,
}

fuzz_target!(|input: Input| {
  let len = usize::from(input.hash_length);
  let key = &input.key[..input.key.len().min(80)];

  let one_shot = blake2b::hash_keyed(&input.data, len, key);
  let Ok(mut state) = blake2b::State::init(len, Some(key)) else {
    assert!(one_shot.is_err(), "init rejected parameters the one-shot API accepted");
    return;
  };
  let one_shot = one_shot.expect("init accepted these parameters");

  let mut offset = 0;
  let mut chunk_idx = 0;
  while offset < input.data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      usize::from(input.chunk_sizes[chunk_idx % input.chunk_sizes.len()]).max(1)
    };
    let end = (offset + chunk_size).min(input.data.len());
    state.update(&input.data[offset..end]).expect("update before finalize");
    offset = end;
    chunk_idx += 1;
  }
  assert_eq!(state.finalize().expect("first finalize"), one_shot, "blake2b streaming mismatch");
  assert!(state.update(b"x").is_err());
  assert!(state.finalize().is_err());

  if key.is_empty() {
    use blake2::digest::{Update as _, VariableOutput as _};
    let mut reference = blake2::Blake2bVar::new(len).expect("length already validated");
    reference.update(&input.data);
    let mut expected = vec![0u8; len];
    reference.finalize_variable(&mut expected).expect("buffer sized to length");
    assert_eq!(one_shot.as_bytes(), &expected[..], "blake2b reference mismatch");
  }
});
