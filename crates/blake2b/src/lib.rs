//! BLAKE2b (RFC 7693) in portable, `no_std` Rust.
//!
//! Digests of 1 to 64 bytes, unkeyed or keyed, with optional salt and
//! personalization. One-shot and streaming entry points produce identical
//! output for any split of the input.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), blake2b::Error> {
//! // One shot, 32-byte digest.
//! let digest = blake2b::hash(b"abc", 32)?;
//! assert_eq!(digest.len(), 32);
//!
//! // Streaming.
//! let mut state = blake2b::State::init(32, None)?;
//! state.update(b"a")?;
//! state.update(b"bc")?;
//! assert_eq!(state.finalize()?, digest);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`compress`] - The compression function F and byte counter (low level).
//! - [`consts`] - Block, key, salt and digest sizes.
//! - [`eip152`] - F with a caller-chosen round count, in precompile form.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | `std::io::Write` for [`State`], `std` error and tracing support |
//! | `alloc` | Yes | [`Hash::to_hex`] (implied by `std`) |
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod compress;
pub mod consts;
pub mod eip152;
mod error;
mod fixed;
mod hash;
mod params;
mod state;

pub use error::{Error, InvalidParameter, InvalidUsage};
pub use fixed::{Blake2b256, Blake2b512};
pub use hash::Hash;
pub use params::Params;
pub use state::{Phase, State};
pub use traits::Digest;

/// Unkeyed digest of `input`, `hash_length` bytes long.
///
/// Fails with [`Error::InvalidParameter`] when `hash_length` is outside `1..=64`.
pub fn hash(input: &[u8], hash_length: usize) -> Result<Hash, Error> {
  let mut params = Params::new();
  params.hash_length(hash_length)?;
  Ok(params.hash(input))
}

/// Keyed digest (MAC mode) of `input`. The key may be 0 to 64 bytes.
pub fn hash_keyed(input: &[u8], hash_length: usize, key: &[u8]) -> Result<Hash, Error> {
  let mut params = Params::new();
  params.hash_length(hash_length)?.key(key)?;
  Ok(params.hash(input))
}

/// Unkeyed 64-byte digest of `input`.
#[inline]
#[must_use]
pub fn blake2b(input: &[u8]) -> Hash {
  Params::new().hash(input)
}
