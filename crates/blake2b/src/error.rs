//! Error types for BLAKE2b hashing.
//!
//! Both kinds are raised at the API boundary before any state changes, so a
//! failed call never leaves a half-updated hasher behind.

use thiserror::Error;

/// A parameter outside the range BLAKE2b accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum InvalidParameter {
  #[error("digest length {0} is outside 1..=64")]
  HashLength(usize),
  #[error("key length {0} exceeds 64 bytes")]
  KeyLength(usize),
  #[error("salt length {0} exceeds 16 bytes")]
  SaltLength(usize),
  #[error("personalization length {0} exceeds 16 bytes")]
  PersonalLength(usize),
  /// EIP-152 input must be exactly 213 bytes.
  #[error("compression input is {0} bytes, expected 213")]
  InputLength(usize),
  /// EIP-152 final-block flag must be 0 or 1.
  #[error("final-block flag byte {0:#04x} is neither 0 nor 1")]
  FinalFlag(u8),
}

/// A streaming hasher used out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum InvalidUsage {
  #[error("update after finalize")]
  UpdateAfterFinalize,
  #[error("finalize called twice")]
  FinalizeTwice,
}

/// Any failure reported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("invalid parameter: {0}")]
  InvalidParameter(#[from] InvalidParameter),
  #[error("invalid usage: {0}")]
  InvalidUsage(#[from] InvalidUsage),
}
