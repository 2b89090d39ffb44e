//! Core digest traits for the blake2b workspace.
//!
//! Algorithms that produce a fixed-size output at compile time implement
//! [`Digest`]. Variable-length and keyed hashing live on the concrete types,
//! since their parameters are validated at runtime.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;

pub use digest::Digest;
