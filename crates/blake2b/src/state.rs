//! Streaming BLAKE2b: the block processor behind every entry point.
//!
//! Input is compressed in 128-byte blocks. A full block is held back until
//! more input arrives, because only the very last block is compressed with the
//! final flag set and its true length added to the counter.

#![allow(clippy::indexing_slicing)] // `buf_len <= BLOCK_LEN` is maintained by `absorb`

use core::{cmp, fmt};

use crate::{
  Error, Hash, InvalidUsage, Params,
  compress::{Counter, compress},
  consts::BLOCK_LEN,
};

/// Where a [`State`] is in its `init -> update* -> finalize` lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  /// Initialized; no message bytes absorbed yet.
  Fresh,
  /// At least one non-empty update.
  Active,
  /// `finalize` has returned a digest; the state accepts nothing further.
  Finalized,
}

/// An in-progress BLAKE2b computation.
///
/// Cloning forks the computation: both copies continue independently.
#[derive(Clone)]
pub struct State {
  h: [u64; 8],
  buf: [u8; BLOCK_LEN],
  buf_len: usize,
  /// Bytes compressed so far; excludes `buf`.
  count: Counter,
  hash_length: u8,
  phase: Phase,
}

impl State {
  /// Unkeyed state with a 64-byte digest.
  #[must_use]
  pub fn new() -> Self {
    Params::new().to_state()
  }

  /// Start a computation producing `hash_length` bytes, optionally keyed.
  ///
  /// Fails with [`Error::InvalidParameter`] before any work when
  /// `hash_length` is outside `1..=64` or the key exceeds 64 bytes.
  pub fn init(hash_length: usize, key: Option<&[u8]>) -> Result<Self, Error> {
    let mut params = Params::new();
    params.hash_length(hash_length)?;
    if let Some(key) = key {
      params.key(key)?;
    }
    Ok(params.to_state())
  }

  pub(crate) fn from_params(params: &Params) -> Self {
    let mut state = Self {
      h: params.initial_words(),
      buf: [0u8; BLOCK_LEN],
      buf_len: 0,
      count: Counter::ZERO,
      hash_length: params.get_hash_length() as u8,
      phase: Phase::Fresh,
    };
    // The key is the first block of the stream; if nothing follows, it is also the last.
    if let Some(block) = params.key_block() {
      state.buf = *block;
      state.buf_len = BLOCK_LEN;
    }
    tracing::trace!(
      hash_length = state.hash_length,
      key_length = params.get_key_length(),
      "blake2b state initialized"
    );
    state
  }

  /// Absorb more input. Empty input is a no-op.
  pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
    if self.phase == Phase::Finalized {
      tracing::debug!("blake2b update after finalize");
      return Err(InvalidUsage::UpdateAfterFinalize.into());
    }
    self.absorb(data);
    Ok(())
  }

  /// Compress the final block and return the digest.
  ///
  /// May be called once; later calls fail with [`Error::InvalidUsage`].
  pub fn finalize(&mut self) -> Result<Hash, Error> {
    if self.phase == Phase::Finalized {
      tracing::debug!("blake2b finalize called twice");
      return Err(InvalidUsage::FinalizeTwice.into());
    }
    let hash = self.finish();
    self.phase = Phase::Finalized;
    self.buf = [0u8; BLOCK_LEN];
    self.buf_len = 0;
    Ok(hash)
  }

  /// Total bytes absorbed so far, including a key block.
  #[inline]
  #[must_use]
  pub fn count(&self) -> u128 {
    self.count.advance(self.buf_len as u64).as_u128()
  }

  #[inline]
  #[must_use]
  pub fn hash_length(&self) -> usize {
    self.hash_length as usize
  }

  #[inline]
  #[must_use]
  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub(crate) fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }
    self.phase = Phase::Active;

    if self.buf_len != 0 {
      let take = cmp::min(BLOCK_LEN - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      if self.buf_len == BLOCK_LEN && !data.is_empty() {
        self.count = self.count.advance(BLOCK_LEN as u64);
        compress(&mut self.h, &self.buf, self.count, false);
        self.buf_len = 0;
      }
    }

    // Here either the buffer is empty or `data` is.
    let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
    let (eager, held) = match blocks.split_last() {
      Some((last, init)) if rest.is_empty() => (init, Some(last)),
      _ => (blocks, None),
    };

    for block in eager {
      self.count = self.count.advance(BLOCK_LEN as u64);
      compress(&mut self.h, block, self.count, false);
    }

    if let Some(last) = held {
      self.buf = *last;
      self.buf_len = BLOCK_LEN;
    } else if !rest.is_empty() {
      self.buf[..rest.len()].copy_from_slice(rest);
      self.buf_len = rest.len();
    }
  }

  /// Digest of everything absorbed so far; leaves `self` untouched.
  pub(crate) fn finish(&self) -> Hash {
    let mut h = self.h;
    let mut block = self.buf;
    block[self.buf_len..].fill(0);
    let t = self.count.advance(self.buf_len as u64);
    compress(&mut h, &block, t, true);

    tracing::trace!(
      hash_length = self.hash_length,
      bytes = t.as_u128() as u64,
      "blake2b state finalized"
    );
    Hash::from_words(&h, self.hash_length)
  }
}

impl Default for State {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for State {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Buffered bytes may hold the key.
    f.debug_struct("State")
      .field("hash_length", &self.hash_length)
      .field("count", &self.count())
      .field("phase", &self.phase)
      .finish_non_exhaustive()
  }
}

#[cfg(feature = "std")]
impl std::io::Write for State {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf).map_err(std::io::Error::other)?;
    Ok(buf.len())
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}
