//! Streaming Poly1305 backed by the `poly1305` crate.

use super::OneTimeAuthenticator;
use crate::error::PrimitiveError;
use crate::{POLY1305_BLOCK_SIZE, POLY1305_KEY_SIZE, TAG_SIZE};
use poly1305::universal_hash::{KeyInit, UniversalHash};
use poly1305::{Block, Key, Poly1305};
use std::fmt;
use zeroize::Zeroize;

/// Poly1305 one-time authenticator.
///
/// The `poly1305` crate consumes whole 16-byte blocks, so a partial block is
/// buffered between [`absorb`](OneTimeAuthenticator::absorb) calls. This
/// makes the tag independent of how the input is chunked.
#[derive(Default)]
pub struct Poly1305Authenticator {
    mac: Option<Poly1305>,
    pending: [u8; POLY1305_BLOCK_SIZE],
    pending_len: usize,
}

impl Poly1305Authenticator {
    /// Create an unkeyed authenticator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a one-time key is loaded.
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        self.mac.is_some()
    }

    fn clear_pending(&mut self) {
        self.pending.zeroize();
        self.pending_len = 0;
    }
}

impl OneTimeAuthenticator for Poly1305Authenticator {
    fn set_key(&mut self, key: &[u8; POLY1305_KEY_SIZE]) -> Result<(), PrimitiveError> {
        self.clear_pending();
        self.mac = Some(Poly1305::new(Key::from_slice(key)));
        Ok(())
    }

    fn absorb(&mut self, data: &[u8]) -> Result<(), PrimitiveError> {
        let mac = self.mac.as_mut().ok_or(PrimitiveError::KeyNotSet)?;
        let mut data = data;

        if self.pending_len > 0 {
            let take = (POLY1305_BLOCK_SIZE - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];

            if self.pending_len < POLY1305_BLOCK_SIZE {
                return Ok(());
            }
            mac.update(&[Block::clone_from_slice(&self.pending)]);
            self.pending.zeroize();
            self.pending_len = 0;
        }

        let mut blocks = data.chunks_exact(POLY1305_BLOCK_SIZE);
        for block in &mut blocks {
            mac.update(&[Block::clone_from_slice(block)]);
        }

        let rest = blocks.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
        Ok(())
    }

    fn finalize(&mut self, out: &mut [u8; TAG_SIZE]) -> Result<(), PrimitiveError> {
        let mac = self.mac.take().ok_or(PrimitiveError::KeyNotSet)?;
        let tag = mac.compute_unpadded(&self.pending[..self.pending_len]);
        out.copy_from_slice(&tag);
        self.clear_pending();
        Ok(())
    }

    fn release(&mut self) {
        self.mac = None;
        self.clear_pending();
    }
}

impl Drop for Poly1305Authenticator {
    fn drop(&mut self) {
        self.pending.zeroize();
    }
}

impl fmt::Debug for Poly1305Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly1305Authenticator")
            .field("keyed", &self.is_keyed())
            .field("pending_len", &self.pending_len)
            .finish()
    }
}
