//! ChaCha20 stream cipher engine backed by the `chacha20` crate.

use super::StreamCipherEngine;
use crate::error::PrimitiveError;
use crate::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE};
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use std::fmt;
use zeroize::Zeroizing;

/// RFC 7539 ChaCha20 (96-bit nonce, 32-bit block counter).
///
/// Holds the key between messages so one engine can be restarted with a new
/// nonce. Key and cipher state are wiped on [`release`](StreamCipherEngine::release)
/// and on drop.
#[derive(Default)]
pub struct ChaCha20Engine {
    key: Option<Zeroizing<[u8; KEY_SIZE]>>,
    cipher: Option<ChaCha20>,
}

impl ChaCha20Engine {
    /// Create an unkeyed engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key is stored.
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        self.key.is_some()
    }

    /// Whether a keystream is running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.cipher.is_some()
    }

    fn running(&mut self) -> Result<&mut ChaCha20, PrimitiveError> {
        self.cipher.as_mut().ok_or(PrimitiveError::NotStarted)
    }
}

/// Byte offset of keystream block `counter`.
fn block_offset(counter: u32) -> u64 {
    u64::from(counter) * BLOCK_SIZE as u64
}

impl StreamCipherEngine for ChaCha20Engine {
    fn set_key(&mut self, key: &[u8; KEY_SIZE]) -> Result<(), PrimitiveError> {
        self.cipher = None;
        let mut stored = Zeroizing::new([0u8; KEY_SIZE]);
        stored.copy_from_slice(key);
        self.key = Some(stored);
        Ok(())
    }

    fn start(
        &mut self,
        nonce: &[u8; NONCE_SIZE],
        initial_counter: u32,
    ) -> Result<(), PrimitiveError> {
        let key = self.key.as_ref().ok_or(PrimitiveError::KeyNotSet)?;

        let mut cipher = ChaCha20::new(
            chacha20::Key::from_slice(&key[..]),
            chacha20::Nonce::from_slice(nonce),
        );
        cipher
            .try_seek(block_offset(initial_counter))
            .map_err(|_| PrimitiveError::KeystreamExhausted)?;

        self.cipher = Some(cipher);
        Ok(())
    }

    fn keystream_block(
        &mut self,
        counter: u32,
        out: &mut [u8; BLOCK_SIZE],
    ) -> Result<(), PrimitiveError> {
        let cipher = self.running()?;

        // Generate the block out of band and restore the running position.
        let resume = cipher
            .try_current_pos::<u64>()
            .map_err(|_| PrimitiveError::KeystreamExhausted)?;
        cipher
            .try_seek(block_offset(counter))
            .map_err(|_| PrimitiveError::KeystreamExhausted)?;

        out.fill(0);
        let generated = cipher
            .try_apply_keystream(out)
            .map_err(|_| PrimitiveError::KeystreamExhausted);

        cipher
            .try_seek(resume)
            .map_err(|_| PrimitiveError::KeystreamExhausted)?;
        generated
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), PrimitiveError> {
        if input.len() != output.len() {
            return Err(PrimitiveError::LengthMismatch);
        }

        self.running()?
            .apply_keystream_b2b(input, output)
            .map_err(|_| PrimitiveError::KeystreamExhausted)
    }

    fn transform_in_place(&mut self, buffer: &mut [u8]) -> Result<(), PrimitiveError> {
        self.running()?
            .try_apply_keystream(buffer)
            .map_err(|_| PrimitiveError::KeystreamExhausted)
    }

    fn release(&mut self) {
        self.cipher = None;
        self.key = None;
    }
}

impl fmt::Debug for ChaCha20Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaCha20Engine")
            .field("keyed", &self.is_keyed())
            .field("started", &self.is_started())
            .finish()
    }
}
