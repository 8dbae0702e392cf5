//! Incremental ChaCha20-Poly1305 session.
//!
//! An [`AeadSession`] owns one stream cipher and one authenticator and drives
//! them through the RFC 7539 message protocol:
//!
//! 1. [`set_key`](AeadSession::set_key) once per key
//! 2. [`start`](AeadSession::start) once per message (fresh nonce)
//! 3. [`absorb_aad`](AeadSession::absorb_aad) zero or more times
//! 4. [`process`](AeadSession::process) zero or more times
//! 5. [`finish`](AeadSession::finish) exactly once
//!
//! Every entry point checks the [`Phase`] first and rejects out-of-order
//! calls with [`AeadError::BadState`].

use super::padding::{length_block, zero_padding};
use super::types::{AeadKey, Direction, Nonce, Phase, Tag};
use crate::error::AeadError;
use crate::primitives::{
    ChaCha20Engine, OneTimeAuthenticator, Poly1305Authenticator, StreamCipherEngine,
};
use crate::{BLOCK_SIZE, POLY1305_KEY_SIZE, TAG_SIZE};
use std::fmt;
use zeroize::Zeroizing;

/// Block counter of the first text block; block 0 keys the authenticator.
const INITIAL_COUNTER: u32 = 1;

/// Session over the default `ChaCha20` and Poly1305 primitives.
pub type ChaCha20Poly1305Session = AeadSession<ChaCha20Engine, Poly1305Authenticator>;

/// Incremental AEAD state machine.
///
/// Not internally synchronized: every mutating call takes `&mut self`.
/// [`release`](Self::release) runs on drop.
pub struct AeadSession<C: StreamCipherEngine, A: OneTimeAuthenticator> {
    cipher: C,
    authenticator: A,
    /// Associated data bytes absorbed in the current message
    aad_len: u64,
    /// Text bytes processed in the current message
    ciphertext_len: u64,
    phase: Phase,
    direction: Direction,
    /// A master key was loaded and not yet released
    keyed: bool,
}

impl ChaCha20Poly1305Session {
    /// Create an unkeyed session over `ChaCha20` and Poly1305.
    #[must_use]
    pub fn new() -> Self {
        Self::with_primitives(ChaCha20Engine::new(), Poly1305Authenticator::new())
    }
}

impl Default for ChaCha20Poly1305Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StreamCipherEngine, A: OneTimeAuthenticator> AeadSession<C, A> {
    /// Create a session that takes ownership of the given primitives.
    #[must_use]
    pub fn with_primitives(cipher: C, authenticator: A) -> Self {
        Self {
            cipher,
            authenticator,
            aad_len: 0,
            ciphertext_len: 0,
            phase: Phase::Uninitialized,
            direction: Direction::Encrypt,
            keyed: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Direction of the current message.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Associated data bytes absorbed so far.
    #[must_use]
    pub fn aad_len(&self) -> u64 {
        self.aad_len
    }

    /// Text bytes processed so far.
    #[must_use]
    pub fn ciphertext_len(&self) -> u64 {
        self.ciphertext_len
    }

    /// Load the master key into the cipher. Does not change the phase.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::Cipher` if the engine rejects the key.
    pub fn set_key(&mut self, key: &AeadKey) -> Result<(), AeadError> {
        self.cipher.set_key(key.as_bytes()).map_err(AeadError::Cipher)?;
        self.keyed = true;
        Ok(())
    }

    /// Begin a message.
    ///
    /// Starts the keystream at block 1, keys the authenticator from block 0,
    /// resets both length counters and enters [`Phase::AbsorbingAad`].
    ///
    /// The nonce must never have been used with this key before.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::Cipher` or `AeadError::Authenticator` if keying
    /// fails. The session is then left in [`Phase::Uninitialized`].
    pub fn start(&mut self, nonce: &Nonce, direction: Direction) -> Result<(), AeadError> {
        self.phase = Phase::Uninitialized;

        self.cipher
            .start(nonce.as_bytes(), INITIAL_COUNTER)
            .map_err(AeadError::Cipher)?;

        // Both buffers are wiped when they go out of scope, on every path.
        let mut block0 = Zeroizing::new([0u8; BLOCK_SIZE]);
        self.cipher
            .keystream_block(0, &mut block0)
            .map_err(AeadError::Cipher)?;

        let mut one_time_key = Zeroizing::new([0u8; POLY1305_KEY_SIZE]);
        one_time_key.copy_from_slice(&block0[..POLY1305_KEY_SIZE]);
        self.authenticator
            .set_key(&one_time_key)
            .map_err(AeadError::Authenticator)?;

        self.aad_len = 0;
        self.ciphertext_len = 0;
        self.phase = Phase::AbsorbingAad;
        self.direction = direction;

        tracing::debug!(?direction, "AEAD message started");
        Ok(())
    }

    /// Authenticate associated data.
    ///
    /// All associated data must be supplied before the first
    /// [`process`](Self::process) call.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::BadState` outside [`Phase::AbsorbingAad`].
    pub fn absorb_aad(&mut self, aad: &[u8]) -> Result<(), AeadError> {
        if self.phase != Phase::AbsorbingAad {
            return Err(self.bad_state("absorb_aad"));
        }

        self.aad_len = checked_len(self.aad_len, aad.len())?;
        self.authenticator
            .absorb(aad)
            .map_err(|e| self.poison(AeadError::Authenticator(e)))?;

        tracing::trace!(chunk = aad.len(), aad_len = self.aad_len, "absorbed associated data");
        Ok(())
    }

    /// Encrypt or decrypt `input` into `output`.
    ///
    /// The authenticator always sees ciphertext: the output when encrypting,
    /// the input when decrypting. Chunk boundaries do not affect the result.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::BadInput` if the buffers differ in length and
    /// `AeadError::BadState` before [`start`](Self::start) or after
    /// [`finish`](Self::finish).
    pub fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), AeadError> {
        if input.len() != output.len() {
            return Err(AeadError::BadInput("output length must equal input length"));
        }
        self.enter_text_phase("process", input.len())?;

        self.stream_text(input, output)
            .map_err(|e| self.poison(e))
    }

    /// Encrypt or decrypt `buffer` in place.
    ///
    /// # Errors
    ///
    /// Same as [`process`](Self::process), minus the length check.
    pub fn process_in_place(&mut self, buffer: &mut [u8]) -> Result<(), AeadError> {
        self.enter_text_phase("process_in_place", buffer.len())?;

        self.stream_text_in_place(buffer)
            .map_err(|e| self.poison(e))
    }

    /// Close the message and return its tag.
    ///
    /// Pads whichever stream is still open, appends the length trailer and
    /// finalizes the authenticator. The tag is not compared against anything
    /// here; use [`Tag::verify`] on the receiving side.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::BadState` if no message is in progress.
    pub fn finish(&mut self) -> Result<Tag, AeadError> {
        let open_stream = match self.phase {
            Phase::AbsorbingAad => self.aad_len,
            Phase::ProcessingText => self.ciphertext_len,
            Phase::Uninitialized | Phase::Finalized => return Err(self.bad_state("finish")),
        };
        self.phase = Phase::Finalized;

        self.seal_tag(open_stream).map_err(|e| self.poison(e))
    }

    /// Like [`finish`](Self::finish), writing the tag into a caller buffer.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::BadInput` unless `tag_out` is 16 bytes, otherwise
    /// as [`finish`](Self::finish).
    pub fn finish_into(&mut self, tag_out: &mut [u8]) -> Result<(), AeadError> {
        if tag_out.len() != TAG_SIZE {
            return Err(AeadError::BadInput("tag buffer must be 16 bytes"));
        }

        let tag = self.finish()?;
        tag_out.copy_from_slice(tag.as_bytes());
        Ok(())
    }

    /// Wipe both primitives and reset counters and phase. Idempotent.
    pub fn release(&mut self) {
        let held = self.holds_secrets();

        self.cipher.release();
        self.authenticator.release();
        self.aad_len = 0;
        self.ciphertext_len = 0;
        self.phase = Phase::Uninitialized;
        self.direction = Direction::Encrypt;
        self.keyed = false;

        if held {
            tracing::debug!("AEAD session released");
        }
    }

    /// Whether a key or a message in progress is still held.
    fn holds_secrets(&self) -> bool {
        self.keyed || self.phase != Phase::Uninitialized
    }

    fn bad_state(&self, operation: &'static str) -> AeadError {
        tracing::debug!(operation, phase = ?self.phase, "rejected out-of-order call");
        AeadError::BadState {
            operation,
            phase: self.phase,
        }
    }

    /// Abandon the current message after a primitive failure.
    fn poison(&mut self, err: AeadError) -> AeadError {
        tracing::warn!(error = %err, phase = ?self.phase, "AEAD session poisoned");
        self.phase = Phase::Uninitialized;
        err
    }

    /// Phase check, AAD padding on the first text chunk, and length accounting.
    fn enter_text_phase(&mut self, operation: &'static str, chunk: usize) -> Result<(), AeadError> {
        if !matches!(self.phase, Phase::AbsorbingAad | Phase::ProcessingText) {
            return Err(self.bad_state(operation));
        }
        let ciphertext_len = checked_len(self.ciphertext_len, chunk)?;

        if self.phase == Phase::AbsorbingAad {
            self.phase = Phase::ProcessingText;
            self.absorb_padding(self.aad_len)
                .map_err(|e| self.poison(e))?;
            tracing::trace!(aad_len = self.aad_len, "associated data closed");
        }

        self.ciphertext_len = ciphertext_len;
        Ok(())
    }

    fn stream_text(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), AeadError> {
        match self.direction {
            Direction::Encrypt => {
                self.cipher
                    .transform(input, output)
                    .map_err(AeadError::Cipher)?;
                self.authenticator
                    .absorb(output)
                    .map_err(AeadError::Authenticator)
            }
            Direction::Decrypt => {
                self.authenticator
                    .absorb(input)
                    .map_err(AeadError::Authenticator)?;
                self.cipher
                    .transform(input, output)
                    .map_err(AeadError::Cipher)
            }
        }
    }

    fn stream_text_in_place(&mut self, buffer: &mut [u8]) -> Result<(), AeadError> {
        match self.direction {
            Direction::Encrypt => {
                self.cipher
                    .transform_in_place(buffer)
                    .map_err(AeadError::Cipher)?;
                self.authenticator
                    .absorb(buffer)
                    .map_err(AeadError::Authenticator)
            }
            Direction::Decrypt => {
                self.authenticator
                    .absorb(buffer)
                    .map_err(AeadError::Authenticator)?;
                self.cipher
                    .transform_in_place(buffer)
                    .map_err(AeadError::Cipher)
            }
        }
    }

    fn absorb_padding(&mut self, stream_len: u64) -> Result<(), AeadError> {
        let padding = zero_padding(stream_len);
        if padding.is_empty() {
            return Ok(());
        }
        self.authenticator
            .absorb(padding)
            .map_err(AeadError::Authenticator)
    }

    fn seal_tag(&mut self, open_stream: u64) -> Result<Tag, AeadError> {
        self.absorb_padding(open_stream)?;

        let trailer = length_block(self.aad_len, self.ciphertext_len);
        self.authenticator
            .absorb(&trailer)
            .map_err(AeadError::Authenticator)?;

        let mut tag = [0u8; TAG_SIZE];
        self.authenticator
            .finalize(&mut tag)
            .map_err(AeadError::Authenticator)?;

        tracing::debug!(
            aad_len = self.aad_len,
            ciphertext_len = self.ciphertext_len,
            "AEAD message finalized"
        );
        Ok(Tag::from_bytes(tag))
    }
}

/// Add a chunk length to a running 64-bit counter.
fn checked_len(total: u64, chunk: usize) -> Result<u64, AeadError> {
    u64::try_from(chunk)
        .ok()
        .and_then(|chunk| total.checked_add(chunk))
        .ok_or(AeadError::BadInput("length counter overflow"))
}

impl<C: StreamCipherEngine, A: OneTimeAuthenticator> Drop for AeadSession<C, A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<C: StreamCipherEngine, A: OneTimeAuthenticator> fmt::Debug for AeadSession<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadSession")
            .field("phase", &self.phase)
            .field("direction", &self.direction)
            .field("aad_len", &self.aad_len)
            .field("ciphertext_len", &self.ciphertext_len)
            .finish_non_exhaustive()
    }
}
