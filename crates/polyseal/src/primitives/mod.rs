//! Stream cipher and one-time authenticator seams.
//!
//! The AEAD session drives its two collaborators only through the traits in
//! this module. The default implementations delegate the ChaCha20 keystream
//! and the Poly1305 field arithmetic to the RustCrypto `chacha20` and
//! `poly1305` crates; this crate owns the composition, not the primitives.
//!
//! - [`ChaCha20Engine`] - keystream generation and XOR transform
//! - [`Poly1305Authenticator`] - streaming one-time MAC

mod chacha20_engine;
mod poly1305_mac;

pub use chacha20_engine::ChaCha20Engine;
pub use poly1305_mac::Poly1305Authenticator;

use crate::error::PrimitiveError;
use crate::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE, POLY1305_KEY_SIZE, TAG_SIZE};

/// A keyed stream cipher addressable by a 32-bit block counter.
///
/// Implementations must be streaming: splitting a `transform` call into
/// several calls over consecutive chunks yields the same output.
pub trait StreamCipherEngine {
    /// Store the 256-bit key. Any running stream is discarded.
    ///
    /// # Errors
    ///
    /// Implementation specific; the default engine never fails.
    fn set_key(&mut self, key: &[u8; KEY_SIZE]) -> Result<(), PrimitiveError>;

    /// Begin a keystream for `nonce` positioned at block `initial_counter`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::KeyNotSet`] if no key was stored.
    fn start(&mut self, nonce: &[u8; NONCE_SIZE], initial_counter: u32)
    -> Result<(), PrimitiveError>;

    /// Write keystream block `counter` into `out` without moving the running
    /// stream position.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::NotStarted`] before [`start`](Self::start).
    fn keystream_block(
        &mut self,
        counter: u32,
        out: &mut [u8; BLOCK_SIZE],
    ) -> Result<(), PrimitiveError>;

    /// XOR `input` with the running keystream into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::LengthMismatch`] if the buffers differ in
    /// length and [`PrimitiveError::KeystreamExhausted`] if the block counter
    /// would wrap.
    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), PrimitiveError>;

    /// XOR `buffer` with the running keystream in place.
    ///
    /// # Errors
    ///
    /// Same as [`transform`](Self::transform).
    fn transform_in_place(&mut self, buffer: &mut [u8]) -> Result<(), PrimitiveError>;

    /// Drop the key and stream state, wiping them.
    fn release(&mut self);
}

/// A one-time authenticator keyed once per message.
///
/// Absorption must be chunk-independent.
pub trait OneTimeAuthenticator {
    /// Key the authenticator, discarding any previous state.
    ///
    /// # Errors
    ///
    /// Implementation specific; the default authenticator never fails.
    fn set_key(&mut self, key: &[u8; POLY1305_KEY_SIZE]) -> Result<(), PrimitiveError>;

    /// Absorb `data`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::KeyNotSet`] if the authenticator is unkeyed.
    fn absorb(&mut self, data: &[u8]) -> Result<(), PrimitiveError>;

    /// Write the tag into `out`. The key is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::KeyNotSet`] if the authenticator is unkeyed.
    fn finalize(&mut self, out: &mut [u8; TAG_SIZE]) -> Result<(), PrimitiveError>;

    /// Drop any key and buffered data, wiping them.
    fn release(&mut self);
}
