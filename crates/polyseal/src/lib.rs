//! # Polyseal
//!
//! `ChaCha20-Poly1305` authenticated encryption with associated data, as
//! defined by RFC 7539.
//!
//! This crate provides:
//! - [`AeadSession`], an incremental (start / absorb / process / finish) API
//!   for callers that stream messages
//! - [`crypt_and_mac`], a one-shot entry point for whole messages held in
//!   memory
//! - [`seal`] / [`open`] helpers that append or verify the tag
//! - The [`StreamCipherEngine`] and [`OneTimeAuthenticator`] seams, with
//!   default implementations backed by the `chacha20` and `poly1305` crates
//!
//! ## Construction
//!
//! | Step | Input to Poly1305 |
//! |------|-------------------|
//! | Key derivation | ChaCha20 block 0, first 32 bytes |
//! | Associated data | AAD, zero-padded to 16 bytes |
//! | Text | ciphertext (counter starts at 1), zero-padded to 16 bytes |
//! | Trailer | `len(AAD)` and `len(ciphertext)`, 64-bit little-endian |
//!
//! ## Nonces
//!
//! A nonce must never be used twice with the same key. Nothing in this
//! crate tracks nonces; uniqueness is the caller's obligation.
//!
//! ## Usage
//!
//! ```
//! use polyseal::{AeadKey, Direction, Nonce, crypt_and_mac};
//!
//! let key = AeadKey::new([0x42; 32]);
//! let nonce = Nonce::from_bytes([0x07; 12]);
//! let plaintext = b"attack at dawn";
//!
//! let mut ciphertext = [0u8; 14];
//! let tag = crypt_and_mac(&key, &nonce, Direction::Encrypt, b"hdr", plaintext, &mut ciphertext)?;
//!
//! let mut recovered = [0u8; 14];
//! let check = crypt_and_mac(&key, &nonce, Direction::Decrypt, b"hdr", &ciphertext, &mut recovered)?;
//! assert!(tag.verify(&check));
//! assert_eq!(&recovered, plaintext);
//! # Ok::<(), polyseal::AeadError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod aead;
pub mod constant_time;
pub mod error;
pub mod primitives;

pub use aead::{
    AeadKey, AeadSession, ChaCha20Poly1305Session, Direction, Nonce, Phase, Tag, crypt_and_mac,
    crypt_and_mac_in_place, open, open_in_place, seal, seal_in_place,
};
pub use error::{AeadError, PrimitiveError};
pub use primitives::{
    ChaCha20Engine, OneTimeAuthenticator, Poly1305Authenticator, StreamCipherEngine,
};

/// ChaCha20 key size (32 bytes / 256 bits).
pub const KEY_SIZE: usize = 32;

/// ChaCha20 nonce size (12 bytes / 96 bits).
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag size (16 bytes / 128 bits).
pub const TAG_SIZE: usize = 16;

/// ChaCha20 keystream block size.
pub const BLOCK_SIZE: usize = 64;

/// Poly1305 one-time key size.
pub const POLY1305_KEY_SIZE: usize = 32;

/// Poly1305 block size, also the AEAD padding boundary.
pub const POLY1305_BLOCK_SIZE: usize = 16;
