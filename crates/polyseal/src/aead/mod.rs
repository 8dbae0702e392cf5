//! `ChaCha20-Poly1305` AEAD composition.
//!
//! Provides authenticated encryption with associated data (AEAD) per
//! RFC 7539:
//! - 256-bit keys
//! - 96-bit nonces (caller guarantees uniqueness per key)
//! - 128-bit authentication tags
//! - Streaming and one-shot interfaces
//!
//! ## Module Organization
//!
//! - [`types`] - Key, nonce, tag, direction and phase types
//! - [`session`] - Incremental state machine (`AeadSession`)
//! - [`oneshot`] - Whole-message helpers (`crypt_and_mac`, `seal`, `open`)
//!
//! ## Usage
//!
//! ```
//! use polyseal::{AeadKey, ChaCha20Poly1305Session, Direction, Nonce};
//!
//! let key = AeadKey::new([0x42; 32]);
//! let nonce = Nonce::from_bytes([0x00; 12]);
//!
//! let mut session = ChaCha20Poly1305Session::new();
//! session.set_key(&key)?;
//! session.start(&nonce, Direction::Encrypt)?;
//! session.absorb_aad(b"header")?;
//!
//! let mut out = [0u8; 10];
//! session.process(b"first ", &mut out[..6])?;
//! session.process(b"part", &mut out[6..])?;
//! let tag = session.finish()?;
//! # let _ = tag;
//! # Ok::<(), polyseal::AeadError>(())
//! ```

mod padding;

pub mod oneshot;
pub mod session;
pub mod types;

pub use oneshot::{crypt_and_mac, crypt_and_mac_in_place, open, open_in_place, seal, seal_in_place};
pub use session::{AeadSession, ChaCha20Poly1305Session};
pub use types::{AeadKey, Direction, Nonce, Phase, Tag};
