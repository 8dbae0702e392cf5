//! Key, nonce, tag and session enums.

use crate::constant_time::tags_match;
use crate::error::AeadError;
use crate::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// ChaCha20-Poly1305 key (32 bytes).
///
/// Key is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AeadKey([u8; KEY_SIZE]);

impl AeadKey {
    /// Create a key from raw bytes.
    #[must_use]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::BadInput` if slice length is not 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, AeadError> {
        let bytes: [u8; KEY_SIZE] = slice
            .try_into()
            .map_err(|_| AeadError::BadInput("key must be 32 bytes"))?;
        Ok(Self(bytes))
    }

    /// Get raw key bytes.
    ///
    /// # Security
    ///
    /// Handle with extreme care - this exposes the raw key material.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for AeadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AeadKey(<redacted>)")
    }
}

/// ChaCha20 nonce (12 bytes).
///
/// Must be unique per key; this type does not enforce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Create a nonce from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a nonce from a slice.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::BadInput` if slice length is not 12 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, AeadError> {
        let bytes: [u8; NONCE_SIZE] = slice
            .try_into()
            .map_err(|_| AeadError::BadInput("nonce must be 12 bytes"))?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// Authentication tag (16 bytes).
///
/// Deliberately not `PartialEq`: compare tags with [`Tag::verify`].
#[derive(Clone, Copy, Debug)]
pub struct Tag([u8; TAG_SIZE]);

impl Tag {
    /// Create a tag from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    ///
    /// # Errors
    ///
    /// Returns `AeadError::BadInput` if slice length is not 16 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, AeadError> {
        let bytes: [u8; TAG_SIZE] = slice
            .try_into()
            .map_err(|_| AeadError::BadInput("tag must be 16 bytes"))?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }

    /// Compare against `other` in constant time.
    #[must_use]
    pub fn verify(&self, other: &Tag) -> bool {
        tags_match(&self.0, &other.0)
    }
}

/// Whether a session turns plaintext into ciphertext or back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Plaintext in, ciphertext out
    #[default]
    Encrypt,
    /// Ciphertext in, plaintext out
    Decrypt,
}

/// Position of an [`AeadSession`](super::AeadSession) in the message protocol.
///
/// ```text
/// Uninitialized --start--> AbsorbingAad --process--> ProcessingText
///                               |                        |
///                               +-------finish-----------+--> Finalized
/// ```
///
/// `start` returns any phase to `AbsorbingAad`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// No message in progress
    #[default]
    Uninitialized,
    /// Accepting associated data
    AbsorbingAad,
    /// Encrypting or decrypting text
    ProcessingText,
    /// Tag produced; `start` is required before reuse
    Finalized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_slice() {
        let key = AeadKey::from_slice(&[0x42u8; KEY_SIZE]).unwrap();
        assert_eq!(key.as_bytes(), &[0x42u8; KEY_SIZE]);

        // Wrong size should fail
        assert_eq!(
            AeadKey::from_slice(&[0u8; 31]).unwrap_err(),
            AeadError::BadInput("key must be 32 bytes")
        );
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = AeadKey::new([0xAB; KEY_SIZE]);
        let shown = format!("{key:?}");
        assert!(!shown.contains("171"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn test_nonce_from_slice() {
        let bytes = [0x42u8; NONCE_SIZE];
        let nonce = Nonce::from_slice(&bytes).unwrap();
        assert_eq!(nonce.as_bytes(), &bytes);

        assert!(Nonce::from_slice(&[0u8; 11]).is_err());
        assert!(Nonce::from_slice(&[0u8; 24]).is_err());
    }

    #[test]
    fn test_tag_from_slice() {
        let bytes = [0x42u8; TAG_SIZE];
        let tag = Tag::from_slice(&bytes).unwrap();
        assert_eq!(tag.as_bytes(), &bytes);

        assert!(Tag::from_slice(&[0u8; 15]).is_err());
    }

    #[test]
    fn test_tag_verify() {
        let a = Tag::from_bytes([0x42; TAG_SIZE]);
        let b = Tag::from_bytes([0x42; TAG_SIZE]);
        let mut flipped = [0x42; TAG_SIZE];
        flipped[TAG_SIZE - 1] ^= 1;
        let c = Tag::from_bytes(flipped);

        assert!(a.verify(&b));
        assert!(!a.verify(&c));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Phase::default(), Phase::Uninitialized);
        assert_eq!(Direction::default(), Direction::Encrypt);
    }
}
