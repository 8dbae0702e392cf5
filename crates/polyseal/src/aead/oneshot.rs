//! One-shot helpers for messages held entirely in memory.
//!
//! [`crypt_and_mac`] is the core entry point: it runs a full session and
//! returns the computed tag without judging it. [`seal`] and [`open`] layer
//! the usual "append tag" / "verify tag" conventions on top.

use super::session::ChaCha20Poly1305Session;
use super::types::{AeadKey, Direction, Nonce, Tag};
use crate::error::AeadError;
use zeroize::Zeroize;

/// Encrypt or decrypt a whole message and compute its tag.
///
/// Runs `set_key`, `start`, `absorb_aad`, `process` and `finish` on a
/// transient session. The session is released before returning, whether or
/// not an error occurred. When decrypting, the caller must compare the
/// returned tag with the received one (see [`Tag::verify`]) before trusting
/// `output`.
///
/// # Errors
///
/// Returns the first error raised by any step, e.g. `AeadError::BadInput` if
/// `output` and `input` differ in length.
pub fn crypt_and_mac(
    key: &AeadKey,
    nonce: &Nonce,
    direction: Direction,
    aad: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<Tag, AeadError> {
    let mut session = ChaCha20Poly1305Session::new();

    let result = (|| -> Result<Tag, AeadError> {
        session.set_key(key)?;
        session.start(nonce, direction)?;
        session.absorb_aad(aad)?;
        session.process(input, output)?;
        session.finish()
    })();

    session.release();
    result
}

/// In-place variant of [`crypt_and_mac`].
///
/// # Errors
///
/// Returns the first error raised by any step.
pub fn crypt_and_mac_in_place(
    key: &AeadKey,
    nonce: &Nonce,
    direction: Direction,
    aad: &[u8],
    buffer: &mut [u8],
) -> Result<Tag, AeadError> {
    let mut session = ChaCha20Poly1305Session::new();

    let result = (|| -> Result<Tag, AeadError> {
        session.set_key(key)?;
        session.start(nonce, direction)?;
        session.absorb_aad(aad)?;
        session.process_in_place(buffer)?;
        session.finish()
    })();

    session.release();
    result
}

/// Encrypt `plaintext`, returning the ciphertext and its detached tag.
///
/// # Errors
///
/// Propagates any error from [`crypt_and_mac`].
pub fn seal(
    key: &AeadKey,
    nonce: &Nonce,
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Tag), AeadError> {
    let mut ciphertext = vec![0u8; plaintext.len()];
    let tag = crypt_and_mac(key, nonce, Direction::Encrypt, aad, plaintext, &mut ciphertext)?;
    Ok((ciphertext, tag))
}

/// Encrypt `buffer` in place, returning the detached tag.
///
/// # Errors
///
/// Propagates any error from [`crypt_and_mac_in_place`].
pub fn seal_in_place(
    key: &AeadKey,
    nonce: &Nonce,
    aad: &[u8],
    buffer: &mut [u8],
) -> Result<Tag, AeadError> {
    crypt_and_mac_in_place(key, nonce, Direction::Encrypt, aad, buffer)
}

/// Decrypt `ciphertext` and verify `tag` in constant time.
///
/// # Errors
///
/// Returns `AeadError::AuthenticationFailed` if the tag does not match; no
/// plaintext is released in that case.
pub fn open(
    key: &AeadKey,
    nonce: &Nonce,
    aad: &[u8],
    ciphertext: &[u8],
    tag: &Tag,
) -> Result<Vec<u8>, AeadError> {
    let mut plaintext = vec![0u8; ciphertext.len()];
    let computed = crypt_and_mac(key, nonce, Direction::Decrypt, aad, ciphertext, &mut plaintext)?;

    if !computed.verify(tag) {
        plaintext.zeroize();
        return Err(AeadError::AuthenticationFailed);
    }
    Ok(plaintext)
}

/// Decrypt `buffer` in place and verify `tag` in constant time.
///
/// # Errors
///
/// Returns `AeadError::AuthenticationFailed` if the tag does not match; the
/// buffer is zeroed in that case.
pub fn open_in_place(
    key: &AeadKey,
    nonce: &Nonce,
    aad: &[u8],
    buffer: &mut [u8],
    tag: &Tag,
) -> Result<(), AeadError> {
    let computed = crypt_and_mac_in_place(key, nonce, Direction::Decrypt, aad, buffer)?;

    if !computed.verify(tag) {
        buffer.zeroize();
        return Err(AeadError::AuthenticationFailed);
    }
    Ok(())
}
