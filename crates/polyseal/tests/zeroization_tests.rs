//! Zeroization validation tests
//!
//! Verifies that key material held by sessions and primitives is wiped on
//! release so it does not linger in memory between messages.

use polyseal::{
    AeadError, AeadKey, ChaCha20Engine, ChaCha20Poly1305Session, Direction, Nonce,
    OneTimeAuthenticator, Phase, Poly1305Authenticator, PrimitiveError, StreamCipherEngine,
};
use zeroize::Zeroize;

/// Helper function to check if memory region contains all zeros
fn is_zeroed(data: &[u8]) -> bool {
    data.iter().all(|&b| b == 0)
}

#[test]
fn test_aead_key_zeroize() {
    let mut key = AeadKey::new([42u8; 32]);
    assert!(!is_zeroed(key.as_bytes()));

    key.zeroize();
    assert!(is_zeroed(key.as_bytes()));
}

#[test]
fn test_engine_release_forgets_key() {
    let mut engine = ChaCha20Engine::new();
    engine.set_key(&[7u8; 32]).unwrap();
    engine.start(&[0u8; 12], 1).unwrap();
    assert!(engine.is_keyed());

    engine.release();

    assert!(!engine.is_keyed());
    assert!(!engine.is_started());
    assert_eq!(engine.start(&[0u8; 12], 1), Err(PrimitiveError::KeyNotSet));
}

#[test]
fn test_authenticator_release_forgets_key() {
    let mut mac = Poly1305Authenticator::new();
    mac.set_key(&[9u8; 32]).unwrap();
    mac.absorb(b"buffered partial block").unwrap();

    mac.release();

    assert!(!mac.is_keyed());
    assert_eq!(mac.absorb(b"more"), Err(PrimitiveError::KeyNotSet));
}

#[test]
fn test_session_release_requires_rekey() {
    let mut session = ChaCha20Poly1305Session::new();
    session.set_key(&AeadKey::new([1u8; 32])).unwrap();
    session
        .start(&Nonce::from_bytes([2u8; 12]), Direction::Encrypt)
        .unwrap();
    session.absorb_aad(b"header").unwrap();

    session.release();

    // The master key is gone: starting again fails until a new key is set
    assert_eq!(
        session.start(&Nonce::from_bytes([3u8; 12]), Direction::Encrypt),
        Err(AeadError::Cipher(PrimitiveError::KeyNotSet))
    );
    assert_eq!(session.phase(), Phase::Uninitialized);
}

#[test]
fn test_session_release_twice() {
    let mut session = ChaCha20Poly1305Session::new();
    session.set_key(&AeadKey::new([1u8; 32])).unwrap();
    session
        .start(&Nonce::from_bytes([2u8; 12]), Direction::Decrypt)
        .unwrap();
    let mut out = [0u8; 4];
    session.process(b"data", &mut out).unwrap();

    session.release();
    session.release();

    assert_eq!(session.phase(), Phase::Uninitialized);
    assert_eq!(session.direction(), Direction::Encrypt);
    assert_eq!(session.aad_len(), 0);
    assert_eq!(session.ciphertext_len(), 0);
}

#[test]
fn test_session_drop_after_error() {
    let mut session = ChaCha20Poly1305Session::new();
    // No key: start fails, the session must still drop cleanly
    assert!(session
        .start(&Nonce::from_bytes([0u8; 12]), Direction::Encrypt)
        .is_err());
    drop(session);
}
