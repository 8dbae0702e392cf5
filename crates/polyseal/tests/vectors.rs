//! Known-answer tests for the AEAD construction.
//!
//! This module contains test vectors from:
//! - RFC 7539 Section 2.8.2 (AEAD encryption)
//! - RFC 7539 Section 2.6.2 (Poly1305 key generation)
//! - Cross-checks against the RustCrypto `chacha20poly1305` crate

use chacha20poly1305::ChaCha20Poly1305;
use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use polyseal::{
    AeadKey, BLOCK_SIZE, ChaCha20Engine, ChaCha20Poly1305Session, Direction, Nonce,
    StreamCipherEngine, Tag, crypt_and_mac, open, seal,
};

// Helper function to decode hex strings
fn decode_hex(hex: &str) -> Vec<u8> {
    hex::decode(hex).expect("valid hex")
}

// ============================================================================
// RFC 7539 Section 2.8.2
// ============================================================================

const SUNSCREEN: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you only one tip for the future, sunscreen would be it.";

const SUNSCREEN_CIPHERTEXT: &str = concat!(
    "d31a8d34648e60db7b86afbc53ef7ec2",
    "a4aded51296e08fea9e2b5a736ee62d6",
    "3dbea45e8ca9671282fafb69da92728b",
    "1a71de0a9e060b2905d6a5b67ecd3b36",
    "92ddbd7f2d778b8c9803aee328091b58",
    "fab324e4fad675945585808b4831d7bc",
    "3ff4def08e4b7a9de576d26586cec64b",
    "6116",
);

const SUNSCREEN_TAG: &str = "1ae10b594f09e26a7e902ecbd0600691";

fn rfc_key() -> AeadKey {
    let mut bytes = [0u8; 32];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = 0x80 + i as u8;
    }
    AeadKey::new(bytes)
}

fn rfc_nonce() -> Nonce {
    Nonce::from_bytes([
        0x07, 0x00, 0x00, 0x00, 0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47,
    ])
}

fn rfc_aad() -> Vec<u8> {
    decode_hex("50515253c0c1c2c3c4c5c6c7")
}

#[test]
fn test_rfc7539_aead_encrypt() {
    assert_eq!(SUNSCREEN.len(), 114);

    let mut ciphertext = vec![0u8; SUNSCREEN.len()];
    let tag = crypt_and_mac(
        &rfc_key(),
        &rfc_nonce(),
        Direction::Encrypt,
        &rfc_aad(),
        SUNSCREEN,
        &mut ciphertext,
    )
    .expect("encryption should succeed");

    assert_eq!(&ciphertext[..8], &[0xd3, 0x1a, 0x8d, 0x34, 0x64, 0x8e, 0x60, 0xdb]);
    assert_eq!(hex::encode(&ciphertext), SUNSCREEN_CIPHERTEXT);
    assert_eq!(hex::encode(tag.as_bytes()), SUNSCREEN_TAG);
}

#[test]
fn test_rfc7539_aead_decrypt() {
    let ciphertext = decode_hex(SUNSCREEN_CIPHERTEXT);

    let mut plaintext = vec![0u8; ciphertext.len()];
    let tag = crypt_and_mac(
        &rfc_key(),
        &rfc_nonce(),
        Direction::Decrypt,
        &rfc_aad(),
        &ciphertext,
        &mut plaintext,
    )
    .expect("decryption should succeed");

    assert_eq!(plaintext, SUNSCREEN);
    assert_eq!(hex::encode(tag.as_bytes()), SUNSCREEN_TAG);
}

#[test]
fn test_rfc7539_open_with_expected_tag() {
    let expected = Tag::from_slice(&decode_hex(SUNSCREEN_TAG)).unwrap();
    let ciphertext = decode_hex(SUNSCREEN_CIPHERTEXT);

    let plaintext = open(&rfc_key(), &rfc_nonce(), &rfc_aad(), &ciphertext, &expected).unwrap();
    assert_eq!(plaintext, SUNSCREEN);
}

#[test]
fn test_rfc7539_streaming_byte_at_a_time() {
    let aad = rfc_aad();
    let mut session = ChaCha20Poly1305Session::new();
    session.set_key(&rfc_key()).unwrap();
    session.start(&rfc_nonce(), Direction::Encrypt).unwrap();

    for byte in aad.chunks(1) {
        session.absorb_aad(byte).unwrap();
    }

    let mut ciphertext = vec![0u8; SUNSCREEN.len()];
    for (input, output) in SUNSCREEN.chunks(1).zip(ciphertext.chunks_mut(1)) {
        session.process(input, output).unwrap();
    }
    let tag = session.finish().unwrap();

    assert_eq!(hex::encode(&ciphertext), SUNSCREEN_CIPHERTEXT);
    assert_eq!(hex::encode(tag.as_bytes()), SUNSCREEN_TAG);
    assert_eq!(session.aad_len(), 12);
    assert_eq!(session.ciphertext_len(), 114);
}

// ============================================================================
// RFC 7539 Section 2.6.2 (Poly1305 key generation)
// ============================================================================

#[test]
fn test_rfc7539_poly1305_key_generation() {
    let mut engine = ChaCha20Engine::new();
    engine.set_key(rfc_key().as_bytes()).unwrap();
    engine
        .start(&[0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7], 1)
        .unwrap();

    let mut block = [0u8; BLOCK_SIZE];
    engine.keystream_block(0, &mut block).unwrap();

    assert_eq!(
        hex::encode(&block[..32]),
        "8ad5a08b905f81cc815040274ab29471a833b637e3fd0da508dbb8e2fdd1a646"
    );
}

// ============================================================================
// Cross-checks against the chacha20poly1305 crate
// ============================================================================

fn reference_seal(key: &[u8; 32], nonce: &[u8; 12], aad: &[u8], plaintext: &[u8]) -> (Vec<u8>, [u8; 16]) {
    let cipher = ChaCha20Poly1305::new(key.into());
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(nonce.into(), aad, &mut buffer)
        .expect("reference encryption");

    let mut tag_bytes = [0u8; 16];
    tag_bytes.copy_from_slice(&tag);
    (buffer, tag_bytes)
}

#[test]
fn test_matches_reference_across_lengths() {
    let key = [0x5cu8; 32];
    let nonce = [0x0bu8; 12];

    for aad_len in [0usize, 1, 15, 16, 17, 31] {
        for text_len in [0usize, 1, 15, 16, 17, 63, 64, 65, 200] {
            let aad: Vec<u8> = (0..aad_len).map(|i| i as u8).collect();
            let plaintext: Vec<u8> = (0..text_len).map(|i| (i * 3) as u8).collect();

            let (expected_ct, expected_tag) = reference_seal(&key, &nonce, &aad, &plaintext);
            let (ciphertext, tag) = seal(
                &AeadKey::new(key),
                &Nonce::from_bytes(nonce),
                &aad,
                &plaintext,
            )
            .unwrap();

            assert_eq!(ciphertext, expected_ct, "aad={aad_len} text={text_len}");
            assert_eq!(tag.as_bytes(), &expected_tag, "aad={aad_len} text={text_len}");
        }
    }
}

#[test]
fn test_empty_message_and_aad() {
    let key = [0x01u8; 32];
    let nonce = [0x02u8; 12];

    let (_, expected_tag) = reference_seal(&key, &nonce, b"", b"");

    let mut session = ChaCha20Poly1305Session::new();
    session.set_key(&AeadKey::new(key)).unwrap();
    session.start(&Nonce::from_bytes(nonce), Direction::Encrypt).unwrap();
    let tag = session.finish().unwrap();

    assert_eq!(tag.as_bytes(), &expected_tag);

    // Deterministic across sessions
    session.start(&Nonce::from_bytes(nonce), Direction::Decrypt).unwrap();
    let again = session.finish().unwrap();
    assert!(tag.verify(&again));
}
