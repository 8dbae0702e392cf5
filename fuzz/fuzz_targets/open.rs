//! Fuzz target for tag verification
//!
//! Opens arbitrary ciphertext under arbitrary tags. Must never panic, and a
//! forged tag must never release plaintext.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use polyseal::{AeadError, AeadKey, Nonce, Tag, open, open_in_place, seal};

#[derive(Debug, Arbitrary)]
struct OpenInput {
    key: [u8; 32],
    nonce: [u8; 12],
    aad: Vec<u8>,
    data: Vec<u8>,
    tag: [u8; 16],
}

fuzz_target!(|input: OpenInput| {
    let key = AeadKey::new(input.key);
    let nonce = Nonce::from_bytes(input.nonce);
    let forged = Tag::from_bytes(input.tag);

    // Arbitrary ciphertext with an arbitrary tag
    if let Ok(plaintext) = open(&key, &nonce, &input.aad, &input.data, &forged) {
        // Only reachable if the fuzzer found the real tag
        let (ciphertext, tag) = seal(&key, &nonce, &input.aad, &plaintext).expect("seal");
        assert_eq!(ciphertext, input.data);
        assert!(tag.verify(&forged));
    }

    // Genuine seal always opens; a mismatched tag wipes the buffer
    let (ciphertext, tag) = seal(&key, &nonce, &input.aad, &input.data).expect("seal");
    assert_eq!(
        open(&key, &nonce, &input.aad, &ciphertext, &tag).expect("open"),
        input.data
    );

    let mut buffer = ciphertext;
    match open_in_place(&key, &nonce, &input.aad, &mut buffer, &forged) {
        Ok(()) => assert_eq!(buffer, input.data),
        Err(AeadError::AuthenticationFailed) => assert!(buffer.iter().all(|&b| b == 0)),
        Err(other) => panic!("unexpected error: {other}"),
    }
});
