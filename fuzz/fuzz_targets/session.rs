//! Fuzz target for the streaming AEAD session
//!
//! Drives a session with an arbitrary sequence of calls. Calls must never
//! panic, and any message that completes must match the one-shot result.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use polyseal::{AeadKey, ChaCha20Poly1305Session, Direction, Nonce, Phase, crypt_and_mac};

#[derive(Debug, Arbitrary)]
enum Op {
    Start { nonce: [u8; 12], decrypt: bool },
    Aad(Vec<u8>),
    Process(Vec<u8>),
    ProcessInPlace(Vec<u8>),
    ProcessMismatched { input: Vec<u8>, extra: u8 },
    Finish,
    Release,
    Rekey([u8; 32]),
}

#[derive(Debug, Arbitrary)]
struct SessionInput {
    key: [u8; 32],
    ops: Vec<Op>,
}

/// Everything fed into the current message, for the one-shot cross-check.
struct Transcript {
    key: [u8; 32],
    nonce: [u8; 12],
    direction: Direction,
    aad: Vec<u8>,
    input: Vec<u8>,
    output: Vec<u8>,
}

fuzz_target!(|input: SessionInput| {
    let mut key = input.key;
    let mut session = ChaCha20Poly1305Session::new();
    let _ = session.set_key(&AeadKey::new(key));
    let mut keyed = true;
    let mut transcript: Option<Transcript> = None;

    for op in input.ops {
        match op {
            Op::Start { nonce, decrypt } => {
                let direction = if decrypt { Direction::Decrypt } else { Direction::Encrypt };
                let ok = session.start(&Nonce::from_bytes(nonce), direction).is_ok();
                assert_eq!(ok, keyed);
                transcript = ok.then(|| Transcript {
                    key,
                    nonce,
                    direction,
                    aad: Vec::new(),
                    input: Vec::new(),
                    output: Vec::new(),
                });
            }
            Op::Aad(aad) => {
                let allowed = session.phase() == Phase::AbsorbingAad;
                assert_eq!(session.absorb_aad(&aad).is_ok(), allowed);
                if let Some(t) = transcript.as_mut().filter(|_| allowed) {
                    t.aad.extend_from_slice(&aad);
                }
            }
            Op::Process(data) => {
                let allowed = matches!(session.phase(), Phase::AbsorbingAad | Phase::ProcessingText);
                let mut out = vec![0u8; data.len()];
                assert_eq!(session.process(&data, &mut out).is_ok(), allowed);
                if let Some(t) = transcript.as_mut().filter(|_| allowed) {
                    t.input.extend_from_slice(&data);
                    t.output.extend_from_slice(&out);
                }
            }
            Op::ProcessInPlace(data) => {
                let allowed = matches!(session.phase(), Phase::AbsorbingAad | Phase::ProcessingText);
                let mut buffer = data.clone();
                assert_eq!(session.process_in_place(&mut buffer).is_ok(), allowed);
                if let Some(t) = transcript.as_mut().filter(|_| allowed) {
                    t.input.extend_from_slice(&data);
                    t.output.extend_from_slice(&buffer);
                }
            }
            Op::ProcessMismatched { input, extra } => {
                let phase = session.phase();
                let mut out = vec![0u8; input.len() + usize::from(extra) + 1];
                assert!(session.process(&input, &mut out).is_err());
                assert_eq!(session.phase(), phase);
            }
            Op::Finish => {
                let result = session.finish();
                match transcript.take() {
                    Some(t) => {
                        let tag = result.expect("finish after start");
                        let mut expected_out = vec![0u8; t.input.len()];
                        let expected = crypt_and_mac(
                            &AeadKey::new(t.key),
                            &Nonce::from_bytes(t.nonce),
                            t.direction,
                            &t.aad,
                            &t.input,
                            &mut expected_out,
                        )
                        .expect("one-shot");
                        assert_eq!(expected_out, t.output);
                        assert!(tag.verify(&expected));
                    }
                    None => assert!(result.is_err()),
                }
            }
            Op::Release => {
                session.release();
                keyed = false;
                transcript = None;
            }
            Op::Rekey(new_key) => {
                // Rekeying drops the running keystream, so only between messages
                if transcript.is_none() {
                    key = new_key;
                    let _ = session.set_key(&AeadKey::new(key));
                    keyed = true;
                }
            }
        }
    }

    session.release();
});
