//! Poly1305 input framing: zero padding and the length trailer.

use crate::POLY1305_BLOCK_SIZE;

const ZEROES: [u8; POLY1305_BLOCK_SIZE - 1] = [0u8; POLY1305_BLOCK_SIZE - 1];

/// Number of zero bytes that bring a stream of `len` bytes to a 16-byte boundary.
pub(crate) fn pad_len(len: u64) -> usize {
    let partial = (len % POLY1305_BLOCK_SIZE as u64) as usize;
    if partial == 0 {
        0
    } else {
        POLY1305_BLOCK_SIZE - partial
    }
}

/// Zero padding for a stream of `len` bytes (empty on a boundary).
pub(crate) fn zero_padding(len: u64) -> &'static [u8] {
    &ZEROES[..pad_len(len)]
}

/// Final Poly1305 block: both lengths as 64-bit little-endian integers.
pub(crate) fn length_block(aad_len: u64, ciphertext_len: u64) -> [u8; POLY1305_BLOCK_SIZE] {
    let mut block = [0u8; POLY1305_BLOCK_SIZE];
    block[..8].copy_from_slice(&aad_len.to_le_bytes());
    block[8..].copy_from_slice(&ciphertext_len.to_le_bytes());
    block
}
