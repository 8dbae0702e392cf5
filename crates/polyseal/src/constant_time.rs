//! Tag comparison without content-dependent timing.
//!
//! Running time depends only on the tag size, never on where a received tag
//! first differs from the computed one.

use crate::TAG_SIZE;
use subtle::ConstantTimeEq;

/// Compare two Poly1305 tags.
///
/// Every byte of both tags is inspected regardless of where they differ.
///
/// ```
/// use polyseal::constant_time::tags_match;
///
/// let received = [0x1a; 16];
/// let computed = [0x1a; 16];
/// assert!(tags_match(&received, &computed));
/// ```
#[must_use]
#[inline(never)]
pub fn tags_match(received: &[u8; TAG_SIZE], computed: &[u8; TAG_SIZE]) -> bool {
    received[..].ct_eq(&computed[..]).into()
}
