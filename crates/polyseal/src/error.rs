//! AEAD error types.

use crate::aead::Phase;
use thiserror::Error;

/// Errors returned by the AEAD session and the one-shot helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AeadError {
    /// A required argument was malformed (wrong length, mismatched buffers).
    #[error("bad input: {0}")]
    BadInput(&'static str),

    /// An operation was called out of order.
    #[error("{operation} not allowed in phase {phase:?}")]
    BadState {
        /// Operation that was rejected
        operation: &'static str,
        /// Phase the session was in
        phase: Phase,
    },

    /// The stream cipher engine failed
    #[error("stream cipher failure: {0}")]
    Cipher(#[source] PrimitiveError),

    /// The one-time authenticator failed
    #[error("authenticator failure: {0}")]
    Authenticator(#[source] PrimitiveError),

    /// Tag verification failed in [`open`](crate::open)
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Failures reported by a [`StreamCipherEngine`](crate::StreamCipherEngine) or
/// [`OneTimeAuthenticator`](crate::OneTimeAuthenticator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Operation needs a key that was never set (or was released)
    #[error("key not set")]
    KeyNotSet,

    /// Operation needs a started cipher stream
    #[error("stream not started")]
    NotStarted,

    /// The 32-bit block counter would wrap
    #[error("keystream exhausted")]
    KeystreamExhausted,

    /// Input and output buffers differ in length
    #[error("input and output lengths differ")]
    LengthMismatch,
}
