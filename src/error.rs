//! # Errors
//!
//! Typed errors for `did:key` encoding, parsing, and key handling. Every
//! error reflects a caller-correctable input problem: nothing here is
//! transient, so nothing is retried. Signature mismatch is not an error at
//! all — verification returns `false`.

use thiserror::Error;

/// Crate `Result` type, defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by `did:key` operations.
///
/// Variants carry the offending input (or field name plus input) so callers
/// can report exactly what was rejected.
#[derive(Error, Debug)]
pub enum Error {
    /// A malformed identifier or multibase/multicodec string: wrong tag
    /// character, undecodable base58, wrong header bytes, or wrong decoded
    /// length.
    #[error("invalid format: {reason}")]
    InvalidFormat {
        /// What was wrong with the input.
        reason: String,

        /// The input that failed to parse.
        input: String,
    },

    /// Structurally valid JSON or JWK with a missing or mistyped required
    /// field, or a mismatch between a claimed identity and the one derived
    /// from the key material.
    #[error("invalid `{field}`: {reason}")]
    InvalidInput {
        /// The offending field.
        field: &'static str,

        /// What was wrong with the field.
        reason: String,

        /// The input containing the field.
        input: String,
    },

    /// Key bytes that do not match the fixed-length contract, rejected
    /// before any encoding is attempted.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// The length the contract requires.
        expected: usize,

        /// The length supplied.
        actual: usize,
    },

    /// An unexpected error from a lower-level library.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
