//! # DID Key
//!
//! Self-certifying cryptographic identities based on the `did:key` method:
//! a public key is deterministically encoded into an identifier that is, by
//! construction, also its own proof of key ownership.
//!
//! The crate covers three tightly coupled concerns:
//!
//! - multicodec + multibase encoding of typed key material into a
//!   self-describing, URL-safe text form;
//! - derivation of a `did:key` DID and its single verification-method id
//!   from an Ed25519 public key, and the reverse parse;
//! - Ed25519 signing and verification keyed by those identifiers, with a
//!   lossless JSON export/import form for key pairs.
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-key>
//! - <https://www.w3.org/TR/did-core>

mod did;
mod error;
mod jwk;
mod key;
mod multikey;
mod signer;
mod verifier;

pub use self::did::{
    DidKey, ParsedVerificationMethod, controller_of, is_did_key, is_did_web,
    is_verification_method_id, parse_verification_method_id,
};
pub use self::error::{Error, Result};
pub use self::jwk::Jwk;
pub use self::key::KeyMaterial;
pub use self::multikey::{
    ED25519_CODEC, ED25519_PRIV_CODEC, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, decode_multibase,
    decode_multicodec, decode_private_key, decode_public_key, encode_multibase, encode_multicodec,
    encode_private_key, encode_public_key,
};
pub use self::signer::{Ed25519Signer, ExportedKeyPair, KEY_TYPE};
pub use self::verifier::Ed25519Verifier;
