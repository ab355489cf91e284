//! # Ed25519 Verifier
//!
//! Signature verification keyed by a `did:key` verification-method id. The
//! public key is embedded in the identifier itself, so constructing a
//! verifier requires no lookup beyond parsing the id.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::did;
use crate::error::Error;

/// An immutable Ed25519 verifier: a public key plus the controller DID it
/// was recovered from.
#[derive(Clone, Debug)]
pub struct Ed25519Verifier {
    verifying_key: VerifyingKey,
    controller: String,
    verification_method_id: String,
}

impl Ed25519Verifier {
    /// Construct a verifier for a `did:key` verification-method id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not a `did:key` verification-method
    /// id, or if the embedded key does not decode to a valid Ed25519 public
    /// key.
    pub fn for_verification_method_id(id: &str) -> crate::Result<Self> {
        if !did::is_verification_method_id(id) {
            return Err(Error::InvalidInput {
                field: "verificationMethodId",
                reason: "not a did:key verification-method id".to_string(),
                input: id.to_string(),
            });
        }
        let parsed = did::parse_verification_method_id(id)?;
        let verifying_key =
            VerifyingKey::from_bytes(&parsed.public_key).map_err(|e| Error::InvalidFormat {
                reason: format!("embedded key is not a valid Ed25519 public key: {e}"),
                input: id.to_string(),
            })?;
        Ok(Self {
            verifying_key,
            controller: parsed.controller,
            verification_method_id: id.to_string(),
        })
    }

    /// Whether `signature` is a valid Ed25519 signature of `data` under the
    /// held public key.
    ///
    /// Never fails: a mismatched signature and malformed signature bytes
    /// are both `false`, since a caller must treat both as "not authentic".
    #[must_use]
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        self.verifying_key.verify(data, &signature).is_ok()
    }

    /// The controller DID recovered from the verification-method id.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// The verification-method id this verifier was built from.
    #[must_use]
    pub fn verification_method_id(&self) -> &str {
        &self.verification_method_id
    }

    /// Raw 32-byte public key.
    #[must_use]
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }
}
