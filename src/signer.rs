//! # Ed25519 Signer
//!
//! A signing key pair bound to the `did:key` identity derived from its
//! public key, with a canonical JSON export form
//! (`Ed25519VerificationKey2020`) that re-imports losslessly.
//!
//! See <https://www.w3.org/community/reports/credentials/CG-FINAL-di-eddsa-2020-20220724/>

use std::fmt::{self, Display, Formatter};

use anyhow::anyhow;
use ed25519_dalek::Signer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::did::DidKey;
use crate::error::Error;
use crate::key::KeyMaterial;

/// The verification-method type of the export form.
pub const KEY_TYPE: &str = "Ed25519VerificationKey2020";

/// An immutable Ed25519 signing key pair and its `did:key` identifiers.
///
/// Construction always runs derive key pair → derive identifiers, so the
/// identifiers are a pure function of the held public key.
#[derive(Clone, Debug)]
pub struct Ed25519Signer {
    key: KeyMaterial,
    did: String,
    verification_method_id: String,
}

/// The canonical persisted form of an [`Ed25519Signer`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedKeyPair {
    /// Verification-method type. Always `Ed25519VerificationKey2020`.
    #[serde(rename = "type")]
    pub type_: String,

    /// The verification-method id.
    pub id: String,

    /// The controller DID.
    pub controller: String,

    /// The public key in multibase form.
    pub public_key_multibase: String,

    /// The key pair (seed ‖ public key) in multibase form.
    pub private_key_multibase: String,
}

impl Ed25519Signer {
    /// Generate a signer from a fresh random seed.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_key_material(KeyMaterial::generate())
    }

    /// Derive a signer from a 32-byte seed. Deterministic.
    #[must_use]
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_key_material(KeyMaterial::from_seed(seed))
    }

    /// Construct a signer from already-validated key material, for example
    /// after resolving a DID document. No validation beyond what the
    /// generate and import paths perform.
    #[must_use]
    pub fn from_key_material(key: KeyMaterial) -> Self {
        let DidKey {
            did,
            verification_method_id,
        } = DidKey::from_verifying_key(key.verifying_key());
        Self {
            key,
            did,
            verification_method_id,
        }
    }

    /// Reconstruct a signer from its exported JSON form.
    ///
    /// Required string fields: `controller`, `publicKeyMultibase`,
    /// `privateKeyMultibase`. The `type` field is informational and not
    /// re-validated. The controller is cross-checked against the identity
    /// derived from the imported public key, so a tampered or mismatched
    /// export is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse, a required field is
    /// missing or not a string, either multibase field fails to decode, the
    /// public and private keys disagree, or the claimed controller does not
    /// match the derived DID.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let object: Value = serde_json::from_str(json)
            .map_err(|e| Error::Other(anyhow!("failed to deserialize key pair: {e}")))?;

        let controller = require_str(&object, "controller", json)?;
        let public_key_multibase = require_str(&object, "publicKeyMultibase", json)?;
        let private_key_multibase = require_str(&object, "privateKeyMultibase", json)?;

        let key = KeyMaterial::from_multibase(public_key_multibase, private_key_multibase)?;
        let signer = Self::from_key_material(key);
        if signer.did != controller {
            return Err(Error::InvalidInput {
                field: "controller",
                reason: format!("expected `{}`, got `{controller}`", signer.did),
                input: json.to_string(),
            });
        }
        Ok(signer)
    }

    /// The controller DID.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.did
    }

    /// The verification-method id: `{controller}#{publicKeyMultibase}`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.verification_method_id
    }

    /// The public key in multibase form.
    #[must_use]
    pub fn public_key_multibase(&self) -> String {
        self.key.public_key_multibase()
    }

    /// The held key material.
    #[must_use]
    pub const fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    /// Sign a payload, returning the 64-byte Ed25519 signature.
    ///
    /// Ed25519 signing is deterministic: the same key and payload always
    /// produce the same signature.
    #[must_use]
    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        self.key.signing_key().sign(data).to_bytes().to_vec()
    }

    /// The canonical export form, including private key material.
    #[must_use]
    pub fn export(&self) -> ExportedKeyPair {
        ExportedKeyPair {
            type_: KEY_TYPE.to_string(),
            id: self.verification_method_id.clone(),
            controller: self.did.clone(),
            public_key_multibase: self.key.public_key_multibase(),
            private_key_multibase: self.key.private_key_multibase(),
        }
    }

    /// Serialize the export form to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(&self.export())
            .map_err(|e| Error::Other(anyhow!("failed to serialize key pair: {e}")))
    }
}

/// Signers are equal iff their public keys are byte-identical.
impl PartialEq for Ed25519Signer {
    fn eq(&self, other: &Self) -> bool {
        self.key.public_key_bytes() == other.key.public_key_bytes()
    }
}

impl Eq for Ed25519Signer {}

/// Prints only public material.
impl Display for Ed25519Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{KEY_TYPE}: {}>", self.key.public_key_multibase())
    }
}

fn require_str<'a>(object: &'a Value, field: &'static str, input: &str) -> crate::Result<&'a str> {
    object.get(field).and_then(Value::as_str).ok_or_else(|| Error::InvalidInput {
        field,
        reason: "must be a string".to_string(),
        input: input.to_string(),
    })
}
