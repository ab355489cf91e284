//! # Key Material
//!
//! Ed25519 key pairs underpinning `did:key` identities. The public key is
//! always derived from the private seed, never supplied independently:
//! import paths that carry both halves cross-check them and reject
//! mismatches.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use crate::error::Error;
use crate::jwk::Jwk;
use crate::multikey;

/// An Ed25519 key pair plus the multibase forms `did:key` serializes it to.
///
/// Immutable once constructed and safe to share across threads.
#[derive(Clone, Debug)]
pub struct KeyMaterial {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyMaterial {
    /// Generate key material from a fresh cryptographically secure random
    /// seed.
    #[must_use]
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self {
            verifying_key: signing_key.verifying_key(),
            signing_key,
        }
    }

    /// Derive key material from a 32-byte seed. Deterministic: the same
    /// seed always yields the same key pair.
    #[must_use]
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self {
            verifying_key: signing_key.verifying_key(),
            signing_key,
        }
    }

    /// Reconstruct key material from its multibase-encoded public and
    /// private forms.
    ///
    /// # Errors
    ///
    /// Returns an error if either string fails to decode, or if the public
    /// key derived from the private seed does not match the public key
    /// embedded in either string.
    pub fn from_multibase(
        public_key_multibase: &str, private_key_multibase: &str,
    ) -> crate::Result<Self> {
        let public_key = multikey::decode_public_key(public_key_multibase)?;
        let keypair = multikey::decode_private_key(private_key_multibase)?;

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&keypair[..32]);
        let key = Self::from_seed(&seed);

        let derived = key.public_key_bytes();
        if derived != public_key || derived != keypair[32..] {
            return Err(Error::InvalidInput {
                field: "publicKeyMultibase",
                reason: "public key does not match the private key".to_string(),
                input: public_key_multibase.to_string(),
            });
        }
        Ok(key)
    }

    /// Extract key material from an Ed25519 JWK carrying a `d` field.
    ///
    /// # Errors
    ///
    /// Returns an error if `d` is missing or malformed, or if an `x` field
    /// is present but does not match the public key derived from `d`.
    pub fn from_jwk(jwk: &Jwk) -> crate::Result<Self> {
        let keypair = jwk.keypair_bytes()?;
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&keypair[..32]);
        let key = Self::from_seed(&seed);

        if key.public_key_bytes() != keypair[32..] {
            return Err(Error::InvalidInput {
                field: "d",
                reason: "embedded public key does not match the seed".to_string(),
                input: serde_json::to_string(jwk).unwrap_or_default(),
            });
        }
        if jwk.x.is_some() && jwk.public_key_bytes()? != key.public_key_bytes() {
            return Err(Error::InvalidInput {
                field: "x",
                reason: "public key does not match the private key".to_string(),
                input: serde_json::to_string(jwk).unwrap_or_default(),
            });
        }
        Ok(key)
    }

    /// The verifying (public) key.
    #[must_use]
    pub const fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// The signing (private) key.
    #[must_use]
    pub(crate) const fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Raw 32-byte public key.
    #[must_use]
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// The 64-byte keypair: seed ‖ public key.
    #[must_use]
    pub fn to_keypair_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }

    /// The `publicKeyMultibase` form of the public key.
    #[must_use]
    pub fn public_key_multibase(&self) -> String {
        multikey::encode_multibase(&multikey::encode_multicodec(
            multikey::ED25519_CODEC,
            &self.public_key_bytes(),
        ))
    }

    /// The `privateKeyMultibase` form of the key pair.
    #[must_use]
    pub fn private_key_multibase(&self) -> String {
        multikey::encode_multibase(&multikey::encode_multicodec(
            multikey::ED25519_PRIV_CODEC,
            &self.to_keypair_bytes(),
        ))
    }
}

#[cfg(test)]
mod test {
    use base64ct::{Base64UrlUnpadded, Encoding};

    use super::*;

    const PUBLIC_MULTIBASE: &str = "z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp";
    const PRIVATE_MULTIBASE: &str = "zruzdu1ot9nb4GJvVvUbeYynyRzDgp6tvyXbMYGBrMU3EZsZieAoXxGGrJBSiD5hFLFRVLYEXLUfcvuAxpu89W3tdLL";

    #[test]
    fn zero_seed_vectors() {
        let key = KeyMaterial::from_seed(&[0u8; 32]);
        assert_eq!(key.public_key_multibase(), PUBLIC_MULTIBASE);
        assert_eq!(key.private_key_multibase(), PRIVATE_MULTIBASE);
    }

    #[test]
    fn multibase_round_trip() {
        let key = KeyMaterial::generate();
        let restored =
            KeyMaterial::from_multibase(&key.public_key_multibase(), &key.private_key_multibase())
                .expect("should reconstruct");
        assert_eq!(restored.public_key_bytes(), key.public_key_bytes());
        assert_eq!(restored.to_keypair_bytes(), key.to_keypair_bytes());
    }

    #[test]
    fn mismatched_public_key_rejected() {
        let key = KeyMaterial::from_seed(&[0u8; 32]);
        let other = KeyMaterial::from_seed(&[1u8; 32]);
        let err =
            KeyMaterial::from_multibase(&other.public_key_multibase(), &key.private_key_multibase())
                .expect_err("mismatch should be rejected");
        let crate::Error::InvalidInput { field, .. } = err else {
            panic!("expected InvalidInput, got {err}");
        };
        assert_eq!(field, "publicKeyMultibase");
    }

    #[test]
    fn from_jwk_seed_only() {
        let jwk = Jwk {
            kty: "OKP".to_string(),
            crv: "Ed25519".to_string(),
            x: None,
            d: Some(Base64UrlUnpadded::encode_string(&[0u8; 32])),
        };
        let key = KeyMaterial::from_jwk(&jwk).expect("should extract");
        assert_eq!(key.public_key_multibase(), PUBLIC_MULTIBASE);
    }

    #[test]
    fn from_jwk_rejects_foreign_x() {
        let other = KeyMaterial::from_seed(&[1u8; 32]);
        let jwk = Jwk {
            kty: "OKP".to_string(),
            crv: "Ed25519".to_string(),
            x: Some(Base64UrlUnpadded::encode_string(&other.public_key_bytes())),
            d: Some(Base64UrlUnpadded::encode_string(&[0u8; 32])),
        };
        KeyMaterial::from_jwk(&jwk).expect_err("mismatched x should be rejected");
    }
}
