//! # JSON Web Key Exchange
//!
//! The only key-exchange format supported besides the native JSON export
//! form is a JWK exposing base64url-encoded key bytes: `x` for the public
//! key and `d` for the private key.
//!
//! See <https://www.rfc-editor.org/rfc/rfc8037> for Ed25519 JWKs.

use base64ct::{Base64UrlUnpadded, Encoding};
use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::multikey;

/// An Ed25519 JSON Web Key.
///
/// Only the fields needed for key-material extraction are modelled. A
/// public-only key omits `d`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Jwk {
    /// Key type. `OKP` (octet key pair) for Ed25519.
    pub kty: String,

    /// Cryptographic curve. `Ed25519` for this crate.
    pub crv: String,

    /// The public key, base64url-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// The private key, base64url-encoded. Either the 32-byte seed (per
    /// RFC 8037) or the 64-byte seed ‖ public-key concatenation some suites
    /// export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

impl Jwk {
    /// Convert the JWK's public key to `publicKeyMultibase` form.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is missing, does not decode as base64url, or
    /// does not decode to 32 bytes.
    pub fn to_public_key_multibase(&self) -> crate::Result<String> {
        let public_key = self.public_key_bytes()?;
        multikey::encode_public_key(&public_key)
    }

    /// Convert the JWK's private key to `privateKeyMultibase` form.
    ///
    /// A 32-byte `d` is expanded to the 64-byte seed ‖ public-key layout
    /// before tagging, so both JWK flavours produce the same multibase
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if `d` is missing, does not decode as base64url, or
    /// decodes to neither 32 nor 64 bytes.
    pub fn to_private_key_multibase(&self) -> crate::Result<String> {
        multikey::encode_private_key(&self.keypair_bytes()?)
    }

    /// Decode `x` to raw public-key bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is missing, not base64url, or not 32 bytes.
    pub fn public_key_bytes(&self) -> crate::Result<[u8; 32]> {
        let Some(x) = &self.x else {
            return Err(Error::InvalidInput {
                field: "x",
                reason: "jwk must have a base64url `x` string".to_string(),
                input: self.to_string_lossy(),
            });
        };
        let key_bytes = Base64UrlUnpadded::decode_vec(x).map_err(|e| Error::InvalidFormat {
            reason: format!("issue decoding `x`: {e}"),
            input: x.clone(),
        })?;
        key_bytes.try_into().map_err(|bytes: Vec<u8>| Error::InvalidKeyLength {
            expected: multikey::PUBLIC_KEY_LENGTH,
            actual: bytes.len(),
        })
    }

    /// Decode `d` to raw keypair bytes (seed ‖ public key), deriving the
    /// public half when `d` carries only the seed.
    ///
    /// # Errors
    ///
    /// Returns an error if `d` is missing, not base64url, or decodes to
    /// neither 32 nor 64 bytes.
    pub fn keypair_bytes(&self) -> crate::Result<[u8; 64]> {
        let Some(d) = &self.d else {
            return Err(Error::InvalidInput {
                field: "d",
                reason: "jwk must have a base64url `d` string".to_string(),
                input: self.to_string_lossy(),
            });
        };
        let key_bytes = Base64UrlUnpadded::decode_vec(d).map_err(|e| Error::InvalidFormat {
            reason: format!("issue decoding `d`: {e}"),
            input: d.clone(),
        })?;

        if let Ok(keypair) = <[u8; 64]>::try_from(key_bytes.as_slice()) {
            return Ok(keypair);
        }
        let seed: [u8; 32] =
            key_bytes.as_slice().try_into().map_err(|_| Error::InvalidKeyLength {
                expected: multikey::KEYPAIR_LENGTH,
                actual: key_bytes.len(),
            })?;
        Ok(SigningKey::from_bytes(&seed).to_keypair_bytes())
    }

    fn to_string_lossy(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PUBLIC_MULTIBASE: &str = "z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp";
    const PRIVATE_MULTIBASE: &str = "zruzdu1ot9nb4GJvVvUbeYynyRzDgp6tvyXbMYGBrMU3EZsZieAoXxGGrJBSiD5hFLFRVLYEXLUfcvuAxpu89W3tdLL";

    fn zero_seed_jwk() -> Jwk {
        let signing_key = SigningKey::from_bytes(&[0u8; 32]);
        Jwk {
            kty: "OKP".to_string(),
            crv: "Ed25519".to_string(),
            x: Some(Base64UrlUnpadded::encode_string(
                signing_key.verifying_key().as_bytes(),
            )),
            d: Some(Base64UrlUnpadded::encode_string(&[0u8; 32])),
        }
    }

    #[test]
    fn jwk_to_public_key_multibase() {
        let multibase = zero_seed_jwk().to_public_key_multibase().expect("should encode");
        assert_eq!(multibase, PUBLIC_MULTIBASE);
    }

    #[test]
    fn jwk_to_private_key_multibase() {
        let multibase = zero_seed_jwk().to_private_key_multibase().expect("should encode");
        assert_eq!(multibase, PRIVATE_MULTIBASE);
    }

    #[test]
    fn jwk_with_64_byte_d_matches_seed_form() {
        let keypair = SigningKey::from_bytes(&[0u8; 32]).to_keypair_bytes();
        let jwk = Jwk {
            d: Some(Base64UrlUnpadded::encode_string(&keypair)),
            ..zero_seed_jwk()
        };
        assert_eq!(
            jwk.to_private_key_multibase().expect("should encode"),
            PRIVATE_MULTIBASE
        );
    }

    #[test]
    fn missing_fields_are_named() {
        let jwk = Jwk {
            kty: "OKP".to_string(),
            crv: "Ed25519".to_string(),
            x: None,
            d: None,
        };
        let err = jwk.to_public_key_multibase().expect_err("missing x");
        let crate::Error::InvalidInput { field, .. } = err else {
            panic!("expected InvalidInput, got {err}");
        };
        assert_eq!(field, "x");

        let err = jwk.to_private_key_multibase().expect_err("missing d");
        let crate::Error::InvalidInput { field, .. } = err else {
            panic!("expected InvalidInput, got {err}");
        };
        assert_eq!(field, "d");
    }

    #[test]
    fn undecodable_base64url_rejected() {
        let jwk = Jwk {
            x: Some("not base64url!".to_string()),
            ..zero_seed_jwk()
        };
        jwk.to_public_key_multibase().expect_err("should reject bad base64url");
    }
}
