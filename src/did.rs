//! # DID Key Identifiers
//!
//! The `did:key` method encodes a public key directly into the DID, making
//! the identifier self-certifying: resolving it requires nothing but the
//! identifier itself. A `did:key` DID document contains exactly one
//! verification method, whose id is the DID with its own method-specific id
//! repeated as the fragment.
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-key>
//! - <https://www.w3.org/TR/did-core/#did-syntax>

use std::sync::LazyLock;

use ed25519_dalek::VerifyingKey;
use regex::Regex;

use crate::error::Error;
use crate::multikey;

static DID_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^did:key:(?<key>z[a-km-zA-HJ-NP-Z1-9]+)$").expect("should compile")
});
static DID_WEB_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^did:web:([^:#]+)").expect("should compile"));
static VERIFICATION_METHOD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^(?<did>did:key:(?<key>z[a-km-zA-HJ-NP-Z1-9]+))#(?<fragment>z[a-km-zA-HJ-NP-Z1-9]+)$")
        .expect("should compile")
});

/// Returns true if the string is a `did:key` DID.
#[must_use]
pub fn is_did_key(s: &str) -> bool {
    DID_KEY_REGEX.is_match(s)
}

/// Returns true if the string is a `did:web` DID.
#[must_use]
pub fn is_did_web(s: &str) -> bool {
    DID_WEB_REGEX.is_match(s)
}

/// Returns true if the string is a `did:key` verification-method id, i.e.
/// of the form `did:key:{multibase}#{multibase}`.
#[must_use]
pub fn is_verification_method_id(s: &str) -> bool {
    VERIFICATION_METHOD_REGEX.is_match(s)
}

/// A `did:key` DID together with the id of the single verification method
/// it resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidKey {
    /// The DID: `did:key:{publicKeyMultibase}`.
    pub did: String,

    /// The verification-method id: `{did}#{publicKeyMultibase}`. For
    /// `did:key` the fragment repeats the method-specific id.
    pub verification_method_id: String,
}

impl DidKey {
    /// Derive the `did:key` identifiers for a raw Ed25519 public key.
    ///
    /// Deterministic: the same key always yields the same identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the public key is not exactly 32 bytes.
    pub fn from_public_key(public_key: &[u8]) -> crate::Result<Self> {
        Ok(Self::from_multikey(multikey::encode_public_key(public_key)?))
    }

    /// Derive the `did:key` identifiers for a key already validated as an
    /// Ed25519 public key.
    #[must_use]
    pub fn from_verifying_key(verifying_key: &VerifyingKey) -> Self {
        Self::from_multikey(multikey::encode_multibase(&multikey::encode_multicodec(
            multikey::ED25519_CODEC,
            verifying_key.as_bytes(),
        )))
    }

    fn from_multikey(multikey: String) -> Self {
        let did = format!("did:key:{multikey}");
        Self {
            verification_method_id: format!("{did}#{multikey}"),
            did,
        }
    }
}

/// The outcome of parsing a `did:key` verification-method id: the
/// controller DID and the public key embedded in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedVerificationMethod {
    /// The controller DID (the verification-method id minus its fragment).
    pub controller: String,

    /// The raw Ed25519 public key decoded from the DID.
    pub public_key: [u8; 32],
}

/// Parse a `did:key` verification-method id into its controller DID and the
/// public key it embeds.
///
/// Only the DID half is decoded. The fragment must be well-formed but is
/// not required to equal the method-specific id, matching the leniency of
/// `did:key` resolvers in the wild.
///
/// # Errors
///
/// Returns an error if the id does not match
/// `did:key:{multibase}#{fragment}` syntax, or if the method-specific id
/// does not decode to a 32-byte Ed25519 public key.
pub fn parse_verification_method_id(id: &str) -> crate::Result<ParsedVerificationMethod> {
    let Some(caps) = VERIFICATION_METHOD_REGEX.captures(id) else {
        return Err(Error::InvalidFormat {
            reason: "not a did:key verification-method id".to_string(),
            input: id.to_string(),
        });
    };
    let public_key = multikey::decode_public_key(&caps["key"])?;
    Ok(ParsedVerificationMethod {
        controller: caps["did"].to_string(),
        public_key,
    })
}

/// Get the controller DID of a `did:key` verification-method id.
///
/// For `did:key` the controller is simply the prefix of the
/// verification-method id, but an id from an untrusted source must not be
/// trusted as a controller without checking that prefix really is a
/// well-formed `did:key` DID.
///
/// # Errors
///
/// Returns an error if the portion before the fragment is not a `did:key`
/// DID.
pub fn controller_of(verification_method_id: &str) -> crate::Result<String> {
    let did = verification_method_id.split('#').next().unwrap_or_default();
    if !is_did_key(did) {
        return Err(Error::InvalidFormat {
            reason: "verification-method id is not controlled by a did:key".to_string(),
            input: verification_method_id.to_string(),
        });
    }
    Ok(did.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    const DID: &str = "did:key:z6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp";

    #[test]
    fn did_key_guard() {
        assert!(is_did_key(DID));
        assert!(!is_did_key("did:web:example.com"));
        assert!(!is_did_key(&format!("{DID}#fragment")));
        assert!(!is_did_key("did:key:"));
        assert!(!is_did_key("not a did"));
    }

    #[test]
    fn did_web_guard() {
        assert!(is_did_web("did:web:example.com"));
        assert!(!is_did_web(DID));
    }

    #[test]
    fn verification_method_guard() {
        let multikey = &DID[8..];
        assert!(is_verification_method_id(&format!("{DID}#{multikey}")));
        assert!(!is_verification_method_id(DID));
        assert!(!is_verification_method_id("did:web:example.com#key1"));
    }

    #[test]
    fn identifiers_from_public_key() {
        // all-zero seed public key
        let multikey = &DID[8..];
        let public_key = crate::multikey::decode_public_key(multikey).expect("should decode");
        let did_key = DidKey::from_public_key(&public_key).expect("should derive");
        assert_eq!(did_key.did, DID);
        assert_eq!(did_key.verification_method_id, format!("{DID}#{multikey}"));
    }

    #[test]
    fn public_key_length_rejected() {
        DidKey::from_public_key(&[0u8; 33]).expect_err("33 bytes should be rejected");
    }

    #[test]
    fn parse_round_trip() {
        let multikey = &DID[8..];
        let public_key = crate::multikey::decode_public_key(multikey).expect("should decode");
        let did_key = DidKey::from_public_key(&public_key).expect("should derive");

        let parsed = parse_verification_method_id(&did_key.verification_method_id)
            .expect("should parse");
        assert_eq!(parsed.controller, DID);
        assert_eq!(parsed.public_key, public_key);
    }

    #[test]
    fn parse_rejects_bare_did() {
        parse_verification_method_id(DID).expect_err("missing fragment should be rejected");
    }

    #[test]
    fn controller_requires_did_key() {
        let multikey = &DID[8..];
        let controller =
            controller_of(&format!("{DID}#{multikey}")).expect("should get controller");
        assert_eq!(controller, DID);

        controller_of("did:web:example.com#key1").expect_err("did:web should be rejected");
        controller_of("#fragment-only").expect_err("missing did should be rejected");
    }
}
