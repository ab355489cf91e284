//! # Multibase and Multicodec Key Encoding
//!
//! `did:key` identifiers embed key material as a multibase string: a
//! one-character base indicator (`z` for base58-btc) followed by the base58
//! encoding of a 2-byte multicodec header plus the raw key bytes.
//!
//! See:
//!
//! - <https://github.com/multiformats/multibase>
//! - <https://github.com/multiformats/multicodec>

use multibase::Base;

use crate::error::Error;

/// Multicodec header for an Ed25519 public key (`ed25519-pub` as varint).
pub const ED25519_CODEC: [u8; 2] = [0xed, 0x01];

/// Multicodec header for an Ed25519 private key (`ed25519-priv` as varint).
pub const ED25519_PRIV_CODEC: [u8; 2] = [0x80, 0x26];

/// Length of a raw Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 keypair: the 32-byte private seed followed by the
/// 32-byte public key derived from it.
pub const KEYPAIR_LENGTH: usize = 64;

/// Encode bytes as a multibase base58-btc string (always starts with `z`).
#[must_use]
pub fn encode_multibase(data: &[u8]) -> String {
    multibase::encode(Base::Base58Btc, data)
}

/// Decode a multibase base58-btc string.
///
/// # Errors
///
/// Returns an error if the base indicator is missing or unrecognized, if the
/// base is anything other than base58-btc, or if the payload does not decode.
pub fn decode_multibase(multibase: &str) -> crate::Result<Vec<u8>> {
    let (base, data) = multibase::decode(multibase).map_err(|e| Error::InvalidFormat {
        reason: format!("issue decoding multibase: {e}"),
        input: multibase.to_string(),
    })?;
    if base != Base::Base58Btc {
        return Err(Error::InvalidFormat {
            reason: format!("expected base58-btc (`z`), got `{}`", base.code()),
            input: multibase.to_string(),
        });
    }
    Ok(data)
}

/// Prefix a payload with its 2-byte multicodec header.
#[must_use]
pub fn encode_multicodec(codec: [u8; 2], data: &[u8]) -> Vec<u8> {
    let mut multi_bytes = codec.to_vec();
    multi_bytes.extend_from_slice(data);
    multi_bytes
}

/// Strip the expected multicodec header from tagged bytes, returning the
/// payload.
///
/// There is no self-describing length field: the caller must already know
/// which kind of key it expects.
///
/// # Errors
///
/// Returns an error if the input is shorter than the header or the header
/// does not match the expected codec.
pub fn decode_multicodec(tagged: &[u8], codec: [u8; 2]) -> crate::Result<&[u8]> {
    if tagged.len() < codec.len() {
        return Err(Error::InvalidFormat {
            reason: format!("multicodec input truncated: {} bytes", tagged.len()),
            input: encode_multibase(tagged),
        });
    }
    if tagged[0..codec.len()] != codec {
        return Err(Error::InvalidFormat {
            reason: format!(
                "multicodec header mismatch: expected {codec:02x?}, got {:02x?}",
                &tagged[0..codec.len()]
            ),
            input: encode_multibase(tagged),
        });
    }
    Ok(&tagged[codec.len()..])
}

/// Encode a raw Ed25519 public key in multibase form.
///
/// # Errors
///
/// Returns an error if the key is not exactly 32 bytes.
pub fn encode_public_key(public_key: &[u8]) -> crate::Result<String> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(Error::InvalidKeyLength {
            expected: PUBLIC_KEY_LENGTH,
            actual: public_key.len(),
        });
    }
    Ok(encode_multibase(&encode_multicodec(ED25519_CODEC, public_key)))
}

/// Decode a multibase-encoded Ed25519 public key to its raw 32 bytes.
///
/// # Errors
///
/// Returns an error if the string is not valid multibase, the multicodec
/// header is not `ed25519-pub`, or the payload is not 32 bytes.
pub fn decode_public_key(multibase: &str) -> crate::Result<[u8; 32]> {
    let multi_bytes = decode_multibase(multibase)?;
    let key_bytes = decode_multicodec(&multi_bytes, ED25519_CODEC)?;
    key_bytes.try_into().map_err(|_| Error::InvalidFormat {
        reason: format!(
            "public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
            key_bytes.len()
        ),
        input: multibase.to_string(),
    })
}

/// Encode Ed25519 keypair bytes (seed ‖ public key) in multibase form.
///
/// # Errors
///
/// Returns an error if the keypair is not exactly 64 bytes.
pub fn encode_private_key(keypair: &[u8]) -> crate::Result<String> {
    if keypair.len() != KEYPAIR_LENGTH {
        return Err(Error::InvalidKeyLength {
            expected: KEYPAIR_LENGTH,
            actual: keypair.len(),
        });
    }
    Ok(encode_multibase(&encode_multicodec(ED25519_PRIV_CODEC, keypair)))
}

/// Decode a multibase-encoded Ed25519 private key to raw keypair bytes
/// (seed ‖ public key).
///
/// # Errors
///
/// Returns an error if the string is not valid multibase, the multicodec
/// header is not `ed25519-priv`, or the payload is not 64 bytes.
pub fn decode_private_key(multibase: &str) -> crate::Result<[u8; 64]> {
    let multi_bytes = decode_multibase(multibase)?;
    let key_bytes = decode_multicodec(&multi_bytes, ED25519_PRIV_CODEC)?;
    key_bytes.try_into().map_err(|_| Error::InvalidFormat {
        reason: format!(
            "private key must be {KEYPAIR_LENGTH} bytes, got {}",
            key_bytes.len()
        ),
        input: multibase.to_string(),
    })
}
