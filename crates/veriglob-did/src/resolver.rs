//! # did:key Resolution
//!
//! Parses an identifier string back into the Ed25519 public key it encodes.
//! Checks run in a fixed order so that each malformed input maps to exactly
//! one [`DidError`] variant:
//!
//! 1. shape `did:<method>:<method-id>` (`MalformedIdentifier`)
//! 2. method is `key` (`UnsupportedMethod`)
//! 3. `z` multibase prefix and valid base58 (`MalformedIdentifier`)
//! 4. `0xed01` multicodec tag (`InvalidTypeTag`)
//! 5. exactly 32 key bytes (`InvalidKeyLength`)

use veriglob_crypto::Ed25519PublicKey;

use crate::did_key::{derive, DidKey, ED25519_MULTICODEC, MULTIBASE_BASE58BTC};
use crate::error::DidError;

/// Resolve a `did:key` identifier to its public key.
pub fn resolve(did: &str) -> Result<Ed25519PublicKey, DidError> {
    let mut parts = did.splitn(3, ':');
    let (scheme, method, method_id) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(method), Some(method_id)) => (scheme, method, method_id),
        _ => return Err(DidError::malformed(did, "expected did:<method>:<method-id>")),
    };
    if scheme != "did" {
        return Err(DidError::malformed(did, "scheme must be \"did\""));
    }
    if method != "key" {
        return Err(DidError::UnsupportedMethod(method.to_string()));
    }

    let encoded = method_id
        .strip_prefix(MULTIBASE_BASE58BTC)
        .ok_or_else(|| DidError::malformed(did, "method-specific id must start with 'z'"))?;
    let decoded = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| DidError::malformed(did, format!("invalid base58: {e}")))?;

    if decoded.len() < ED25519_MULTICODEC.len() {
        return Err(DidError::InvalidTypeTag(format!("{} byte(s)", decoded.len())));
    }
    let (tag, key_bytes) = decoded.split_at(ED25519_MULTICODEC.len());
    if tag != ED25519_MULTICODEC {
        return Err(DidError::InvalidTypeTag(format!("{:02x}{:02x}", tag[0], tag[1])));
    }

    Ed25519PublicKey::from_slice(key_bytes).map_err(|_| {
        tracing::debug!(did, len = key_bytes.len(), "did:key has wrong key length");
        DidError::InvalidKeyLength(key_bytes.len())
    })
}

/// Resolve a `did:key` identifier and rebuild its full [`DidKey`], document
/// included.
pub fn resolve_did_key(did: &str) -> Result<DidKey, DidError> {
    resolve(did).map(|pk| derive(&pk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use veriglob_crypto::Ed25519KeyPair;

    fn encode_raw(bytes: &[u8]) -> String {
        format!("did:key:z{}", bs58::encode(bytes).into_string())
    }

    #[test]
    fn test_resolve_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let key = derive(&kp.public_key());
        assert_eq!(resolve(key.id()).unwrap(), kp.public_key());
    }

    #[test]
    fn test_resolve_did_key_rebuilds_document() {
        let key = derive(&Ed25519KeyPair::generate().public_key());
        let resolved = resolve_did_key(key.id()).unwrap();
        assert_eq!(resolved, key);
    }

    #[test]
    fn test_too_few_parts() {
        for did in ["", "did", "did:key", "zABC"] {
            assert!(
                matches!(resolve(did), Err(DidError::MalformedIdentifier { .. })),
                "{did:?}"
            );
        }
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(matches!(
            resolve("urn:key:z6Mk"),
            Err(DidError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_unsupported_method() {
        assert_eq!(
            resolve("did:web:example.com"),
            Err(DidError::UnsupportedMethod("web".to_string()))
        );
    }

    #[test]
    fn test_missing_multibase_prefix() {
        assert!(matches!(
            resolve("did:key:6MkiTBz1ymuepAQ4HEHYSF1H8quG5GLVVQR3djdX3mDooWp"),
            Err(DidError::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            resolve("did:key:"),
            Err(DidError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_invalid_base58() {
        // '0', 'O', 'I', 'l' are not in the base58btc alphabet.
        assert!(matches!(
            resolve("did:key:z0OIl"),
            Err(DidError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_trailing_segment_rejected() {
        let key = derive(&Ed25519KeyPair::generate().public_key());
        let did = format!("{}:extra", key.id());
        assert!(matches!(
            resolve(&did),
            Err(DidError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_wrong_type_tag() {
        let mut bytes = vec![0xe7, 0x01];
        bytes.extend_from_slice(&[1u8; 32]);
        assert_eq!(
            resolve(&encode_raw(&bytes)),
            Err(DidError::InvalidTypeTag("e701".to_string()))
        );
    }

    #[test]
    fn test_decoded_shorter_than_tag() {
        assert!(matches!(
            resolve(&encode_raw(&[0xed])),
            Err(DidError::InvalidTypeTag(_))
        ));
    }

    #[test]
    fn test_wrong_key_length() {
        let mut short = ED25519_MULTICODEC.to_vec();
        short.extend_from_slice(&[1u8; 31]);
        assert_eq!(resolve(&encode_raw(&short)), Err(DidError::InvalidKeyLength(31)));

        let mut long = ED25519_MULTICODEC.to_vec();
        long.extend_from_slice(&[1u8; 33]);
        assert_eq!(resolve(&encode_raw(&long)), Err(DidError::InvalidKeyLength(33)));

        assert_eq!(
            resolve(&encode_raw(&ED25519_MULTICODEC)),
            Err(DidError::InvalidKeyLength(0))
        );
    }

    proptest! {
        #[test]
        fn resolve_inverts_derive(bytes in proptest::array::uniform32(any::<u8>())) {
            let pk = Ed25519PublicKey::from_bytes(bytes);
            let key = derive(&pk);
            prop_assert_eq!(resolve(key.id()).unwrap(), pk);
        }

        #[test]
        fn identifiers_equal_iff_keys_equal(
            a in proptest::array::uniform32(any::<u8>()),
            b in proptest::array::uniform32(any::<u8>()),
        ) {
            let da = derive(&Ed25519PublicKey::from_bytes(a));
            let db = derive(&Ed25519PublicKey::from_bytes(b));
            prop_assert_eq!(da.id() == db.id(), a == b);
        }
    }
}
