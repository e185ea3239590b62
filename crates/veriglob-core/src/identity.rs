//! # Credential and Presentation Identifiers
//!
//! Newtype wrappers for the `urn:uuid:` identifiers that appear in token
//! claims (`jti`, `vc.id`, `vp.id`) and as revocation registry keys.
//! Keeping them as distinct types means a presentation id can never be
//! registered as a credential id.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::ValidationError;

const URN_UUID_PREFIX: &str = "urn:uuid:";

/// Identifier of a verifiable credential.
///
/// Freshly generated ids have the form `urn:uuid:<uuid-v4>`. Ids supplied by
/// callers are accepted in any form that is non-empty and free of
/// whitespace, since the registry only needs them to be unique keys.
/// Parsing through [`CredentialId::new`] (or `FromStr`) is the only way to
/// get one from a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialId(String);

impl CredentialId {
    /// Generate a new random credential identifier.
    pub fn generate() -> Self {
        Self(format!("{URN_UUID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Wrap a caller-supplied identifier after validating it.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidCredentialId(value));
        }
        Ok(Self(value))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the identifier string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CredentialId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a verifiable presentation (`vp.id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresentationId(String);

impl PresentationId {
    /// Generate a new random presentation identifier.
    pub fn generate() -> Self {
        Self(format!("{URN_UUID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_credential_id_is_urn_uuid_v4() {
        let id = CredentialId::generate();
        assert!(id.as_str().starts_with("urn:uuid:"));
        assert_eq!(id.as_str().len(), "urn:uuid:".len() + 36);
        let uuid = Uuid::parse_str(&id.as_str()["urn:uuid:".len()..]).unwrap();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn generated_credential_ids_are_unique() {
        let a = CredentialId::generate();
        let b = CredentialId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn caller_supplied_id_accepted() {
        let id = CredentialId::new("urn:uuid:11111111-1111-1111-1111-111111111111").unwrap();
        assert_eq!(id.to_string(), "urn:uuid:11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn non_urn_id_parses() {
        let id: CredentialId = "cred-42".parse().unwrap();
        assert_eq!(id.into_string(), "cred-42");
    }

    #[test]
    fn empty_id_rejected() {
        assert!(matches!(
            CredentialId::new(""),
            Err(ValidationError::InvalidCredentialId(_))
        ));
    }

    #[test]
    fn whitespace_id_rejected() {
        assert!(CredentialId::new("cred 42").is_err());
        assert!(CredentialId::new("cred\n").is_err());
    }

    #[test]
    fn presentation_id_is_urn_uuid() {
        let id = PresentationId::generate();
        assert!(id.as_str().starts_with("urn:uuid:"));
        assert_ne!(id, PresentationId::generate());
    }

    proptest! {
        #[test]
        fn non_whitespace_ids_always_accepted(s in "[A-Za-z0-9:._-]{1,64}") {
            let id = CredentialId::new(s.clone()).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }
    }
}
