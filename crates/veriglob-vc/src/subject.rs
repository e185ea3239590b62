//! # Credential Subjects
//!
//! The closed set of subject shapes a credential can attest to. Each variant
//! carries the subject's identifier plus the fields an issuer of that kind
//! vouches for.
//!
//! On the wire the subject is a plain JSON object with no discriminant of
//! its own; the credential's `type` list carries the tag. Decoding therefore
//! goes through [`CredentialSubject::from_value`]: the object is held as an
//! untyped `serde_json::Value` until the tag is known, then decoded into the
//! matching struct.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VcError;

// ─── Credential Type ────────────────────────────────────────────────

/// The four supported credential kinds and their wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialType {
    Identity,
    Education,
    Employment,
    Membership,
}

impl CredentialType {
    /// Every supported type, in declaration order.
    pub const ALL: [CredentialType; 4] = [
        Self::Identity,
        Self::Education,
        Self::Employment,
        Self::Membership,
    ];

    /// The tag that appears in a credential's `type` list.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "IdentityCredential",
            Self::Education => "EducationCredential",
            Self::Employment => "EmploymentCredential",
            Self::Membership => "MembershipCredential",
        }
    }

    /// Match an exact wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = VcError;

    /// Accepts the wire tag (`EmploymentCredential`) or the short name
    /// (`employment`, any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = Self::from_tag(s) {
            return Ok(t);
        }
        match s.to_ascii_lowercase().as_str() {
            "identity" => Ok(Self::Identity),
            "education" => Ok(Self::Education),
            "employment" => Ok(Self::Employment),
            "membership" => Ok(Self::Membership),
            _ => Err(VcError::UnknownCredentialType(s.to_string())),
        }
    }
}

// ─── Subject Variants ───────────────────────────────────────────────

/// Attested personal identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySubject {
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    /// Kind of document inspected (passport, national id, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// When the issuer performed the identity check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<String>,
    /// Assurance level of the identity check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_level: Option<String>,
}

/// A degree, certificate, or completed course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationSubject {
    pub id: String,
    pub institution_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_did: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_earned: Option<u32>,
}

/// Current or past employment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentSubject {
    pub id: String,
    pub employer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_did: Option<String>,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Full-time, part-time, contract, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_location: Option<String>,
    pub current_employee: bool,
}

/// Membership of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSubject {
    pub id: String,
    pub organization_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_did: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    pub active_member: bool,
}

// ─── Credential Subject ─────────────────────────────────────────────

/// A credential subject: one of the four supported shapes.
///
/// Serializes as the bare inner object. There is no `Deserialize` impl
/// because the discriminant lives outside the object; use
/// [`CredentialSubject::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CredentialSubject {
    Identity(IdentitySubject),
    Education(EducationSubject),
    Employment(EmploymentSubject),
    Membership(MembershipSubject),
}

impl CredentialSubject {
    pub fn credential_type(&self) -> CredentialType {
        match self {
            Self::Identity(_) => CredentialType::Identity,
            Self::Education(_) => CredentialType::Education,
            Self::Employment(_) => CredentialType::Employment,
            Self::Membership(_) => CredentialType::Membership,
        }
    }

    /// The wire tag of this subject's credential type.
    pub fn tag(&self) -> &'static str {
        self.credential_type().as_str()
    }

    /// The identifier of the party the credential is about.
    pub fn subject_id(&self) -> &str {
        match self {
            Self::Identity(s) => &s.id,
            Self::Education(s) => &s.id,
            Self::Employment(s) => &s.id,
            Self::Membership(s) => &s.id,
        }
    }

    /// Decode an untyped subject object as the given credential type.
    pub fn from_value(
        credential_type: CredentialType,
        value: serde_json::Value,
    ) -> Result<Self, VcError> {
        let invalid =
            |e: serde_json::Error| VcError::InvalidSubject(format!("{credential_type}: {e}"));
        Ok(match credential_type {
            CredentialType::Identity => {
                Self::Identity(serde_json::from_value(value).map_err(invalid)?)
            }
            CredentialType::Education => {
                Self::Education(serde_json::from_value(value).map_err(invalid)?)
            }
            CredentialType::Employment => {
                Self::Employment(serde_json::from_value(value).map_err(invalid)?)
            }
            CredentialType::Membership => {
                Self::Membership(serde_json::from_value(value).map_err(invalid)?)
            }
        })
    }

    /// Decode an untyped subject object given its tag or short type name.
    pub fn from_tagged(tag: &str, value: serde_json::Value) -> Result<Self, VcError> {
        Self::from_value(tag.parse()?, value)
    }
}

impl From<IdentitySubject> for CredentialSubject {
    fn from(s: IdentitySubject) -> Self {
        Self::Identity(s)
    }
}

impl From<EducationSubject> for CredentialSubject {
    fn from(s: EducationSubject) -> Self {
        Self::Education(s)
    }
}

impl From<EmploymentSubject> for CredentialSubject {
    fn from(s: EmploymentSubject) -> Self {
        Self::Employment(s)
    }
}

impl From<MembershipSubject> for CredentialSubject {
    fn from(s: MembershipSubject) -> Self {
        Self::Membership(s)
    }
}
