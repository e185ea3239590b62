//! # veriglob-vc: Verifiable Credentials and Presentations
//!
//! Issues and verifies the two signed token kinds of the protocol:
//!
//! - **Credential tokens** ([`credential`]): an issuer's signed claims about
//!   a subject, carrying one of four typed [`CredentialSubject`] variants,
//!   valid for one year.
//! - **Presentation tokens** ([`presentation`]): a holder's signed bundle of
//!   credential tokens, bound to one audience and one nonce, valid for
//!   fifteen minutes.
//!
//! Both are v4.public tokens produced by [`veriglob_crypto::token`]. Every
//! function here is a pure transform plus one signature operation; the only
//! input besides its arguments is the clock, and each operation has an
//! `_at` variant that takes the clock as a parameter.
//!
//! Embedded credentials are opaque to the presentation layer. A verifier
//! checks the presentation, then calls [`verify_credential`] on each entry
//! of [`PresentationClaims::credentials`].

pub mod credential;
pub mod error;
pub mod presentation;
pub mod subject;

pub use credential::{
    decode_credential, issue_credential, issue_credential_at, peek_credential_issuer,
    verify_credential, verify_credential_at, CredentialClaims, CredentialPayload,
    CredentialStatus,
};
pub use error::VcError;
pub use presentation::{
    generate_nonce, present, present_at, verify_presentation, verify_presentation_at,
    PresentationClaims, PresentationPayload,
};
pub use subject::{
    CredentialSubject, CredentialType, EducationSubject, EmploymentSubject, IdentitySubject,
    MembershipSubject,
};
