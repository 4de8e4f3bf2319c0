//! Error types for Negotiate authentication.

use thiserror::Error;

/// The `Authorization` header is not a Negotiate credential.
///
/// This is a client error (HTTP 400), distinct from a credential the realm rejects.
#[derive(Debug, Error)]
pub enum TokenParseError {
    /// The header does not start with `Negotiate `.
    #[error("authorization scheme is not Negotiate")]
    UnsupportedScheme,

    /// Nothing follows the scheme.
    #[error("Negotiate credential is empty")]
    EmptyCredential,

    /// The credential is not standard padded base64.
    #[error("Negotiate credential is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The header value contains bytes outside visible ASCII.
    #[error("authorization header is not visible ASCII")]
    NotVisibleAscii,
}

/// Errors a [`crate::SecurityRealm`] reports when login fails.
#[derive(Debug, Error)]
pub enum AuthNError {
    /// The credential was understood but not accepted.
    #[error("credential rejected: {0}")]
    Rejected(String),

    /// The ticket has expired.
    #[error("credential expired: {0}")]
    Expired(String),

    /// The credential bytes are not a usable SPNEGO/Kerberos token.
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// The realm cannot validate credentials right now.
    #[error("realm unavailable: {0}")]
    Unavailable(String),
}
