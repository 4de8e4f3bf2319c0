//! `Authorization: Negotiate` credentials (RFC 4559).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretBox, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::TokenParseError;

/// Scheme name from RFC 4559. Also the value of the `WWW-Authenticate` challenge.
pub const NEGOTIATE: &str = "Negotiate";

/// How the scheme name in the `Authorization` header is compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeMatch {
    /// Only `Negotiate` exactly as spelled in RFC 4559.
    #[default]
    Exact,
    /// Any ASCII casing, as RFC 7235 allows for scheme names.
    CaseInsensitive,
}

impl SchemeMatch {
    /// Strip `Negotiate ` from the start of `value`, returning the remainder.
    fn strip_scheme(self, value: &str) -> Option<&str> {
        let scheme = value.get(..NEGOTIATE.len())?;
        let matches = match self {
            Self::Exact => scheme == NEGOTIATE,
            Self::CaseInsensitive => scheme.eq_ignore_ascii_case(NEGOTIATE),
        };
        if !matches {
            return None;
        }
        value[NEGOTIATE.len()..].strip_prefix(' ')
    }
}

/// A parsed Negotiate credential.
///
/// Holds the decoded SPNEGO token bytes and the base64 text it came from.
/// Both are wrapped in secrets so `Debug` never prints them.
#[derive(Debug)]
pub struct NegotiateToken {
    credential: SecretBox<Vec<u8>>,
    encoded: SecretString,
}

impl NegotiateToken {
    /// Parse an `Authorization` header value.
    ///
    /// Accepts `Negotiate <base64>`, where the credential is non-empty standard
    /// padded base64. Whitespace around the credential is ignored.
    ///
    /// # Errors
    ///
    /// - `UnsupportedScheme` if the value does not start with `Negotiate `
    /// - `EmptyCredential` if nothing follows the scheme
    /// - `InvalidBase64` if the credential does not decode
    pub fn parse(header_value: &str, scheme: SchemeMatch) -> Result<Self, TokenParseError> {
        let encoded = scheme
            .strip_scheme(header_value)
            .ok_or(TokenParseError::UnsupportedScheme)?
            .trim();
        if encoded.is_empty() {
            return Err(TokenParseError::EmptyCredential);
        }

        let credential = STANDARD.decode(encoded)?;
        Ok(Self {
            credential: SecretBox::new(Box::new(credential)),
            encoded: encoded.to_owned().into(),
        })
    }

    /// Parse raw header bytes, rejecting anything that is not visible ASCII.
    ///
    /// # Errors
    ///
    /// Same as [`NegotiateToken::parse`], plus `NotVisibleAscii`.
    pub fn parse_bytes(header_value: &[u8], scheme: SchemeMatch) -> Result<Self, TokenParseError> {
        if !header_value.iter().all(|b| *b == b' ' || b.is_ascii_graphic()) {
            return Err(TokenParseError::NotVisibleAscii);
        }
        let value =
            std::str::from_utf8(header_value).map_err(|_| TokenParseError::NotVisibleAscii)?;
        Self::parse(value, scheme)
    }

    /// Build a token from raw SPNEGO bytes (client side and tests).
    #[must_use]
    pub fn from_credential(credential: Vec<u8>) -> Self {
        let encoded = STANDARD.encode(&credential);
        Self {
            credential: SecretBox::new(Box::new(credential)),
            encoded: encoded.into(),
        }
    }

    /// Decoded SPNEGO token bytes.
    #[must_use]
    pub fn credential(&self) -> &[u8] {
        self.credential.expose_secret()
    }

    /// The base64 credential as it appeared on the wire.
    #[must_use]
    pub fn encoded(&self) -> &SecretString {
        &self.encoded
    }

    /// Render the `Authorization` header value for this token.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        format!("{NEGOTIATE} {}", self.encoded.expose_secret())
    }
}
