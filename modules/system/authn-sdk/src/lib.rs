//! Negotiate authentication SDK
//!
//! This crate provides the contract between the API gateway's Negotiate gate
//! and whatever security subsystem validates Kerberos credentials:
//!
//! - [`NegotiateToken`] - Parsed `Authorization: Negotiate <base64>` credential
//! - [`SecurityRealm`] - Login operation implemented by the security subsystem
//! - [`LoginResult`] - Successful login outcome
//! - [`AuthNError`] / [`TokenParseError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_sdk::{NegotiateToken, SchemeMatch, SecurityRealm};
//!
//! let token = NegotiateToken::parse("Negotiate YIIBhg...", SchemeMatch::Exact)?;
//! let result = realm.login(&token).await?;
//! let subject = result.subject;
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod token;

pub use api::SecurityRealm;
pub use error::{AuthNError, TokenParseError};
pub use models::LoginResult;
pub use token::{NEGOTIATE, NegotiateToken, SchemeMatch};
