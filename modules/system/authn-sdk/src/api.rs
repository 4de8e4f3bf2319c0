//! Contract implemented by the security subsystem.

use async_trait::async_trait;

use crate::error::AuthNError;
use crate::models::LoginResult;
use crate::token::NegotiateToken;

/// A security realm able to validate SPNEGO credentials.
///
/// The API gateway holds one realm as `Arc<dyn SecurityRealm>` and calls
/// [`SecurityRealm::login`] exactly once per request that carries a
/// well-formed `Authorization: Negotiate` header.
#[async_trait]
pub trait SecurityRealm: Send + Sync {
    /// Validate a Negotiate credential and return the authenticated subject.
    ///
    /// # Errors
    ///
    /// - `Rejected` if the realm does not accept the credential
    /// - `Expired` if the ticket inside the credential is no longer valid
    /// - `Malformed` if the credential is not a valid SPNEGO/Kerberos token
    /// - `Unavailable` if the realm cannot currently validate credentials
    async fn login(&self, token: &NegotiateToken) -> Result<LoginResult, AuthNError>;
}
