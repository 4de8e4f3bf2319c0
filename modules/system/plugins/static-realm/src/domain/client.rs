//! `SecurityRealm` implementation for the static realm.

use async_trait::async_trait;
use authn_sdk::{AuthNError, LoginResult, NegotiateToken, SecurityRealm};

use super::service::StaticRealm;

#[async_trait]
impl SecurityRealm for StaticRealm {
    async fn login(&self, token: &NegotiateToken) -> Result<LoginResult, AuthNError> {
        self.authenticate(token)
    }
}
