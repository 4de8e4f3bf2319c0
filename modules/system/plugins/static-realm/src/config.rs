//! Configuration for the static security realm.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sched_security::constants::{DEFAULT_PRINCIPAL, DEFAULT_SUBJECT_ID, ROLE_ADMIN};

/// Realm configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticRealmConfig {
    /// Login mode.
    pub mode: RealmMode,

    /// Identity returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Credential-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

impl Default for StaticRealmConfig {
    fn default() -> Self {
        Self {
            mode: RealmMode::AcceptAll,
            default_identity: IdentityConfig::default(),
            tokens: Vec::new(),
        }
    }
}

/// Login mode.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RealmMode {
    /// Accept any non-empty credential and return the default identity.
    #[default]
    AcceptAll,
    /// Map specific credentials to specific identities.
    StaticTokens,
}

/// Identity configuration for a subject.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Kerberos principal, `primary[/instance]@REALM`.
    pub principal: String,

    /// Subject id.
    pub subject_id: Uuid,

    /// Scheduler roles.
    pub roles: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            principal: DEFAULT_PRINCIPAL.to_owned(),
            subject_id: DEFAULT_SUBJECT_ID,
            roles: vec![ROLE_ADMIN.to_owned()],
        }
    }
}

/// Maps a credential to a specific identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// Base64 credential as it appears after `Negotiate ` in the header.
    pub token: String,
    /// The identity to return when this credential is presented.
    pub identity: IdentityConfig,
}
