//! Service implementation for the static security realm.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::ExposeSecret;
use uuid::Uuid;

use authn_sdk::{AuthNError, LoginResult, NegotiateToken};
use sched_security::{KerberosPrincipal, Subject};

use super::error::RealmConfigError;
use crate::config::{IdentityConfig, RealmMode, StaticRealmConfig};

/// Identity with its principal already validated.
#[derive(Debug, Clone)]
struct Identity {
    principal: KerberosPrincipal,
    subject_id: Uuid,
    roles: Vec<String>,
}

impl TryFrom<&IdentityConfig> for Identity {
    type Error = RealmConfigError;

    fn try_from(cfg: &IdentityConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            principal: cfg.principal.parse()?,
            subject_id: cfg.subject_id,
            roles: cfg.roles.clone(),
        })
    }
}

/// Static security realm.
///
/// Maps credentials to identities based on configuration mode:
/// - `accept_all`: Any non-empty credential maps to the default identity
/// - `static_tokens`: Specific credentials map to specific identities
#[derive(Debug)]
pub struct StaticRealm {
    mode: RealmMode,
    default_identity: Identity,
    token_map: HashMap<Vec<u8>, Identity>,
}

impl StaticRealm {
    /// Build a realm from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a principal does not parse, or a token mapping is
    /// empty, not base64, or duplicated.
    pub fn from_config(cfg: &StaticRealmConfig) -> Result<Self, RealmConfigError> {
        let mut token_map = HashMap::with_capacity(cfg.tokens.len());
        for (index, mapping) in cfg.tokens.iter().enumerate() {
            let encoded = mapping.token.trim();
            if encoded.is_empty() {
                return Err(RealmConfigError::EmptyToken { index });
            }
            let credential = STANDARD
                .decode(encoded)
                .map_err(|source| RealmConfigError::InvalidToken { index, source })?;
            match token_map.entry(credential) {
                Entry::Occupied(_) => return Err(RealmConfigError::DuplicateToken { index }),
                Entry::Vacant(slot) => {
                    slot.insert(Identity::try_from(&mapping.identity)?);
                }
            }
        }

        if cfg.mode == RealmMode::AcceptAll {
            tracing::warn!(
                principal = %cfg.default_identity.principal,
                "Static realm is running in `accept_all` mode: every Negotiate credential \
                 logs in as the default identity. Do NOT use this mode in production."
            );
        }

        tracing::info!(
            mode = ?cfg.mode,
            token_count = token_map.len(),
            "Static realm configured"
        );

        Ok(Self {
            mode: cfg.mode,
            default_identity: Identity::try_from(&cfg.default_identity)?,
            token_map,
        })
    }

    /// Resolve a credential to a subject.
    ///
    /// # Errors
    ///
    /// - `Malformed` if the credential is empty
    /// - `Rejected` if the credential is unknown in `static_tokens` mode
    pub fn authenticate(&self, token: &NegotiateToken) -> Result<LoginResult, AuthNError> {
        if token.credential().is_empty() {
            return Err(AuthNError::Malformed("empty credential".to_owned()));
        }

        let identity = match self.mode {
            RealmMode::AcceptAll => &self.default_identity,
            RealmMode::StaticTokens => self
                .token_map
                .get(token.credential())
                .ok_or_else(|| AuthNError::Rejected("unknown credential".to_owned()))?,
        };

        Ok(build_result(identity, token))
    }
}

fn build_result(identity: &Identity, token: &NegotiateToken) -> LoginResult {
    let subject = Subject::builder()
        .subject_id(identity.subject_id)
        .principal(&identity.principal)
        .roles(identity.roles.clone())
        .credential(token.encoded().expose_secret().to_owned())
        .build();

    LoginResult { subject }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::TokenMapping;
    use authn_sdk::SchemeMatch;
    use sched_security::constants::{DEFAULT_PRINCIPAL, DEFAULT_SUBJECT_ID};

    fn token(header: &str) -> NegotiateToken {
        NegotiateToken::parse(header, SchemeMatch::Exact).unwrap()
    }

    fn alice_mapping() -> TokenMapping {
        TokenMapping {
            // "alice"
            token: "YWxpY2U=".to_owned(),
            identity: IdentityConfig {
                principal: "alice@EXAMPLE.COM".to_owned(),
                subject_id: Uuid::parse_str("aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa").unwrap(),
                roles: vec!["operator".to_owned()],
            },
        }
    }

    fn static_tokens_config() -> StaticRealmConfig {
        StaticRealmConfig {
            mode: RealmMode::StaticTokens,
            tokens: vec![alice_mapping()],
            ..StaticRealmConfig::default()
        }
    }

    #[test]
    fn accept_all_mode_returns_default_identity() {
        let realm = StaticRealm::from_config(&StaticRealmConfig::default()).unwrap();

        let result = realm.authenticate(&token("Negotiate YIIB")).unwrap();
        let subject = &result.subject;
        assert_eq!(subject.subject_id(), DEFAULT_SUBJECT_ID);
        assert_eq!(subject.principal(), Some(DEFAULT_PRINCIPAL));
        assert_eq!(subject.realm(), Some("LOCALDOMAIN"));
        assert!(subject.has_role("admin"));
        assert_eq!(
            subject.credential().map(ExposeSecret::expose_secret),
            Some("YIIB"),
        );
    }

    #[test]
    fn accept_all_mode_rejects_empty_credential() {
        let realm = StaticRealm::from_config(&StaticRealmConfig::default()).unwrap();

        let result = realm.authenticate(&NegotiateToken::from_credential(Vec::new()));
        assert!(matches!(result, Err(AuthNError::Malformed(_))));
    }

    #[test]
    fn static_tokens_mode_returns_mapped_identity() {
        let realm = StaticRealm::from_config(&static_tokens_config()).unwrap();

        let result = realm.authenticate(&token("Negotiate YWxpY2U=")).unwrap();
        let subject = &result.subject;
        assert_eq!(subject.principal(), Some("alice@EXAMPLE.COM"));
        assert_eq!(subject.realm(), Some("EXAMPLE.COM"));
        assert_eq!(subject.roles(), &["operator"]);
    }

    #[test]
    fn static_tokens_mode_matches_on_decoded_bytes() {
        let realm = StaticRealm::from_config(&static_tokens_config()).unwrap();

        let result = realm.authenticate(&NegotiateToken::from_credential(b"alice".to_vec()));
        assert!(result.is_ok());
    }

    #[test]
    fn static_tokens_mode_rejects_unknown_credential() {
        let realm = StaticRealm::from_config(&static_tokens_config()).unwrap();

        let result = realm.authenticate(&token("Negotiate Ym9i"));
        assert!(matches!(result, Err(AuthNError::Rejected(_))));
    }

    #[test]
    fn from_config_rejects_bad_principal() {
        let mut cfg = static_tokens_config();
        cfg.tokens[0].identity.principal = "alice".to_owned();

        assert!(matches!(
            StaticRealm::from_config(&cfg),
            Err(RealmConfigError::InvalidPrincipal(_))
        ));
    }

    #[test]
    fn from_config_rejects_bad_token_mappings() {
        let mut cfg = static_tokens_config();
        cfg.tokens.push(TokenMapping {
            token: "not base64!".to_owned(),
            ..alice_mapping()
        });
        assert!(matches!(
            StaticRealm::from_config(&cfg),
            Err(RealmConfigError::InvalidToken { index: 1, .. })
        ));

        let mut cfg = static_tokens_config();
        cfg.tokens.push(alice_mapping());
        assert!(matches!(
            StaticRealm::from_config(&cfg),
            Err(RealmConfigError::DuplicateToken { index: 1 })
        ));

        let mut cfg = static_tokens_config();
        cfg.tokens[0].token = "  ".to_owned();
        assert!(matches!(
            StaticRealm::from_config(&cfg),
            Err(RealmConfigError::EmptyToken { index: 0 })
        ));
    }

    #[test]
    fn config_deserializes_from_json() {
        let cfg: StaticRealmConfig = serde_json::from_value(serde_json::json!({
            "mode": "static_tokens",
            "tokens": [{
                "token": "YWxpY2U=",
                "identity": { "principal": "alice@EXAMPLE.COM", "roles": ["viewer"] }
            }]
        }))
        .unwrap();

        assert_eq!(cfg.mode, RealmMode::StaticTokens);
        assert_eq!(cfg.default_identity.principal, DEFAULT_PRINCIPAL);
        assert_eq!(cfg.tokens[0].identity.subject_id, DEFAULT_SUBJECT_ID);
        assert!(StaticRealm::from_config(&cfg).is_ok());
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let result: Result<StaticRealmConfig, _> =
            serde_json::from_value(serde_json::json!({ "vendor": "x" }));
        assert!(result.is_err());
    }
}
