use authn_sdk::SchemeMatch;
use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_owned()
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// API gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiGatewayConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Disable Negotiate authentication completely.
    /// When true, middleware injects the development `Subject` into every request
    /// and the security realm is never consulted.
    /// Only meant for local development without a KDC.
    #[serde(default)]
    pub auth_disabled: bool,

    /// Negotiate scheme handling
    #[serde(default)]
    pub negotiate: NegotiateConfig,

    /// Global defaults
    #[serde(default)]
    pub defaults: Defaults,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            auth_disabled: false,
            negotiate: NegotiateConfig::default(),
            defaults: Defaults::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct NegotiateConfig {
    /// `exact` accepts only `Negotiate`; `case_insensitive` also accepts e.g. `negotiate`.
    pub scheme_match: SchemeMatch,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Defaults {
    /// Global request body size limit in bytes
    pub body_limit_bytes: usize,
    /// Whole-request timeout, including the realm login
    pub request_timeout_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
