#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static security realm
//!
//! A [`authn_sdk::SecurityRealm`] that needs no KDC. Meant for development
//! and for end-to-end tests of the Negotiate gate.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Any non-empty credential logs in as the configured
//!   default identity.
//!
//! - **`static_tokens`**: Maps specific base64 credentials to specific principals.
//!   Useful for E2E tests with distinct users.
//!
//! ## Configuration
//!
//! ```yaml
//! static_realm:
//!   mode: static_tokens
//!   default_identity:
//!     principal: "scheduler@LOCALDOMAIN"
//!     subject_id: "11111111-6a88-4768-9dfc-6bcd5187d9ed"
//!     roles: ["admin"]
//!   tokens:
//!     - token: "YWxpY2U="
//!       identity:
//!         principal: "alice@EXAMPLE.COM"
//!         subject_id: "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa"
//!         roles: ["operator"]
//! ```

pub mod config;
pub mod domain;

pub use config::StaticRealmConfig;
pub use domain::{RealmConfigError, StaticRealm};
