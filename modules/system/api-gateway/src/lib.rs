#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! API gateway for the scheduler REST API.
//!
//! Wraps application routes in the Negotiate (SPNEGO/Kerberos, RFC 4559)
//! authentication gate and the usual HTTP hygiene layers.
//!
//! ## Middleware Stack
//!
//! SetRequestId -> PropagateRequestId -> Trace -> Timeout -> BodyLimit -> Negotiate -> Router

pub mod auth;
pub mod config;
pub mod module;

pub use auth::{NegotiateState, challenge, negotiate_middleware};
pub use config::ApiGatewayConfig;
pub use module::ApiGateway;
