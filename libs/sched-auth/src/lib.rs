#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Handler-side half of the Negotiate authentication contract.
//!
//! The gate in `api_gateway` installs a [`sched_security::Subject`] into every
//! request. Handlers read it through the extractors here, and raise
//! [`Unauthenticated`] when an operation needs a caller identity that the
//! request did not provide. The gate turns that signal into a Negotiate challenge.

pub mod axum_ext;

pub use axum_ext::{
    AuthRejection, Authenticated, CurrentSubject, Unauthenticated, UnauthenticatedSignal,
    is_unauthenticated_signal,
};
