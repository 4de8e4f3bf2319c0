//! Errors raised while building the realm from configuration.

use sched_security::PrincipalParseError;

#[derive(thiserror::Error, Debug)]
pub enum RealmConfigError {
    #[error("invalid principal in realm config: {0}")]
    InvalidPrincipal(#[from] PrincipalParseError),

    #[error("token mapping #{index} is not valid base64: {source}")]
    InvalidToken {
        index: usize,
        source: base64::DecodeError,
    },

    #[error("token mapping #{index} is empty")]
    EmptyToken { index: usize },

    #[error("token mapping #{index} duplicates an earlier credential")]
    DuplicateToken { index: usize },
}
