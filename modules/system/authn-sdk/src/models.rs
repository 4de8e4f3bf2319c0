//! Domain models for the Negotiate SDK.

use sched_security::Subject;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated subject. Always has a principal.
    pub subject: Subject,
}
