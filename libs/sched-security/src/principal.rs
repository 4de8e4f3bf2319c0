//! Kerberos principal names (`primary[/instance]@REALM`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a principal name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalParseError {
    #[error("principal is empty")]
    Empty,

    #[error("principal '{0}' has no realm")]
    MissingRealm(String),

    #[error("principal '{0}' has more than one '@'")]
    MultipleRealms(String),

    #[error("principal '{0}' has an empty component")]
    EmptyComponent(String),

    #[error("principal '{0}' contains whitespace")]
    Whitespace(String),
}

/// A parsed Kerberos principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KerberosPrincipal {
    primary: String,
    instance: Option<String>,
    realm: String,
}

impl KerberosPrincipal {
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    #[must_use]
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Service principals (`HTTP/host@REALM`) carry an instance component.
    #[must_use]
    pub fn is_service(&self) -> bool {
        self.instance.is_some()
    }
}

impl FromStr for KerberosPrincipal {
    type Err = PrincipalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PrincipalParseError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(PrincipalParseError::Whitespace(s.to_owned()));
        }

        let mut parts = s.split('@');
        let name = parts.next().unwrap_or_default();
        let Some(realm) = parts.next() else {
            return Err(PrincipalParseError::MissingRealm(s.to_owned()));
        };
        if parts.next().is_some() {
            return Err(PrincipalParseError::MultipleRealms(s.to_owned()));
        }

        let (primary, instance) = match name.split_once('/') {
            Some((primary, instance)) => (primary, Some(instance)),
            None => (name, None),
        };

        if primary.is_empty() || realm.is_empty() || instance.is_some_and(str::is_empty) {
            return Err(PrincipalParseError::EmptyComponent(s.to_owned()));
        }

        Ok(Self {
            primary: primary.to_owned(),
            instance: instance.map(str::to_owned),
            realm: realm.to_owned(),
        })
    }
}

impl fmt::Display for KerberosPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance {
            Some(instance) => write!(f, "{}/{}@{}", self.primary, instance, self.realm),
            None => write!(f, "{}@{}", self.primary, self.realm),
        }
    }
}
