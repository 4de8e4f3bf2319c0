use secrecy::SecretString;
use uuid::Uuid;

use crate::principal::KerberosPrincipal;

/// `Subject` is the identity attached to a request once the Negotiate gate has run.
///
/// Produced by a security realm on successful login, or as [`Subject::anonymous`]
/// when the caller sent no credentials. Handlers read it from request extensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Subject {
    /// Stable id for the subject within the realm.
    subject_id: Uuid,
    /// Kerberos principal name. `None` for anonymous callers.
    principal: Option<String>,
    /// Realm that vouched for the principal.
    realm: Option<String>,
    /// Scheduler roles granted to the subject.
    #[serde(default)]
    roles: Vec<String>,
    /// Base64 Negotiate credential the subject logged in with. Never serialized.
    #[serde(skip)]
    credential: Option<SecretString>,
}

impl Subject {
    #[must_use]
    pub fn builder() -> SubjectBuilder {
        SubjectBuilder::default()
    }

    /// Create an anonymous `Subject` with no principal and no roles
    #[must_use]
    pub fn anonymous() -> Self {
        SubjectBuilder::default().build()
    }

    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    /// Principal name, e.g. `alice@EXAMPLE.COM`.
    #[must_use]
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    #[must_use]
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether a realm authenticated this subject.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&SecretString> {
        self.credential.as_ref()
    }
}

#[derive(Default)]
pub struct SubjectBuilder {
    subject_id: Option<Uuid>,
    principal: Option<String>,
    realm: Option<String>,
    roles: Vec<String>,
    credential: Option<SecretString>,
}

impl SubjectBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    /// Set principal and realm from a parsed principal name.
    #[must_use]
    pub fn principal(mut self, principal: &KerberosPrincipal) -> Self {
        self.principal = Some(principal.to_string());
        self.realm = Some(principal.realm().to_owned());
        self
    }

    /// Override the realm, e.g. for cross-realm trust where the accepting realm differs.
    #[must_use]
    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = Some(realm.to_owned());
        self
    }

    #[must_use]
    pub fn roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn credential(mut self, credential: impl Into<SecretString>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Subject {
        Subject {
            subject_id: self.subject_id.unwrap_or_default(),
            principal: self.principal,
            realm: self.realm,
            roles: self.roles,
            credential: self.credential,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn alice() -> KerberosPrincipal {
        "alice@EXAMPLE.COM".parse().unwrap()
    }

    #[test]
    fn test_subject_builder_full() {
        let subject_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();

        let subject = Subject::builder()
            .subject_id(subject_id)
            .principal(&alice())
            .roles(vec!["operator".to_owned(), "viewer".to_owned()])
            .credential("YIIBhgYGKwYBBQUCoIIBejCCAXag".to_owned())
            .build();

        assert_eq!(subject.subject_id(), subject_id);
        assert_eq!(subject.principal(), Some("alice@EXAMPLE.COM"));
        assert_eq!(subject.realm(), Some("EXAMPLE.COM"));
        assert_eq!(subject.roles(), &["operator", "viewer"]);
        assert!(subject.has_role("viewer"));
        assert!(!subject.has_role("admin"));
        assert!(subject.is_authenticated());
        assert_eq!(
            subject.credential().map(ExposeSecret::expose_secret),
            Some("YIIBhgYGKwYBBQUCoIIBejCCAXag"),
        );
    }

    #[test]
    fn test_subject_anonymous() {
        let subject = Subject::anonymous();

        assert_eq!(subject.subject_id(), Uuid::default());
        assert!(subject.principal().is_none());
        assert!(subject.realm().is_none());
        assert!(subject.roles().is_empty());
        assert!(subject.credential().is_none());
        assert!(!subject.is_authenticated());
    }

    #[test]
    fn test_subject_realm_override() {
        let subject = Subject::builder()
            .principal(&alice())
            .realm("CORP.EXAMPLE.COM")
            .build();

        assert_eq!(subject.principal(), Some("alice@EXAMPLE.COM"));
        assert_eq!(subject.realm(), Some("CORP.EXAMPLE.COM"));
    }

    #[test]
    fn test_subject_serialize_deserialize() {
        let original = Subject::builder()
            .subject_id(Uuid::new_v4())
            .principal(&alice())
            .roles(vec!["admin".to_owned()])
            .credential("secret-token".to_owned())
            .build();

        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: Subject = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.subject_id(), original.subject_id());
        assert_eq!(deserialized.principal(), original.principal());
        assert_eq!(deserialized.roles(), original.roles());
        // credential is skipped during serialization
        assert!(deserialized.credential().is_none());
    }

    #[test]
    fn test_subject_credential_redacted() {
        let subject = Subject::builder()
            .credential("secret-token".to_owned())
            .build();

        let serialized = serde_json::to_string(&subject).unwrap();
        assert!(!serialized.contains("secret-token"));
        assert!(!format!("{subject:?}").contains("secret-token"));
    }
}
