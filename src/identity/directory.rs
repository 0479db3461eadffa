use super::principal::{Identity, Provider, Role};

/// Static registry of known principals.
///
/// A real deployment would back this with an external directory service; in
/// this scope the set is fixed at construction and lookups are read-only.
#[derive(Debug, Clone)]
pub struct IdentityDirectory {
    identities: Vec<Identity>,
}

impl IdentityDirectory {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    /// The demo principals: a credential admin, a credential user and one
    /// federated user.
    pub fn seed_demo() -> Self {
        Self::new(vec![
            Identity {
                id: "1".into(),
                name: "Admin User".into(),
                email: "admin@example.com".into(),
                role: Role::Admin,
                provider: Provider::Credential,
            },
            Identity {
                id: "2".into(),
                name: "Regular User".into(),
                email: "user@example.com".into(),
                role: Role::User,
                provider: Provider::Credential,
            },
            Identity {
                id: "3".into(),
                name: "Federated User".into(),
                email: "federated@outlook.com".into(),
                role: Role::User,
                provider: Provider::Federated,
            },
        ])
    }

    /// Case-insensitive lookup by email.
    pub fn lookup_by_email(&self, email: &str) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|i| i.email.eq_ignore_ascii_case(email))
    }

    /// First identity carrying the federated provider marker.
    pub fn lookup_federated(&self) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|i| i.provider == Provider::Federated)
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }
}
