use async_trait::async_trait;
use dashmap::DashMap;

/// Credential check performed before a socket is upgraded or ICE servers are
/// handed out. Implement it to plug in a real identity provider.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> bool;
}

/// In-memory username/password table.
#[derive(Debug, Default)]
pub struct StaticAuthenticator {
    users: DashMap<String, String>,
}

impl StaticAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users<I, U, P>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(username, password)| (username.into(), password.into()))
                .collect(),
        }
    }

    pub fn insert(&self, username: impl Into<String>, password: impl Into<String>) {
        self.users.insert(username.into(), password.into());
    }

    pub fn remove(&self, username: &str) -> bool {
        self.users.remove(username).is_some()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| stored.value() == password)
    }
}
