//! Operator session state
//!
//! The bearer credential lives here and nowhere else. Login opens the
//! session, logout (or drop) closes it; gateway calls read the token
//! per request, so there is no global mutable token to leak between
//! operators.

use shared::client::UserInfo;
use tokio::sync::RwLock;

/// Token plus the identity the service attached to it
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub user: UserInfo,
}

/// Owns the credential for one operator session
#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<Option<Credential>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the credential returned by a successful login
    pub async fn open(&self, token: String, user: UserInfo) {
        let mut guard = self.inner.write().await;
        *guard = Some(Credential { token, user });
    }

    /// Drop the credential. Safe to call on an already-closed session.
    pub async fn close(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }

    pub async fn is_open(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Current bearer token, if logged in
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|c| c.token.clone())
    }

    /// Identity of the logged-in operator
    pub async fn user(&self) -> Option<UserInfo> {
        self.inner.read().await.as_ref().map(|c| c.user.clone())
    }
}
