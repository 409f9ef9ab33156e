//! Shared session state: the token pair and the authenticated user.
//!
//! One instance is shared by every service wrapper; all mutation goes
//! through these methods so token rotation is serial and readers never
//! observe a half-replaced pair. The lock is never held across an
//! await point.

use std::sync::RwLock;

use srdesk_core::user::{TokenPair, User};

#[derive(Default)]
struct SessionState {
    tokens: Option<TokenPair>,
    user: Option<User>,
}

/// Lock-guarded auth state for one client.
#[derive(Default)]
pub struct Session {
    inner: RwLock<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current access token, if logged in.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .tokens
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Current refresh token, if logged in.
    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .tokens
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    /// Replace the token pair (login or refresh).
    pub fn set_tokens(&self, tokens: TokenPair) {
        self.inner.write().expect("session lock poisoned").tokens = Some(tokens);
    }

    /// Record the authenticated user.
    pub fn set_user(&self, user: User) {
        self.inner.write().expect("session lock poisoned").user = Some(user);
    }

    /// The authenticated user, if known.
    pub fn user(&self) -> Option<User> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .user
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .tokens
            .is_some()
    }

    /// Drop tokens and user (logout or failed refresh).
    pub fn clear(&self) {
        let mut state = self.inner.write().expect("session lock poisoned");
        state.tokens = None;
        state.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(access: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: "refresh-1".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        }
    }

    #[test]
    fn tokens_replace_atomically() {
        let session = Session::new();
        assert!(!session.is_authenticated());

        session.set_tokens(tokens("access-1"));
        assert_eq!(session.access_token().as_deref(), Some("access-1"));

        session.set_tokens(tokens("access-2"));
        assert_eq!(session.access_token().as_deref(), Some("access-2"));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn clear_drops_everything() {
        let session = Session::new();
        session.set_tokens(tokens("access-1"));
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
        assert!(session.user().is_none());
    }
}
