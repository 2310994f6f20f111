//! Session State
//!
//! The session is an explicit context value: views own a [`SessionStore`] and
//! pass `&Session` into every client call. Only the bearer token survives a
//! restart; mode and user id live for the lifetime of the process.

mod route;
mod storage;

pub use route::Route;
pub use storage::{PersistedSession, TokenStorage, TOKEN_KEY};

use std::fmt;
use thiserror::Error;

/// Color mode toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    Light,
    #[default]
    Dark,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Light => f.write_str("light"),
            Mode::Dark => f.write_str("dark"),
        }
    }
}

/// Opaque bearer credential. Never validated client-side.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Process-wide session values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub mode: Mode,
    pub user_id: Option<String>,
    token: Option<BearerToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session carrying a token, e.g. restored from storage
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Some(token),
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: BearerToken) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}

/// Errors from persisting session state
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Session plus its durable token storage.
///
/// Login and logout are the only transitions that change route access, and
/// both go through here so the persisted token never drifts from memory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    session: Session,
    storage: TokenStorage,
}

impl SessionStore {
    /// Restore the session from storage; a missing or unreadable file means
    /// unauthenticated.
    pub fn restore(storage: TokenStorage) -> Self {
        let session = match storage.load() {
            Some(token) => Session::with_token(token),
            None => Session::new(),
        };
        Self { session, storage }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &TokenStorage {
        &self.storage
    }

    pub fn login(&mut self, token: BearerToken, user_id: String) -> Result<(), SessionError> {
        self.storage.save(&token)?;
        self.session.set_token(token);
        self.session.user_id = Some(user_id);
        tracing::debug!("Session token stored at {:?}", self.storage.path());
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.session.clear_token();
        self.session.user_id = None;
        self.storage.delete()?;
        Ok(())
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.session.toggle_mode();
        self.session.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toggle_mode_twice_is_identity() {
        let mut session = Session::new();
        let original = session.mode;
        session.toggle_mode();
        assert_ne!(session.mode, original);
        session.toggle_mode();
        assert_eq!(session.mode, original);
    }

    #[test]
    fn test_default_mode_is_dark() {
        assert_eq!(Session::new().mode, Mode::Dark);
    }

    #[test]
    fn test_token_transitions() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());
        session.set_token(BearerToken::new("t"));
        assert_eq!(session.token().map(|t| t.as_str()), Some("t"));
        session.clear_token();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = BearerToken::new("secret-value");
        assert!(!format!("{:?}", token).contains("secret"));
        assert_eq!(token.header_value(), "Bearer secret-value");
    }

    #[test]
    fn test_store_persists_only_token() {
        let dir = TempDir::new().unwrap();
        let mut store = SessionStore::restore(TokenStorage::new(dir.path()));
        assert!(!store.session().is_authenticated());

        store.login(BearerToken::new("abc"), "u-1".into()).unwrap();
        store.toggle_mode();

        let restored = SessionStore::restore(TokenStorage::new(dir.path()));
        assert_eq!(restored.session().token(), Some(&BearerToken::new("abc")));
        assert_eq!(restored.session().user_id, None);
        assert_eq!(restored.session().mode, Mode::Dark);
    }

    #[test]
    fn test_logout_removes_persisted_token() {
        let dir = TempDir::new().unwrap();
        let mut store = SessionStore::restore(TokenStorage::new(dir.path()));
        store.login(BearerToken::new("abc"), "u-1".into()).unwrap();
        store.logout().unwrap();

        assert!(!store.session().is_authenticated());
        assert!(!store.storage().exists());
        let restored = SessionStore::restore(TokenStorage::new(dir.path()));
        assert!(!restored.session().is_authenticated());
    }
}
