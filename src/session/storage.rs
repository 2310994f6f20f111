//! Durable token storage (JSON file in the state directory).

use super::{BearerToken, SessionError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed key the token is written under
pub const TOKEN_KEY: &str = "token";

const SESSION_FILE: &str = "session.json";

/// On-disk layout: `{"token": "..."}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: state_dir.into().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, token: &BearerToken) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let persisted = PersistedSession {
            token: Some(token.as_str().to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&persisted)?)?;
        Ok(())
    }

    pub fn load(&self) -> Option<BearerToken> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<PersistedSession>(&json) {
            Ok(persisted) => persisted
                .token
                .filter(|t| !t.is_empty())
                .map(BearerToken::new),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn delete(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
