//! Login screen

use super::{is_blank, ViewError, ViewResult};
use crate::client::{ApiClient, ClientError};
use crate::session::{BearerToken, Route, SessionStore};

/// Shown when the login request never got an answer
pub const LOGIN_TRANSPORT_ERROR: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl LoginView {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the credentials.
    ///
    /// On success the token and user id are stored in the session (the token
    /// is also persisted) and the dashboard route is returned. On failure the
    /// token stays absent and the server's text is kept as the error banner.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        store: &mut SessionStore,
    ) -> ViewResult<Route> {
        self.error = None;

        if is_blank(&self.email) || is_blank(&self.password) {
            let msg = "Email and password are required".to_string();
            self.error = Some(msg.clone());
            return Err(ViewError::Validation(msg));
        }

        match client.login(self.email.trim(), &self.password).await {
            Ok(response) => {
                store.login(BearerToken::new(response.token), response.user.id)?;
                self.password.clear();
                tracing::info!(email = %self.email, "Logged in");
                Ok(Route::resolve(Route::Login, store.session()))
            }
            Err(e) => {
                self.error = Some(match &e {
                    ClientError::Transport(_) => LOGIN_TRANSPORT_ERROR.to_string(),
                    other => other.user_message(),
                });
                Err(e.into())
            }
        }
    }
}
