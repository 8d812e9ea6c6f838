//! Authentication session with persistent storage.
//!
//! The session is an explicit object handed to every action that needs
//! authenticated access. Lifecycle: [`SessionContext::restore`] once on load,
//! [`SessionContext::login`] when a token is issued, [`SessionContext::logout`]
//! to clear both memory and storage.

use beasiswa_shared::{AdminUser, ApiError, WorkflowError};
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::{log_info, log_warn, storage};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Stored session data
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<AdminUser>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    session: Option<AuthSession>,
}

impl SessionContext {
    /// A context that is not logged in and never touches storage.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context holding `session` without persisting it.
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Load the session persisted by a previous login.
    pub fn restore() -> Self {
        let session = storage::load_string(TOKEN_KEY).map(|token| AuthSession {
            token,
            user: storage::load(USER_KEY),
        });
        Self { session }
    }

    /// Store a freshly issued token.
    pub fn login(&mut self, token: String, user: Option<AdminUser>) {
        if !storage::save_string(TOKEN_KEY, &token) {
            log_warn!("could not persist session token");
        }
        match &user {
            Some(user) => {
                storage::save(USER_KEY, user);
            }
            None => storage::remove(USER_KEY),
        }
        self.session = Some(AuthSession { token, user });
    }

    /// Logout and clear session
    pub fn logout(&mut self) {
        storage::remove(TOKEN_KEY);
        storage::remove(USER_KEY);
        self.session = None;
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&AdminUser> {
        self.session.as_ref().and_then(|s| s.user.as_ref())
    }

    /// The bearer token, or the local precondition failure reported before
    /// any request is attempted.
    pub fn require_token(&self) -> Result<&str, WorkflowError> {
        self.session
            .as_ref()
            .map(|s| s.token.as_str())
            .ok_or_else(WorkflowError::not_logged_in)
    }

    /// Check the stored token against the backend.
    ///
    /// A token the backend rejects (401/403) clears the session; other
    /// failures leave it in place. The cached user record is refreshed
    /// from the profile on success.
    pub async fn verify<B: Backend + ?Sized>(&mut self, backend: &B) -> Result<(), WorkflowError> {
        let token = self.require_token()?.to_string();
        match backend.fetch_profile(&token).await {
            Ok(user) => {
                if let Some(session) = self.session.as_mut() {
                    session.user = Some(user);
                }
                Ok(())
            }
            Err(err @ ApiError::Http { status: 401 | 403, .. }) => {
                log_info!("stored session rejected: {err}");
                self.logout();
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
