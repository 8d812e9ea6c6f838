//! Session context for the component tree.

use beasiswa_client::{ApiClient, ClientConfig, SessionContext};
use dioxus::prelude::*;

/// Authentication context provided to the app
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    pub session: Signal<SessionContext>,
    pub config: Signal<ClientConfig>,
}

/// Provider component that restores the persisted session once and shares it
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_signal(SessionContext::restore);
    let config = use_signal(ClientConfig::from_env);

    use_context_provider(|| AuthContext { session, config });

    children
}

impl AuthContext {
    /// Store a pasted admin token; the profile is fetched by [`Self::verify`]
    pub fn login(&mut self, token: String) {
        self.session.write().login(token, None);
    }

    /// Logout and clear session
    pub fn logout(&mut self) {
        self.session.write().logout();
    }

    /// Create an API client for the configured backend
    pub fn client(&self) -> ApiClient {
        ApiClient::new().with_base_url(self.config.read().api_base_url.clone())
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// Display name of the logged-in admin
    pub fn username(&self) -> Option<String> {
        self.session
            .read()
            .user()
            .and_then(|u| u.username.clone())
    }

    /// Check the stored token against the backend, clearing it if rejected.
    pub async fn verify(mut self) {
        let client = self.client();
        let mut session = self.session.peek().clone();
        if let Err(err) = session.verify(&client).await {
            beasiswa_client::log_warn!("session check failed: {err}");
        }
        self.session.set(session);
    }
}
