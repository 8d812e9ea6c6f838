//! The backend endpoints the broadcast workflow consumes.
//!
//! Stores talk to a [`Backend`] rather than to [`ApiClient`] directly so the
//! whole workflow can run against an in-memory fake.

use async_trait::async_trait;
use beasiswa_shared::{
    AdminUser, ApiError, Broadcast, BroadcastDraft, Envelope, Recipient, SendBroadcastRequest,
};

use crate::api_client::ApiClient;
use crate::log_warn;

/// REST surface used by the broadcast workflow.
///
/// Every mutating call takes the session token explicitly; reads are public.
#[async_trait(?Send)]
pub trait Backend {
    /// `GET /api/broadcast`
    async fn list_broadcasts(&self) -> Result<Vec<Broadcast>, ApiError>;

    /// `POST /api/broadcast`. `None` when the backend acknowledged without a body.
    async fn create_broadcast(
        &self,
        token: &str,
        draft: &BroadcastDraft,
    ) -> Result<Option<Broadcast>, ApiError>;

    /// `PUT /api/broadcast/{id}`
    async fn update_broadcast(
        &self,
        token: &str,
        id: i64,
        draft: &BroadcastDraft,
    ) -> Result<(), ApiError>;

    /// `DELETE /api/broadcast/{id}`
    async fn delete_broadcast(&self, token: &str, id: i64) -> Result<(), ApiError>;

    /// `POST /api/broadcast/{id}/send`
    async fn send_broadcast(
        &self,
        token: &str,
        id: i64,
        request: &SendBroadcastRequest,
    ) -> Result<(), ApiError>;

    /// `GET /api/recipient`
    async fn list_recipients(&self) -> Result<Vec<Recipient>, ApiError>;

    /// `GET /api/auth/profile`
    async fn fetch_profile(&self, token: &str) -> Result<AdminUser, ApiError>;
}

/// Unwrap a response envelope, logging the non-canonical wrapped shape.
pub fn unwrap_envelope<T>(envelope: Envelope<T>, endpoint: &str) -> T {
    if envelope.is_wrapped() {
        log_warn!("{endpoint} answered with a wrapped body; expected the bare payload");
    }
    envelope.into_inner()
}

fn broadcast_path(id: i64) -> String {
    format!("/api/broadcast/{id}")
}

#[async_trait(?Send)]
impl Backend for ApiClient {
    async fn list_broadcasts(&self) -> Result<Vec<Broadcast>, ApiError> {
        let body: Option<Envelope<Vec<Broadcast>>> = self.get_json("/api/broadcast", None).await?;
        Ok(body
            .map(|env| unwrap_envelope(env, "GET /api/broadcast"))
            .unwrap_or_default())
    }

    async fn create_broadcast(
        &self,
        token: &str,
        draft: &BroadcastDraft,
    ) -> Result<Option<Broadcast>, ApiError> {
        let text = self.post_text("/api/broadcast", Some(token), draft).await?;
        // The write already happened; an unreadable reply only costs the local copy
        match ApiClient::decode::<Option<Envelope<Broadcast>>>(&text) {
            Ok(body) => Ok(body.map(|env| unwrap_envelope(env, "POST /api/broadcast"))),
            Err(err) => {
                log_warn!("POST /api/broadcast succeeded with an unreadable body: {err}");
                Ok(None)
            }
        }
    }

    async fn update_broadcast(
        &self,
        token: &str,
        id: i64,
        draft: &BroadcastDraft,
    ) -> Result<(), ApiError> {
        self.put_ack(&broadcast_path(id), Some(token), draft).await
    }

    async fn delete_broadcast(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.delete(&broadcast_path(id), Some(token)).await
    }

    async fn send_broadcast(
        &self,
        token: &str,
        id: i64,
        request: &SendBroadcastRequest,
    ) -> Result<(), ApiError> {
        let path = format!("{}/send", broadcast_path(id));
        self.post_ack(&path, Some(token), request).await
    }

    async fn list_recipients(&self) -> Result<Vec<Recipient>, ApiError> {
        let body: Option<Envelope<Vec<Recipient>>> = self.get_json("/api/recipient", None).await?;
        Ok(body
            .map(|env| unwrap_envelope(env, "GET /api/recipient"))
            .unwrap_or_default())
    }

    async fn fetch_profile(&self, token: &str) -> Result<AdminUser, ApiError> {
        self.get_json("/api/auth/profile", Some(token)).await
    }
}
