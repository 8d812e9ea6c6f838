//! Test utilities for the broadcast workflow.
//!
//! - [`FakeBackend`]: in-memory [`Backend`] that records every call
//! - [`broadcast`] / [`recipient`]: fixture constructors
//! - [`logged_in`]: a session with a fixed token

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use beasiswa_shared::{
    AdminUser, ApiError, Broadcast, BroadcastDraft, BroadcastStatus, Recipient,
    SendBroadcastRequest,
};
use chrono::{DateTime, TimeZone, Utc};

use crate::auth_session::{AuthSession, SessionContext};
use crate::backend::Backend;

pub const TEST_TOKEN: &str = "test-token";

/// Timestamp used for fixtures and for every write the fake backend makes.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

pub fn broadcast(id: i64, title: &str) -> Broadcast {
    Broadcast {
        id,
        title: title.to_string(),
        content: format!("{title} content"),
        created_at: fixture_time(),
        updated_at: fixture_time(),
        status: BroadcastStatus::Draft,
        sent_at: None,
    }
}

pub fn recipient(id: i64, name: &str) -> Recipient {
    Recipient {
        id,
        name: name.to_string(),
        photo: None,
        registration_number: format!("50252{id:05}"),
        gpa: 3.5,
        department: "Informatika".to_string(),
        phone: format!("08120000{id:04}"),
        email: format!("recipient{id}@example.com"),
        status: None,
        graduation_note: None,
    }
}

pub fn logged_in() -> SessionContext {
    SessionContext::with_session(AuthSession {
        token: TEST_TOKEN.to_string(),
        user: None,
    })
}

/// A backend call as seen by [`FakeBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListBroadcasts,
    CreateBroadcast { token: String, draft: BroadcastDraft },
    UpdateBroadcast { token: String, id: i64, draft: BroadcastDraft },
    DeleteBroadcast { token: String, id: i64 },
    SendBroadcast { token: String, id: i64, request: SendBroadcastRequest },
    ListRecipients,
    FetchProfile { token: String },
}

/// In-memory backend. Writes trim whitespace the way the real service does,
/// so local optimistic patches can be told apart from stored values.
#[derive(Debug, Default)]
pub struct FakeBackend {
    broadcasts: RefCell<Vec<Broadcast>>,
    recipients: RefCell<Vec<Recipient>>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<VecDeque<ApiError>>,
    next_id: Cell<i64>,
}

impl FakeBackend {
    pub fn with_broadcasts(broadcasts: Vec<Broadcast>) -> Self {
        let next_id = broadcasts.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            broadcasts: RefCell::new(broadcasts),
            next_id: Cell::new(next_id),
            ..Self::default()
        }
    }

    pub fn with_recipients(recipients: Vec<Recipient>) -> Self {
        Self {
            recipients: RefCell::new(recipients),
            ..Self::default()
        }
    }

    pub fn set_recipients(&self, recipients: Vec<Recipient>) {
        *self.recipients.borrow_mut() = recipients;
    }

    /// Make the next call answer with an HTTP error.
    pub fn fail_next_with_status(&self, status: u16, body: &str) {
        self.failures.borrow_mut().push_back(ApiError::Http {
            status,
            body: body.to_string(),
        });
    }

    /// Make the next call fail before reaching the server.
    pub fn fail_next_network(&self, msg: &str) {
        self.failures
            .borrow_mut()
            .push_back(ApiError::Network(msg.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Every send request, as `(broadcast id, body)`.
    pub fn sends(&self) -> Vec<(i64, SendBroadcastRequest)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SendBroadcast { id, request, .. } => Some((*id, request.clone())),
                _ => None,
            })
            .collect()
    }

    /// The backend's copy of broadcast `id`.
    pub fn stored(&self, id: i64) -> Option<Broadcast> {
        self.broadcasts.borrow().iter().find(|b| b.id == id).cloned()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Http {
            status: 404,
            body: r#"{"message":"Broadcast not found"}"#.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn list_broadcasts(&self) -> Result<Vec<Broadcast>, ApiError> {
        self.record(Call::ListBroadcasts)?;
        Ok(self.broadcasts.borrow().clone())
    }

    async fn create_broadcast(
        &self,
        token: &str,
        draft: &BroadcastDraft,
    ) -> Result<Option<Broadcast>, ApiError> {
        self.record(Call::CreateBroadcast {
            token: token.to_string(),
            draft: draft.clone(),
        })?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = Broadcast {
            id,
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            created_at: fixture_time(),
            updated_at: fixture_time(),
            status: BroadcastStatus::Draft,
            sent_at: None,
        };
        self.broadcasts.borrow_mut().insert(0, created.clone());
        Ok(Some(created))
    }

    async fn update_broadcast(
        &self,
        token: &str,
        id: i64,
        draft: &BroadcastDraft,
    ) -> Result<(), ApiError> {
        self.record(Call::UpdateBroadcast {
            token: token.to_string(),
            id,
            draft: draft.clone(),
        })?;
        let mut broadcasts = self.broadcasts.borrow_mut();
        let stored = broadcasts
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(Self::not_found)?;
        stored.title = draft.title.trim().to_string();
        stored.content = draft.content.trim().to_string();
        stored.updated_at = fixture_time();
        Ok(())
    }

    async fn delete_broadcast(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.record(Call::DeleteBroadcast {
            token: token.to_string(),
            id,
        })?;
        let mut broadcasts = self.broadcasts.borrow_mut();
        let before = broadcasts.len();
        broadcasts.retain(|b| b.id != id);
        if broadcasts.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn send_broadcast(
        &self,
        token: &str,
        id: i64,
        request: &SendBroadcastRequest,
    ) -> Result<(), ApiError> {
        self.record(Call::SendBroadcast {
            token: token.to_string(),
            id,
            request: request.clone(),
        })?;
        let mut broadcasts = self.broadcasts.borrow_mut();
        let stored = broadcasts
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(Self::not_found)?;
        stored.status = BroadcastStatus::Sent;
        stored.sent_at = Some(fixture_time());
        Ok(())
    }

    async fn list_recipients(&self) -> Result<Vec<Recipient>, ApiError> {
        self.record(Call::ListRecipients)?;
        Ok(self.recipients.borrow().clone())
    }

    async fn fetch_profile(&self, token: &str) -> Result<AdminUser, ApiError> {
        self.record(Call::FetchProfile {
            token: token.to_string(),
        })?;
        Ok(AdminUser {
            username: Some("admin".to_string()),
            role: Some("admin".to_string()),
        })
    }
}
