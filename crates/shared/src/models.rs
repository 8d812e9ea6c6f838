//! Wire models for the scholarship backend's broadcast and recipient endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

// --- Broadcasts ---

/// Delivery status of a broadcast as reported by the backend.
///
/// The backend only ever writes `"Sent"` and `"Failed"`; a missing or unknown
/// value is a draft that has not been delivered yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum BroadcastStatus {
    #[default]
    Draft,
    Sent,
    Failed,
}

impl From<Option<String>> for BroadcastStatus {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("Sent") => Self::Sent,
            Some("Failed") => Self::Failed,
            _ => Self::Draft,
        }
    }
}

impl From<BroadcastStatus> for String {
    fn from(status: BroadcastStatus) -> Self {
        status.as_str().to_string()
    }
}

impl BroadcastStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for BroadcastStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BroadcastStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

impl Broadcast {
    pub fn is_sent(&self) -> bool {
        self.status == BroadcastStatus::Sent
    }
}

/// Body of `POST /api/broadcast` and `PUT /api/broadcast/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastDraft {
    pub title: String,
    pub content: String,
}

impl BroadcastDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Both fields must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        if self.title.trim().is_empty() {
            return Err(WorkflowError::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(WorkflowError::Validation("Message is required".to_string()));
        }
        Ok(())
    }
}

// --- Delivery ---

/// Transport used to deliver a broadcast. WhatsApp is the primary channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryChannel {
    #[default]
    #[serde(rename = "whatsapp")]
    WhatsApp,
    #[serde(rename = "email")]
    Email,
}

impl DeliveryChannel {
    pub const ALL: [DeliveryChannel; 2] = [DeliveryChannel::WhatsApp, DeliveryChannel::Email];

    /// Tag sent to the backend in the `method` field.
    pub fn tag(self) -> &'static str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WhatsApp => "WhatsApp",
            Self::Email => "Email",
        }
    }
}

impl std::fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /api/broadcast/{id}/send`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendBroadcastRequest {
    pub method: DeliveryChannel,
    pub recipients: Vec<i64>,
}

// --- Recipients ---

/// A scholarship beneficiary from the recipient directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, rename = "nrp")]
    pub registration_number: String,
    #[serde(default, rename = "ipk")]
    pub gpa: f64,
    #[serde(default, rename = "departemen")]
    pub department: String,
    #[serde(default, rename = "noHp")]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "keteranganLulus", skip_serializing_if = "Option::is_none")]
    pub graduation_note: Option<String>,
}

// --- Session ---

/// User record cached next to the session token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

// --- Envelopes ---

/// A response body that is either the payload itself or the payload wrapped in
/// a single named field (`{"broadcasts": [...]}`, `{"broadcast": {...}}`).
///
/// The bare shape is canonical. The wrapped shape is still accepted so callers
/// can log it as a contract deviation instead of failing the request.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Envelope<T> {
    Bare(T),
    Wrapped(Wrapped<T>),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Wrapped<T> {
    #[serde(
        alias = "broadcast",
        alias = "broadcasts",
        alias = "recipient",
        alias = "recipients"
    )]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Envelope::Wrapped(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Envelope::Bare(inner) => inner,
            Envelope::Wrapped(wrapped) => wrapped.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROADCAST_JSON: &str = r#"{
        "id": 7,
        "title": "Pencairan dana",
        "content": "Dana semester genap sudah cair",
        "createdAt": "2024-03-01T08:00:00.000Z",
        "updatedAt": "2024-03-01T08:00:00.000Z"
    }"#;

    #[test]
    fn status_defaults_to_draft_when_missing_or_unknown() {
        let b: Broadcast = serde_json::from_str(BROADCAST_JSON).unwrap();
        assert_eq!(b.status, BroadcastStatus::Draft);
        assert!(b.sent_at.is_none());

        let pending: BroadcastStatus = serde_json::from_str(r#""Pending""#).unwrap();
        assert_eq!(pending, BroadcastStatus::Draft);
        let null: BroadcastStatus = serde_json::from_str("null").unwrap();
        assert_eq!(null, BroadcastStatus::Draft);
        let sent: BroadcastStatus = serde_json::from_str(r#""Sent""#).unwrap();
        assert_eq!(sent, BroadcastStatus::Sent);
    }

    #[test]
    fn envelope_accepts_bare_and_wrapped_items() {
        let bare: Envelope<Broadcast> = serde_json::from_str(BROADCAST_JSON).unwrap();
        assert!(!bare.is_wrapped());

        let wrapped_json = format!(r#"{{"message":"ok","broadcast":{BROADCAST_JSON}}}"#);
        let wrapped: Envelope<Broadcast> = serde_json::from_str(&wrapped_json).unwrap();
        assert!(wrapped.is_wrapped());
        assert_eq!(bare.into_inner(), wrapped.into_inner());
    }

    #[test]
    fn envelope_accepts_wrapped_recipient_list() {
        let json = r#"{"recipients":[{"id":1,"name":"Ayu","nrp":"5025201001","ipk":3.8,"departemen":"Informatika","noHp":"0812","email":"ayu@example.com"}]}"#;
        let list: Envelope<Vec<Recipient>> = serde_json::from_str(json).unwrap();
        assert!(list.is_wrapped());
        let list = list.into_inner();
        assert_eq!(list[0].registration_number, "5025201001");
        assert_eq!(list[0].department, "Informatika");
    }

    #[test]
    fn send_request_uses_channel_tags() {
        let req = SendBroadcastRequest {
            method: DeliveryChannel::Email,
            recipients: vec![1, 2],
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"method":"email","recipients":[1,2]}"#
        );
        assert_eq!(DeliveryChannel::default(), DeliveryChannel::WhatsApp);
    }

    #[test]
    fn draft_validation_trims() {
        assert!(BroadcastDraft::new("  ", "body").validate().is_err());
        assert!(BroadcastDraft::new("title", "\n\t").validate().is_err());
        assert!(BroadcastDraft::new(" title ", " body ").validate().is_ok());
    }
}
