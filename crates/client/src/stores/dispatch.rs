//! Delivery dispatcher: turns a recipient hand-off into one send request.
//!
//! ```text
//!   Idle ──arm(handoff)──▶ Pending ──begin_send──▶ Sending ──finish_send──▶ Idle
//!                            │  ▲                      (ok: status flips to Sent)
//!                     cancel │  │ select_channel
//!                            ▼  │
//!                           Idle
//! ```
//!
//! [`DeliveryDispatcher::arm`] is honoured once per dispatcher. To send again
//! the operator goes back through recipient selection, which mounts a fresh
//! broadcast page and therefore a fresh dispatcher.

use beasiswa_shared::{DeliveryChannel, SendBroadcastRequest, WorkflowError};
use chrono::Utc;

use super::{BroadcastStore, Notice, SelectionSet};
use crate::auth_session::SessionContext;
use crate::backend::Backend;
use crate::handoff::PendingHandoff;
use crate::{log_debug, log_error, log_info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DispatchState {
    #[default]
    Idle,
    Pending {
        broadcast_id: i64,
        recipients: SelectionSet,
        channel: DeliveryChannel,
    },
    Sending {
        broadcast_id: i64,
        recipient_count: usize,
        channel: DeliveryChannel,
    },
}

/// One delivery request; issued at most once per confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub token: String,
    pub broadcast_id: i64,
    pub body: SendBroadcastRequest,
}

impl DeliveryRequest {
    pub fn channel(&self) -> DeliveryChannel {
        self.body.method
    }

    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> Result<(), WorkflowError> {
        backend
            .send_broadcast(&self.token, self.broadcast_id, &self.body)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDispatcher {
    state: DispatchState,
    consumed: bool,
    pub notice: Option<Notice>,
}

impl DeliveryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    /// Whether the channel dialog should be shown.
    pub fn is_open(&self) -> bool {
        !matches!(self.state, DispatchState::Idle)
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, DispatchState::Sending { .. })
    }

    pub fn channel(&self) -> Option<DeliveryChannel> {
        match &self.state {
            DispatchState::Idle => None,
            DispatchState::Pending { channel, .. } | DispatchState::Sending { channel, .. } => {
                Some(*channel)
            }
        }
    }

    /// Inspect the navigation hand-off the page was opened with. Only the first
    /// call has any effect. Returns whether the dispatcher opened.
    pub fn arm(&mut self, handoff: &PendingHandoff) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;

        let Some((broadcast_id, recipients)) = handoff.pending() else {
            return false;
        };
        log_debug!(
            "delivery pending for broadcast {broadcast_id} to {} recipients",
            recipients.len()
        );
        self.state = DispatchState::Pending {
            broadcast_id,
            recipients: recipients.clone(),
            channel: DeliveryChannel::default(),
        };
        true
    }

    pub fn select_channel(&mut self, selected: DeliveryChannel) {
        if let DispatchState::Pending { channel, .. } = &mut self.state {
            *channel = selected;
        }
    }

    /// Close the dialog without sending anything.
    pub fn cancel(&mut self) {
        if matches!(self.state, DispatchState::Pending { .. }) {
            self.state = DispatchState::Idle;
        }
    }

    /// Operator pressed "send". Yields the single request to issue.
    pub fn begin_send(&mut self, session: &SessionContext) -> Result<DeliveryRequest, WorkflowError> {
        let DispatchState::Pending {
            broadcast_id,
            recipients,
            channel,
        } = &self.state
        else {
            return Err(WorkflowError::Validation(
                "No broadcast is waiting to be sent".to_string(),
            ));
        };
        let (broadcast_id, channel, recipients) = (*broadcast_id, *channel, recipients.to_vec());

        if recipients.is_empty() {
            let err = WorkflowError::Validation("Select recipients first".to_string());
            self.notice = Some(Notice::Error(err.to_string()));
            return Err(err);
        }

        let token = match session.require_token() {
            Ok(token) => token.to_string(),
            Err(err) => {
                self.state = DispatchState::Idle;
                self.notice = Some(Notice::Error(format!("Failed to send broadcast: {err}")));
                return Err(err);
            }
        };

        let request = DeliveryRequest {
            token,
            broadcast_id,
            body: SendBroadcastRequest {
                method: channel,
                recipients,
            },
        };
        self.state = DispatchState::Sending {
            broadcast_id,
            recipient_count: request.body.recipients.len(),
            channel,
        };
        Ok(request)
    }

    /// Apply the backend's answer. Only a success changes broadcast status.
    pub fn finish_send(
        &mut self,
        request: &DeliveryRequest,
        result: Result<(), WorkflowError>,
        store: &mut BroadcastStore,
    ) {
        self.state = DispatchState::Idle;
        match result {
            Ok(()) => {
                if !store.mark_sent(request.broadcast_id, Utc::now()) {
                    log_info!(
                        "broadcast {} sent but not in the local list",
                        request.broadcast_id
                    );
                }
                self.notice = Some(Notice::Success(format!(
                    "Broadcast sent via {}!",
                    request.channel().label()
                )));
            }
            Err(err) => {
                log_error!("Error sending broadcast {}: {err}", request.broadcast_id);
                let message = match err.status() {
                    Some(status) => format!(
                        "Failed to send broadcast ({status}): {}",
                        err.user_message(&format!("Request failed with status code {status}"))
                    ),
                    None => format!("Failed to send broadcast: {err}"),
                };
                self.notice = Some(Notice::Error(message));
            }
        }
    }

    pub async fn send<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &SessionContext,
        store: &mut BroadcastStore,
    ) -> Result<(), WorkflowError> {
        let request = self.begin_send(session)?;
        let result = request.run(backend).await;
        let outcome = result.clone();
        self.finish_send(&request, result, store);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{broadcast, logged_in, FakeBackend};
    use beasiswa_shared::BroadcastStatus;

    fn handoff(query: &str) -> PendingHandoff {
        PendingHandoff::parse(query)
    }

    #[test]
    fn handoff_opens_pending_with_primary_channel() {
        let mut dispatcher = DeliveryDispatcher::new();
        assert!(dispatcher.arm(&handoff("broadcastId=7&recipients=1,2,3")));
        assert_eq!(
            dispatcher.state(),
            &DispatchState::Pending {
                broadcast_id: 7,
                recipients: [1, 2, 3].into_iter().collect(),
                channel: DeliveryChannel::WhatsApp,
            }
        );
    }

    #[test]
    fn arm_is_consumed_once() {
        let mut dispatcher = DeliveryDispatcher::new();
        assert!(!dispatcher.arm(&handoff("")));
        assert!(!dispatcher.arm(&handoff("broadcastId=7&recipients=1")));
        assert!(!dispatcher.is_open());

        let mut dispatcher = DeliveryDispatcher::new();
        assert!(dispatcher.arm(&handoff("broadcastId=7&recipients=1")));
        dispatcher.cancel();
        assert!(!dispatcher.arm(&handoff("broadcastId=7&recipients=1")));
        assert_eq!(dispatcher.state(), &DispatchState::Idle);
    }

    #[test]
    fn incomplete_handoff_stays_idle() {
        let mut dispatcher = DeliveryDispatcher::new();
        assert!(!dispatcher.arm(&handoff("broadcastId=7")));
        assert!(!dispatcher.is_open());
        assert!(dispatcher.begin_send(&logged_in()).is_err());
    }

    #[tokio::test]
    async fn cancel_sends_nothing() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(7, "G")]);
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;
        let before = store.clone();

        let mut dispatcher = DeliveryDispatcher::new();
        dispatcher.arm(&handoff("broadcastId=7&recipients=1"));
        dispatcher.select_channel(DeliveryChannel::Email);
        dispatcher.cancel();

        assert!(!dispatcher.is_open());
        assert!(dispatcher
            .send(&backend, &logged_in(), &mut store)
            .await
            .is_err());
        assert_eq!(store, before);
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn success_marks_only_the_target_sent() {
        let backend =
            FakeBackend::with_broadcasts(vec![broadcast(6, "F"), broadcast(7, "G"), broadcast(8, "H")]);
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;

        let mut dispatcher = DeliveryDispatcher::new();
        dispatcher.arm(&handoff("broadcastId=7&recipients=1,2,3"));
        dispatcher.select_channel(DeliveryChannel::Email);
        dispatcher.send(&backend, &logged_in(), &mut store).await.unwrap();

        let sent = store.get(7).unwrap();
        assert_eq!(sent.status, BroadcastStatus::Sent);
        assert!(sent.sent_at.is_some());
        for id in [6, 8] {
            assert_eq!(store.get(id).unwrap().status, BroadcastStatus::Draft);
            assert!(store.get(id).unwrap().sent_at.is_none());
        }
        assert!(!dispatcher.is_open());
        assert_eq!(
            dispatcher.notice,
            Some(Notice::Success("Broadcast sent via Email!".to_string()))
        );

        let sends = backend.sends();
        assert_eq!(sends.len(), 1);
        assert_eq!(sends[0].0, 7);
        assert_eq!(
            sends[0].1,
            SendBroadcastRequest {
                method: DeliveryChannel::Email,
                recipients: vec![1, 2, 3],
            }
        );
    }

    #[tokio::test]
    async fn failure_leaves_every_status_untouched() {
        let mut failed = broadcast(9, "I");
        failed.status = BroadcastStatus::Failed;
        let backend = FakeBackend::with_broadcasts(vec![broadcast(7, "G"), failed]);
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;
        let before = store.broadcasts().to_vec();

        let mut dispatcher = DeliveryDispatcher::new();
        dispatcher.arm(&handoff("broadcastId=7&recipients=4"));
        backend.fail_next_with_status(502, r#"{"message":"WhatsApp gateway offline"}"#);
        let err = dispatcher
            .send(&backend, &logged_in(), &mut store)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert_eq!(store.broadcasts(), before.as_slice());
        assert!(!dispatcher.is_open());
        assert_eq!(
            dispatcher.notice,
            Some(Notice::Error(
                "Failed to send broadcast (502): WhatsApp gateway offline".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn missing_token_closes_without_request() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(7, "G")]);
        let mut store = BroadcastStore::new();
        let mut dispatcher = DeliveryDispatcher::new();
        dispatcher.arm(&handoff("broadcastId=7&recipients=4"));

        let err = dispatcher
            .send(&backend, &SessionContext::anonymous(), &mut store)
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::not_logged_in());
        assert!(!dispatcher.is_open());
        assert!(backend.sends().is_empty());
    }

    #[test]
    fn second_confirm_while_sending_is_rejected() {
        let mut dispatcher = DeliveryDispatcher::new();
        dispatcher.arm(&handoff("broadcastId=7&recipients=4"));
        let session = logged_in();
        let request = dispatcher.begin_send(&session).unwrap();
        assert!(dispatcher.is_sending());
        assert_eq!(request.channel(), DeliveryChannel::WhatsApp);
        assert!(dispatcher.begin_send(&session).is_err());
    }
}
